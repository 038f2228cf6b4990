//! Risk and return statistics over a [`Series`]
//!
//! Every function here is pure: the result depends only on the series and
//! the annualization convention, and nothing is cached or mutated.

use chrono::Months;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::frequency::Annualization;
use crate::result::{AnalysisResult, Metric, MetricValue, UndefinedReason};
use crate::series::Series;

/// Computes metrics under a fixed annualization convention
///
/// # Example
///
/// ```
/// use advisor_analysis::{Analyzer, Series};
/// use chrono::NaiveDate;
///
/// let d = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
/// let series = Series::from_pairs([
///     (d(2020), 100.0),
///     (d(2021), 90.0),
///     (d(2022), 95.0),
///     (d(2023), 80.0),
///     (d(2024), 130.0),
/// ])
/// .unwrap();
///
/// let analyzer = Analyzer::default();
/// assert_eq!(analyzer.max_drawdown(&series).unwrap(), -0.2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Analyzer {
    annualization: Annualization,
}

/// Distribution of annualized returns over every complete rolling window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingSummary {
    pub window_years: u32,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Periodic standard deviation at or below this fraction of the mean return
/// (floored at 1) counts as zero volatility
pub const ZERO_VOLATILITY_TOLERANCE: f64 = 1e-12;

struct PeriodicStats {
    mean: f64,
    std_dev: f64,
    periods_per_year: f64,
}

impl Analyzer {
    pub fn new(annualization: Annualization) -> Self {
        Self { annualization }
    }

    pub fn annualization(&self) -> &Annualization {
        &self.annualization
    }

    /// Compound annual growth rate: `(last / first)^(1 / years) - 1`
    ///
    /// `years` comes from the first and last timestamps, not a period count.
    /// A growth rate that overflows (large moves over very short spans) is
    /// rejected as `InvalidInput`.
    pub fn cagr(&self, series: &Series) -> Result<f64> {
        require_points(series, 2, "CAGR")?;

        let years = series.span_years(self.annualization.days_per_year);
        if years <= 0.0 {
            return Err(AnalysisError::invalid(format!(
                "CAGR needs a positive elapsed span, got {years} years"
            )));
        }
        let first = series.first().value;
        if first <= 0.0 {
            return Err(AnalysisError::invalid(format!(
                "CAGR needs a positive starting value, got {first}"
            )));
        }

        finite("CAGR", (series.last().value / first).powf(1.0 / years) - 1.0)
    }

    /// Sample standard deviation of simple returns scaled by `sqrt(periods_per_year)`
    pub fn annualized_volatility(&self, series: &Series) -> Result<f64> {
        let stats = self.periodic_stats(series)?;
        finite(
            "annualized volatility",
            stats.std_dev * stats.periods_per_year.sqrt(),
        )
    }

    /// Excess annualized mean return per unit of annualized volatility
    ///
    /// A zero-volatility series yields [`MetricValue::Undefined`] rather than
    /// an error. Volatility is zero when the periodic standard deviation is
    /// within [`ZERO_VOLATILITY_TOLERANCE`] of `max(|mean return|, 1)`, so
    /// constant-growth series whose returns differ only by rounding count as
    /// riskless.
    pub fn sharpe_ratio(&self, series: &Series, risk_free_rate: f64) -> Result<MetricValue> {
        if !risk_free_rate.is_finite() {
            return Err(AnalysisError::invalid(format!(
                "risk-free rate must be finite, got {risk_free_rate}"
            )));
        }

        let stats = self.periodic_stats(series)?;
        if stats.std_dev <= ZERO_VOLATILITY_TOLERANCE * stats.mean.abs().max(1.0) {
            return Ok(MetricValue::Undefined(UndefinedReason::ZeroVolatility));
        }

        let volatility = stats.std_dev * stats.periods_per_year.sqrt();
        let annual_return = stats.mean * stats.periods_per_year;
        let sharpe = finite("Sharpe ratio", (annual_return - risk_free_rate) / volatility)?;
        Ok(MetricValue::Value(sharpe))
    }

    /// Largest decline from a running peak, as a non-positive fraction
    pub fn max_drawdown(&self, series: &Series) -> Result<f64> {
        require_points(series, 2, "max drawdown")?;

        let mut peak = f64::MIN;
        let mut worst = 0.0_f64;
        for value in series.values() {
            peak = peak.max(value);
            worst = worst.min((value - peak) / peak);
        }
        finite("max drawdown", worst)
    }

    /// Number of periods per year this analyzer applies to the series
    pub fn periods_per_year(&self, series: &Series) -> Result<f64> {
        self.annualization.periods_per_year(series)
    }

    /// Run all four metrics
    ///
    /// Inputs too short for a metric produce
    /// `Undefined(InsufficientData)` for that metric instead of failing the
    /// whole call.
    pub fn analyze(&self, series: &Series, risk_free_rate: f64) -> AnalysisResult {
        let sharpe = match self.sharpe_ratio(series, risk_free_rate) {
            Ok(value) => value,
            Err(_) => MetricValue::Undefined(UndefinedReason::InsufficientData),
        };

        AnalysisResult::new()
            .with(Metric::Cagr, outcome(self.cagr(series)))
            .with(
                Metric::AnnualizedVolatility,
                outcome(self.annualized_volatility(series)),
            )
            .with(Metric::SharpeRatio, sharpe)
            .with(Metric::MaxDrawdown, outcome(self.max_drawdown(series)))
    }

    /// CAGR over the trailing `years` calendar years
    ///
    /// When the history is shorter than the horizon the whole series is used,
    /// so the figure reflects the span actually available.
    pub fn trailing_cagr(&self, series: &Series, years: u32) -> Result<f64> {
        let cutoff = years
            .checked_mul(12)
            .and_then(|months| series.last().date.checked_sub_months(Months::new(months)))
            .ok_or_else(|| AnalysisError::invalid(format!("horizon of {years} years out of range")))?;

        match series.tail_since(cutoff) {
            Some(window) => self.cagr(&window),
            None => self.cagr(series),
        }
    }

    /// Annualized returns over every complete `window_years` window
    ///
    /// Each window starts at an observation and ends at the first observation
    /// at least `window_years` later.
    pub fn rolling_returns(&self, series: &Series, window_years: u32) -> Result<RollingSummary> {
        if window_years == 0 {
            return Err(AnalysisError::invalid("rolling window must be at least 1 year"));
        }

        let points = series.points();
        let mut returns = Vec::new();
        for start in points {
            let Some(target) = window_years
                .checked_mul(12)
                .and_then(|months| start.date.checked_add_months(Months::new(months)))
            else {
                break;
            };
            let end = points.partition_point(|p| p.date < target);
            if end >= points.len() {
                break;
            }
            let pair = Series::new(vec![*start, points[end]])?;
            returns.push(self.cagr(&pair)?);
        }

        if returns.is_empty() {
            return Err(AnalysisError::invalid(format!(
                "series spans {} days, shorter than one {window_years}-year window",
                series.span_days()
            )));
        }

        let count = returns.len();
        let min = returns.iter().copied().fold(f64::INFINITY, f64::min);
        let max = returns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = returns.iter().sum::<f64>() / count as f64;

        Ok(RollingSummary {
            window_years,
            count,
            min,
            max,
            mean,
        })
    }

    fn periodic_stats(&self, series: &Series) -> Result<PeriodicStats> {
        let returns = series.returns();
        if returns.len() < 2 {
            return Err(AnalysisError::invalid(format!(
                "volatility needs at least 2 returns (3 points), series has {} point(s)",
                series.len()
            )));
        }
        let periods_per_year = self.annualization.periods_per_year(series)?;

        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let std_dev = variance.sqrt();
        if !mean.is_finite() || !std_dev.is_finite() {
            return Err(AnalysisError::invalid(
                "periodic returns overflow; values span too many orders of magnitude",
            ));
        }

        Ok(PeriodicStats {
            mean,
            std_dev,
            periods_per_year,
        })
    }
}

fn require_points(series: &Series, required: usize, metric: &str) -> Result<()> {
    if series.len() < required {
        return Err(AnalysisError::invalid(format!(
            "{metric} needs at least {required} points, series has {}",
            series.len()
        )));
    }
    Ok(())
}

fn finite(metric: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::invalid(format!(
            "{metric} is not a finite number ({value})"
        )))
    }
}

fn outcome(result: Result<f64>) -> MetricValue {
    match result {
        Ok(value) => MetricValue::Value(value),
        Err(_) => MetricValue::Undefined(UndefinedReason::InsufficientData),
    }
}

/// [`Analyzer::cagr`] under the default convention
pub fn cagr(series: &Series) -> Result<f64> {
    Analyzer::default().cagr(series)
}

/// [`Analyzer::annualized_volatility`] under the default convention
pub fn annualized_volatility(series: &Series) -> Result<f64> {
    Analyzer::default().annualized_volatility(series)
}

/// [`Analyzer::sharpe_ratio`] under the default convention
pub fn sharpe_ratio(series: &Series, risk_free_rate: f64) -> Result<MetricValue> {
    Analyzer::default().sharpe_ratio(series, risk_free_rate)
}

/// [`Analyzer::max_drawdown`] under the default convention
pub fn max_drawdown(series: &Series) -> Result<f64> {
    Analyzer::default().max_drawdown(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};

    fn yearly(values: &[f64]) -> Series {
        Series::from_pairs(values.iter().enumerate().map(|(i, v)| {
            (NaiveDate::from_ymd_opt(2020 + i as i32, 1, 1).unwrap(), *v)
        }))
        .unwrap()
    }

    fn daily(values: &[f64]) -> Series {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Series::from_pairs(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| (start + Duration::days(i as i64), *v)),
        )
        .unwrap()
    }

    #[test]
    fn test_cagr_known_series() {
        let series = yearly(&[100.0, 110.0, 105.0, 120.0]);
        let value = cagr(&series).unwrap();
        assert_relative_eq!(value, 0.0627, epsilon = 1e-3);
        assert_relative_eq!(value, 1.2_f64.powf(1.0 / 3.0) - 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_cagr_flat_endpoints_is_zero() {
        let series = yearly(&[100.0, 150.0, 70.0, 100.0]);
        assert_eq!(cagr(&series).unwrap(), 0.0);

        let short = daily(&[37.5, 12.0, 37.5]);
        assert_eq!(cagr(&short).unwrap(), 0.0);
    }

    #[test]
    fn test_cagr_decline_is_negative() {
        let series = yearly(&[100.0, 81.0]);
        let value = cagr(&series).unwrap();
        assert!(value < 0.0);
        assert_relative_eq!(value, -0.19, epsilon = 1e-3);
    }

    #[test]
    fn test_constant_series() {
        let series = daily(&[50.0; 20]);
        assert_eq!(annualized_volatility(&series).unwrap(), 0.0);
        assert_eq!(
            sharpe_ratio(&series, 0.0).unwrap(),
            MetricValue::Undefined(UndefinedReason::ZeroVolatility)
        );
        assert_eq!(max_drawdown(&series).unwrap(), 0.0);
    }

    #[test]
    fn test_volatility_daily_scaling() {
        // returns: +10%, -10%; sample std = 0.1 * sqrt(2)
        let series = daily(&[100.0, 110.0, 99.0]);
        let expected = (0.02_f64).sqrt() * 252.0_f64.sqrt();
        assert_relative_eq!(
            annualized_volatility(&series).unwrap(),
            expected,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_volatility_with_fixed_periods() {
        let series = daily(&[100.0, 110.0, 99.0]);
        let analyzer = Analyzer::new(Annualization::fixed(12.0));
        let expected = (0.02_f64).sqrt() * 12.0_f64.sqrt();
        assert_relative_eq!(
            analyzer.annualized_volatility(&series).unwrap(),
            expected,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_sharpe_ratio() {
        let series = daily(&[100.0, 102.0, 101.0, 104.0, 103.0, 107.0]);
        let returns = series.returns();
        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let var = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let vol = var.sqrt() * 252.0_f64.sqrt();

        let sharpe = sharpe_ratio(&series, 0.05).unwrap().as_f64().unwrap();
        assert_relative_eq!(sharpe, (mean * 252.0 - 0.05) / vol, epsilon = 1e-9);

        let no_rf = sharpe_ratio(&series, 0.0).unwrap().as_f64().unwrap();
        assert!(no_rf > sharpe);
    }

    #[test]
    fn test_constant_growth_has_zero_volatility() {
        // 0.1% a day: returns differ only by rounding
        let values: Vec<f64> = (0..60).map(|i| 100.0 * 1.001_f64.powi(i)).collect();
        let series = daily(&values);

        assert_eq!(
            sharpe_ratio(&series, 0.0).unwrap(),
            MetricValue::Undefined(UndefinedReason::ZeroVolatility)
        );
        assert!(annualized_volatility(&series).unwrap() < 1e-9);
    }

    #[test]
    fn test_overflowing_cagr_is_rejected() {
        let series = daily(&[1.0, 20.0]);
        assert!(cagr(&series).unwrap_err().is_invalid_input());

        let result = Analyzer::default().analyze(&series, 0.0);
        assert_eq!(
            result.get(Metric::Cagr),
            Some(MetricValue::Undefined(UndefinedReason::InsufficientData))
        );

        let json = serde_json::to_string(&result).unwrap();
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_overflowing_returns_are_rejected() {
        let series = daily(&[1e-300, 1e300, 1.0]);
        assert!(annualized_volatility(&series).unwrap_err().is_invalid_input());
        assert!(sharpe_ratio(&series, 0.0).unwrap_err().is_invalid_input());

        let result = Analyzer::default().analyze(&series, 0.0);
        for (_, value) in result.iter() {
            if let MetricValue::Value(v) = value {
                assert!(v.is_finite());
            }
        }
        assert!(serde_json::to_value(&result).is_ok());
    }

    #[test]
    fn test_sharpe_rejects_non_finite_risk_free_rate() {
        let series = daily(&[100.0, 102.0, 101.0, 104.0]);
        assert!(sharpe_ratio(&series, f64::NAN).unwrap_err().is_invalid_input());
        assert!(sharpe_ratio(&series, f64::INFINITY).is_err());
    }

    #[test]
    fn test_sharpe_propagates_invalid_input() {
        let series = daily(&[100.0, 101.0]);
        assert!(sharpe_ratio(&series, 0.0).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_max_drawdown_picks_deepest_trough() {
        let series = yearly(&[100.0, 90.0, 95.0, 80.0, 130.0]);
        assert_eq!(max_drawdown(&series).unwrap(), -0.2);
    }

    #[test]
    fn test_max_drawdown_after_new_peak() {
        let series = daily(&[100.0, 200.0, 150.0, 210.0, 190.0]);
        assert_relative_eq!(max_drawdown(&series).unwrap(), -0.25);
    }

    #[test]
    fn test_increasing_series_has_no_drawdown() {
        let series = daily(&[1.0, 2.0, 3.5, 3.6, 10.0]);
        assert_eq!(max_drawdown(&series).unwrap(), 0.0);
    }

    #[test]
    fn test_single_point_fails_every_metric() {
        let series = daily(&[100.0]);
        assert!(cagr(&series).unwrap_err().is_invalid_input());
        assert!(annualized_volatility(&series).unwrap_err().is_invalid_input());
        assert!(sharpe_ratio(&series, 0.0).unwrap_err().is_invalid_input());
        assert!(max_drawdown(&series).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_two_points_is_too_few_for_volatility() {
        let series = daily(&[100.0, 105.0]);
        assert!(cagr(&series).is_ok());
        assert!(max_drawdown(&series).is_ok());
        assert!(annualized_volatility(&series).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_metrics_are_deterministic() {
        let series = daily(&[100.0, 103.0, 99.5, 101.2, 98.7, 104.4, 106.0]);
        let analyzer = Analyzer::default();

        assert_eq!(
            analyzer.cagr(&series).unwrap().to_bits(),
            analyzer.cagr(&series).unwrap().to_bits()
        );
        assert_eq!(
            analyzer.annualized_volatility(&series).unwrap().to_bits(),
            analyzer.annualized_volatility(&series).unwrap().to_bits()
        );
        assert_eq!(analyzer.analyze(&series, 0.07), analyzer.analyze(&series, 0.07));
    }

    #[test]
    fn test_analyze_maps_short_input_to_undefined() {
        let result = Analyzer::default().analyze(&daily(&[100.0, 90.0]), 0.0);

        assert!(result.is_defined(Metric::Cagr));
        assert_eq!(result.value(Metric::MaxDrawdown), Some(-0.1));
        assert_eq!(
            result.get(Metric::AnnualizedVolatility),
            Some(MetricValue::Undefined(UndefinedReason::InsufficientData))
        );
        assert_eq!(
            result.get(Metric::SharpeRatio),
            Some(MetricValue::Undefined(UndefinedReason::InsufficientData))
        );
    }

    #[test]
    fn test_trailing_cagr() {
        let series = yearly(&[100.0, 50.0, 60.0, 66.0, 72.6]);
        let analyzer = Analyzer::default();

        // last two years: 60 -> 72.6 is 10% a year
        assert_relative_eq!(analyzer.trailing_cagr(&series, 2).unwrap(), 0.10, epsilon = 1e-3);

        // horizon longer than history falls back to the whole series
        assert_eq!(
            analyzer.trailing_cagr(&series, 10).unwrap(),
            analyzer.cagr(&series).unwrap()
        );
    }

    #[test]
    fn test_rolling_returns() {
        let series = yearly(&[100.0, 110.0, 121.0, 60.5]);
        let summary = Analyzer::default().rolling_returns(&series, 1).unwrap();

        assert_eq!(summary.window_years, 1);
        assert_eq!(summary.count, 3);
        assert_relative_eq!(summary.max, 0.10, epsilon = 1e-3);
        assert_relative_eq!(summary.min, -0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_rolling_returns_needs_a_full_window() {
        let series = daily(&[100.0, 101.0, 102.0]);
        let err = Analyzer::default().rolling_returns(&series, 1).unwrap_err();
        assert!(err.is_invalid_input());

        assert!(Analyzer::default().rolling_returns(&series, 0).is_err());
    }
}
