//! Investment reports for stocks and mutual funds
//!
//! A report bundles multi-horizon CAGR, volatility, Sharpe ratio, max
//! drawdown and rolling returns for one instrument, expressed in percent and
//! rounded to two decimals for presentation by the conversational layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::frequency::Frequency;
use crate::metrics::RollingSummary;
use crate::result::{MetricValue, UndefinedReason};
use crate::series::Series;

/// Text shown in place of a figure that could not be computed
pub const INSUFFICIENT_DATA: &str = "Insufficient data";

/// Appended to every report
pub const DISCLAIMER: &str = "Past performance is not indicative of future results. \
                              This is for informational purposes only.";

/// Kind of instrument being analyzed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentType {
    /// NSE/BSE equity, identified by ticker (e.g. `RELIANCE.NS`)
    #[default]
    Stock,
    /// Mutual fund, identified by AMFI scheme code (e.g. `119597`)
    MutualFund,
}

impl InvestmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::MutualFund => "mutual_fund",
        }
    }

    /// Display label for an identifier of this type
    pub fn label(&self, identifier: &str) -> String {
        match self {
            Self::Stock => format!("Stock: {identifier}"),
            Self::MutualFund => format!("Mutual Fund (scheme code: {identifier})"),
        }
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentType {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "stock" | "equity" => Ok(Self::Stock),
            "mutual_fund" | "mutual-fund" | "mf" => Ok(Self::MutualFund),
            other => Err(AnalysisError::invalid(format!(
                "Invalid investment_type '{other}'. Use 'stock' or 'mutual_fund'."
            ))),
        }
    }
}

/// A presentable figure: a rounded number, or a reason it is missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportFigure {
    Number(f64),
    Unavailable(String),
}

impl ReportFigure {
    fn insufficient() -> Self {
        Self::Unavailable(INSUFFICIENT_DATA.to_string())
    }

    /// A fraction expressed in percent, or "Insufficient data"
    fn percent(result: Result<f64>) -> Self {
        match result {
            Ok(v) => Self::Number(round2(v * 100.0)),
            Err(_) => Self::insufficient(),
        }
    }

    fn ratio(result: Result<MetricValue>) -> Self {
        match result {
            Ok(MetricValue::Value(v)) => Self::Number(round2(v)),
            Ok(MetricValue::Undefined(UndefinedReason::ZeroVolatility)) => {
                Self::Unavailable("Undefined (zero volatility)".to_string())
            }
            Ok(MetricValue::Undefined(UndefinedReason::InsufficientData)) | Err(_) => {
                Self::insufficient()
            }
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Unavailable(_) => None,
        }
    }
}

impl fmt::Display for ReportFigure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v:.2}"),
            Self::Unavailable(reason) => f.write_str(reason),
        }
    }
}

/// Risk and return figures of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetrics {
    pub cagr_1y_percent: ReportFigure,
    pub cagr_3y_percent: ReportFigure,
    pub cagr_5y_percent: ReportFigure,
    pub annualized_volatility_percent: ReportFigure,
    pub sharpe_ratio: ReportFigure,
    pub max_drawdown_percent: ReportFigure,
    /// Distribution of 1-year rolling returns, in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolling_1y_percent: Option<RollingSummary>,
}

/// Conventions the figures were computed under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    pub risk_free_rate_percent: f64,
    pub periods_per_year: f64,
    pub frequency: Frequency,
}

/// Risk/return report for one instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentReport {
    pub identifier: String,
    pub investment_type: InvestmentType,
    pub label: String,
    pub data_points: usize,
    pub data_start_date: NaiveDate,
    pub data_end_date: NaiveDate,
    pub latest_value: f64,
    pub metrics: ReportMetrics,
    pub assumptions: Assumptions,
    pub disclaimer: String,
}

impl InvestmentReport {
    /// Build a report from a price or NAV history
    ///
    /// Fails with `InvalidInput` when the history has fewer than
    /// `config.min_report_points` observations.
    pub fn build(
        identifier: impl Into<String>,
        investment_type: InvestmentType,
        series: &Series,
        config: &AnalysisConfig,
    ) -> Result<Self> {
        let identifier = identifier.into();
        if series.len() < config.min_report_points {
            return Err(AnalysisError::invalid(format!(
                "Insufficient historical data for '{identifier}' ({} points, need {}). \
                 Verify the identifier and try again.",
                series.len(),
                config.min_report_points
            )));
        }

        debug!(
            identifier = %identifier,
            investment_type = %investment_type,
            points = series.len(),
            "Building investment report"
        );

        let analyzer = config.analyzer();
        let frequency = analyzer.annualization().frequency(series)?;
        let periods_per_year = analyzer.periods_per_year(series)?;

        let metrics = ReportMetrics {
            cagr_1y_percent: ReportFigure::percent(analyzer.trailing_cagr(series, 1)),
            cagr_3y_percent: ReportFigure::percent(analyzer.trailing_cagr(series, 3)),
            cagr_5y_percent: ReportFigure::percent(analyzer.trailing_cagr(series, 5)),
            annualized_volatility_percent: ReportFigure::percent(
                analyzer.annualized_volatility(series),
            ),
            sharpe_ratio: ReportFigure::ratio(analyzer.sharpe_ratio(series, config.risk_free_rate)),
            max_drawdown_percent: ReportFigure::percent(analyzer.max_drawdown(series)),
            rolling_1y_percent: analyzer.rolling_returns(series, 1).ok().map(as_percent),
        };

        Ok(Self {
            label: investment_type.label(&identifier),
            identifier,
            investment_type,
            data_points: series.len(),
            data_start_date: series.first().date,
            data_end_date: series.last().date,
            latest_value: round2(series.last().value),
            metrics,
            assumptions: Assumptions {
                risk_free_rate_percent: round2(config.risk_free_rate * 100.0),
                periods_per_year: round2(periods_per_year),
                frequency,
            },
            disclaimer: DISCLAIMER.to_string(),
        })
    }
}

fn as_percent(summary: RollingSummary) -> RollingSummary {
    RollingSummary {
        min: round2(summary.min * 100.0),
        max: round2(summary.max * 100.0),
        mean: round2(summary.mean * 100.0),
        ..summary
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
