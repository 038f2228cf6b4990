//! Configuration for investment analysis

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::frequency::{Annualization, PeriodsPerYear};
use crate::metrics::Analyzer;

/// Approximate Indian 10-year government bond yield
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.07;

/// Fewest observations an investment report is built from
pub const DEFAULT_MIN_REPORT_POINTS: usize = 10;

/// Configuration for investment reports
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Annual risk-free rate used for the Sharpe ratio (0.07 = 7%)
    pub risk_free_rate: f64,

    /// Annualization convention
    pub annualization: Annualization,

    /// Minimum number of points required before a report is produced
    pub min_report_points: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            annualization: Annualization::default(),
            min_report_points: DEFAULT_MIN_REPORT_POINTS,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Analyzer using this configuration's annualization convention
    pub fn analyzer(&self) -> Analyzer {
        Analyzer::new(self.annualization)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.risk_free_rate.is_finite() {
            return Err(AnalysisError::ConfigError(format!(
                "risk_free_rate must be finite, got {}",
                self.risk_free_rate
            )));
        }

        if self.min_report_points < 2 {
            return Err(AnalysisError::ConfigError(
                "min_report_points must be at least 2".to_string(),
            ));
        }

        self.annualization.validate()
    }

    /// Apply overrides from the process environment
    ///
    /// Reads `ADVISOR_RISK_FREE_RATE`, `ADVISOR_PERIODS_PER_YEAR` and
    /// `ADVISOR_TRADING_DAYS`.
    pub fn with_env(self) -> Result<Self> {
        self.with_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_lookup<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rate) = lookup("ADVISOR_RISK_FREE_RATE") {
            self.risk_free_rate = parse_f64("ADVISOR_RISK_FREE_RATE", &rate)?;
        }
        if let Some(periods) = lookup("ADVISOR_PERIODS_PER_YEAR") {
            self.annualization.periods_per_year = if periods.trim().eq_ignore_ascii_case("infer") {
                PeriodsPerYear::Infer
            } else {
                PeriodsPerYear::Fixed(parse_f64("ADVISOR_PERIODS_PER_YEAR", &periods)?)
            };
        }
        if let Some(days) = lookup("ADVISOR_TRADING_DAYS") {
            self.annualization.trading_days_per_year = parse_f64("ADVISOR_TRADING_DAYS", &days)?;
        }

        self.validate()?;
        Ok(self)
    }
}

fn parse_f64(key: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse()
        .map_err(|e| AnalysisError::ConfigError(format!("{key}={raw:?}: {e}")))
}

/// Builder for AnalysisConfig
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    risk_free_rate: Option<f64>,
    periods_per_year: Option<PeriodsPerYear>,
    trading_days_per_year: Option<f64>,
    days_per_year: Option<f64>,
    min_report_points: Option<usize>,
}

impl AnalysisConfigBuilder {
    /// Set the annual risk-free rate
    pub fn risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = Some(rate);
        self
    }

    /// Use a fixed number of periods per year instead of inferring it
    pub fn periods_per_year(mut self, periods: f64) -> Self {
        self.periods_per_year = Some(PeriodsPerYear::Fixed(periods));
        self
    }

    /// Infer periods per year from the data (the default)
    pub fn infer_periods_per_year(mut self) -> Self {
        self.periods_per_year = Some(PeriodsPerYear::Infer);
        self
    }

    /// Set the periods per year used for daily data
    pub fn trading_days_per_year(mut self, days: f64) -> Self {
        self.trading_days_per_year = Some(days);
        self
    }

    /// Set the calendar day-count basis
    pub fn days_per_year(mut self, days: f64) -> Self {
        self.days_per_year = Some(days);
        self
    }

    /// Set the minimum number of points for a report
    pub fn min_report_points(mut self, points: usize) -> Self {
        self.min_report_points = Some(points);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AnalysisConfig> {
        let defaults = AnalysisConfig::default();
        let annualization = Annualization {
            periods_per_year: self
                .periods_per_year
                .unwrap_or(defaults.annualization.periods_per_year),
            trading_days_per_year: self
                .trading_days_per_year
                .unwrap_or(defaults.annualization.trading_days_per_year),
            days_per_year: self
                .days_per_year
                .unwrap_or(defaults.annualization.days_per_year),
        };

        let config = AnalysisConfig {
            risk_free_rate: self.risk_free_rate.unwrap_or(defaults.risk_free_rate),
            annualization,
            min_report_points: self.min_report_points.unwrap_or(defaults.min_report_points),
        };

        config.validate()?;
        Ok(config)
    }
}
