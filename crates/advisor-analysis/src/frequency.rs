//! Sampling frequency and the annualization convention
//!
//! Volatility and Sharpe ratio scale periodic statistics by the number of
//! periods in a year. That number is either fixed by the caller or inferred
//! from the median spacing between observations. The median keeps daily
//! price data (with weekend and holiday gaps) classified as daily.
//!
//! Returns are always taken between consecutive observations; gaps are not
//! interpolated.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AnalysisError, Result};
use crate::series::Series;

/// Trading days in a year for exchange-traded data
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Calendar day-count basis used to convert spans to years
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Sampling frequency inferred from the spacing of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Annual,
    /// Spacing wider than a year; periods per year is `days_per_year / spacing`
    Irregular { spacing_days: f64 },
}

impl Frequency {
    /// Classify a median spacing (in calendar days)
    pub fn from_spacing_days(days: f64) -> Self {
        match days {
            d if d <= 4.0 => Self::Daily,
            d if d <= 10.0 => Self::Weekly,
            d if d <= 45.0 => Self::Monthly,
            d if d <= 120.0 => Self::Quarterly,
            d if d <= 400.0 => Self::Annual,
            d => Self::Irregular { spacing_days: d },
        }
    }

    /// Periods per year for this frequency under the given convention
    pub fn periods_per_year(&self, annualization: &Annualization) -> f64 {
        match self {
            Self::Daily => annualization.trading_days_per_year,
            Self::Weekly => 52.0,
            Self::Monthly => 12.0,
            Self::Quarterly => 4.0,
            Self::Annual => 1.0,
            Self::Irregular { spacing_days } => annualization.days_per_year / spacing_days,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Quarterly => write!(f, "quarterly"),
            Self::Annual => write!(f, "annual"),
            Self::Irregular { spacing_days } => write!(f, "irregular ({spacing_days} days)"),
        }
    }
}

/// How the number of periods per year is determined
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodsPerYear {
    /// Infer from the median spacing of the series
    #[default]
    Infer,
    /// Use a fixed value regardless of the series
    Fixed(f64),
}

/// Annualization convention shared by all metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Annualization {
    pub periods_per_year: PeriodsPerYear,
    /// Periods per year used for daily data
    pub trading_days_per_year: f64,
    /// Calendar day-count basis for converting spans to years
    pub days_per_year: f64,
}

impl Default for Annualization {
    fn default() -> Self {
        Self {
            periods_per_year: PeriodsPerYear::Infer,
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            days_per_year: DAYS_PER_YEAR,
        }
    }
}

impl Annualization {
    /// Convention with a fixed number of periods per year
    pub fn fixed(periods_per_year: f64) -> Self {
        Self {
            periods_per_year: PeriodsPerYear::Fixed(periods_per_year),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let PeriodsPerYear::Fixed(n) = self.periods_per_year {
            if !n.is_finite() || n <= 0.0 {
                return Err(AnalysisError::ConfigError(format!(
                    "periods_per_year must be positive, got {n}"
                )));
            }
        }
        if !self.trading_days_per_year.is_finite() || self.trading_days_per_year <= 0.0 {
            return Err(AnalysisError::ConfigError(format!(
                "trading_days_per_year must be positive, got {}",
                self.trading_days_per_year
            )));
        }
        if !self.days_per_year.is_finite() || self.days_per_year <= 0.0 {
            return Err(AnalysisError::ConfigError(format!(
                "days_per_year must be positive, got {}",
                self.days_per_year
            )));
        }
        Ok(())
    }

    /// Infer the sampling frequency of a series
    ///
    /// Needs at least two points.
    pub fn frequency(&self, series: &Series) -> Result<Frequency> {
        series
            .median_spacing_days()
            .map(Frequency::from_spacing_days)
            .ok_or_else(|| {
                AnalysisError::invalid(format!(
                    "cannot infer sampling frequency from {} point(s), need at least 2",
                    series.len()
                ))
            })
    }

    /// Resolve the number of periods per year for a series
    pub fn periods_per_year(&self, series: &Series) -> Result<f64> {
        match self.periods_per_year {
            PeriodsPerYear::Fixed(n) => Ok(n),
            PeriodsPerYear::Infer => Ok(self.frequency(series)?.periods_per_year(self)),
        }
    }
}
