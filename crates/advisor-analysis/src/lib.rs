//! Risk and return statistics over price and NAV histories
//!
//! This crate computes the figures a financial advisor quotes for a stock or
//! mutual fund:
//!
//! - Compound annual growth rate (whole history and trailing horizons)
//! - Annualized volatility of periodic returns
//! - Sharpe ratio against a configurable risk-free rate
//! - Maximum drawdown from a running peak
//! - Rolling-window return summaries
//!
//! All metrics are pure functions of a validated [`Series`]. Annualization
//! (periods per year, trading days, day-count basis) is explicit through
//! [`Annualization`] and [`AnalysisConfig`]; nothing is read from globals.
//!
//! # Example
//!
//! ```rust
//! use advisor_analysis::{Analyzer, Annualization, Series};
//! use chrono::NaiveDate;
//!
//! let date = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
//! let series = Series::from_pairs([
//!     (date(2020), 100.0),
//!     (date(2021), 110.0),
//!     (date(2022), 105.0),
//!     (date(2023), 120.0),
//! ])?;
//!
//! let analyzer = Analyzer::new(Annualization::fixed(1.0));
//! let cagr = analyzer.cagr(&series)?;
//! assert!((cagr - 0.0627).abs() < 1e-3);
//! # Ok::<(), advisor_analysis::AnalysisError>(())
//! ```

pub mod config;
pub mod error;
pub mod frequency;
pub mod metrics;
pub mod report;
pub mod result;
pub mod series;

pub use config::{AnalysisConfig, AnalysisConfigBuilder};
pub use error::{AnalysisError, Result};
pub use frequency::{Annualization, Frequency, PeriodsPerYear};
pub use metrics::{
    Analyzer, RollingSummary, ZERO_VOLATILITY_TOLERANCE, annualized_volatility, cagr,
    max_drawdown, sharpe_ratio,
};
pub use report::{InvestmentReport, InvestmentType, ReportFigure};
pub use result::{AnalysisResult, Metric, MetricValue, UndefinedReason};
pub use series::{PricePoint, Series};
