//! Analysis result types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The risk/return statistics computed over a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Cagr,
    AnnualizedVolatility,
    SharpeRatio,
    MaxDrawdown,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Cagr,
        Metric::AnnualizedVolatility,
        Metric::SharpeRatio,
        Metric::MaxDrawdown,
    ];

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cagr => "CAGR",
            Self::AnnualizedVolatility => "Annualized volatility",
            Self::SharpeRatio => "Sharpe ratio",
            Self::MaxDrawdown => "Max drawdown",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a metric has no numeric value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedReason {
    /// The series is too short (or spans no time) for this metric
    InsufficientData,
    /// Volatility is zero, so the Sharpe ratio would divide by zero
    ZeroVolatility,
}

impl fmt::Display for UndefinedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientData => f.write_str("insufficient data"),
            Self::ZeroVolatility => f.write_str("zero volatility"),
        }
    }
}

/// A metric outcome: a number, or a sentinel for a degenerate result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricValue {
    Value(f64),
    Undefined(UndefinedReason),
}

impl MetricValue {
    /// The numeric value, if defined
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Undefined(_) => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v:.4}"),
            Self::Undefined(reason) => write!(f, "undefined ({reason})"),
        }
    }
}

/// Metric name to outcome, produced by a single analysis call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult {
    metrics: BTreeMap<Metric, MetricValue>,
}

impl AnalysisResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, metric: Metric, value: MetricValue) {
        self.metrics.insert(metric, value);
    }

    pub fn with(mut self, metric: Metric, value: MetricValue) -> Self {
        self.insert(metric, value);
        self
    }

    pub fn get(&self, metric: Metric) -> Option<MetricValue> {
        self.metrics.get(&metric).copied()
    }

    /// Numeric value of a metric, `None` when missing or undefined
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.get(metric).and_then(|v| v.as_f64())
    }

    pub fn is_defined(&self, metric: Metric) -> bool {
        self.get(metric).is_some_and(|v| v.is_defined())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, MetricValue)> + '_ {
        self.metrics.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}
