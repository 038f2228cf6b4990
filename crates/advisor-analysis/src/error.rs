//! Error types for series analysis

use thiserror::Error;

/// Errors produced by series construction and metric computation
///
/// A degenerate but meaningful result (such as a Sharpe ratio over a series
/// with zero volatility) is not an error; see [`crate::MetricValue::Undefined`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The input series is structurally unusable for the requested metric
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AnalysisError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this error reports an invalid input series
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
