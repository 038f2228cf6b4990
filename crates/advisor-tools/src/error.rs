//! Error types for tool dispatch and execution

use advisor_analysis::AnalysisError;
use thiserror::Error;

/// Errors produced while resolving or running a tool
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool kind has this name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The tool kind exists but nothing is registered for it
    #[error("Tool not registered: {0}")]
    NotRegistered(String),

    /// Parameters did not match the tool's input schema
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Analysis rejected the input series
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// The series source could not provide data
    #[error("Data source error: {0}")]
    Source(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_error_is_transparent() {
        let err: ToolError = AnalysisError::InvalidInput("too short".to_string()).into();
        assert_eq!(err.to_string(), "Invalid input: too short");
        assert!(matches!(err, ToolError::Analysis(_)));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ToolError::UnknownTool("search_web".to_string()).to_string(),
            "Unknown tool: search_web"
        );
        assert_eq!(
            ToolError::Source("no data for 'XYZ'".to_string()).to_string(),
            "Data source error: no data for 'XYZ'"
        );
    }
}
