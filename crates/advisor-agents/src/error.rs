//! Error types for agent construction

use thiserror::Error;

/// Result type for agent operations
pub type Result<T> = std::result::Result<T, PromptError>;

/// Errors that can occur while rendering agent instructions
#[derive(Error, Debug)]
pub enum PromptError {
    /// Template rendering failed
    #[error("Failed to render template '{name}': {detail}")]
    RenderError { name: String, detail: String },
}
