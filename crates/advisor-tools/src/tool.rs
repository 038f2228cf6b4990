//! Tool trait definition

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ToolError};
use crate::kind::ToolKind;

/// Trait for tools that agents can execute
///
/// Each tool declares its [`ToolKind`], a description and a JSON schema for
/// its input. The name defaults to the kind's name so the registry and the
/// LLM always agree on it.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// Tool output as JSON value
    async fn execute(&self, params: Value) -> Result<Value>;

    /// The kind this tool implements
    fn kind(&self) -> ToolKind;

    /// Get the tool's name
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Get the tool's description
    ///
    /// This description helps the LLM understand when to use this tool
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    fn input_schema(&self) -> Value;

    /// Definition sent to the LLM
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Tool definition as advertised to an LLM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Deserialize tool parameters, mapping failures to `InvalidParameters`
pub(crate) fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T> {
    // Tools with no required fields accept a missing payload
    let params = if params.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        params
    };
    serde_json::from_value(params).map_err(|e| ToolError::InvalidParameters(e.to_string()))
}
