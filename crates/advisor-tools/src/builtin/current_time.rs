//! Tool reporting the local date and time

use async_trait::async_trait;
use chrono::Local;
use serde_json::{Value, json};

use crate::error::Result;
use crate::kind::ToolKind;
use crate::tool::Tool;

/// Format of the `current_time` field
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Returns the current local time
#[derive(Debug, Default, Clone, Copy)]
pub struct CurrentTimeTool;

#[async_trait]
impl Tool for CurrentTimeTool {
    async fn execute(&self, _params: Value) -> Result<Value> {
        Ok(json!({ "current_time": Local::now().format(TIME_FORMAT).to_string() }))
    }

    fn kind(&self) -> ToolKind {
        ToolKind::GetCurrentTime
    }

    fn description(&self) -> &'static str {
        "Get the current local date and time. Use this when the user's question \
         depends on today's date."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }
}
