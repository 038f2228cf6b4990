//! Tool registry for managing available tools

use advisor_analysis::AnalysisConfig;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

use crate::builtin::{AnalyzeInvestmentTool, AnalyzeSeriesTool, CurrentTimeTool};
use crate::error::{Result, ToolError};
use crate::kind::ToolKind;
use crate::source::SeriesSource;
use crate::tool::{Tool, ToolDefinition};

/// Registry mapping each [`ToolKind`] to its implementation
pub struct ToolRegistry {
    tools: RwLock<BTreeMap<ToolKind, Arc<dyn Tool>>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self {
            tools: RwLock::new(BTreeMap::new()),
        }
    }
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in tool
    pub fn with_builtin_tools(source: Arc<dyn SeriesSource>, config: AnalysisConfig) -> Self {
        let registry = Self::new();
        registry.register(Arc::new(AnalyzeInvestmentTool::new(source, config)));
        registry.register(Arc::new(AnalyzeSeriesTool::new(config.annualization)));
        registry.register(Arc::new(CurrentTimeTool));
        registry
    }

    /// Register a tool, replacing any tool of the same kind
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = tools.insert(tool.kind(), tool) {
            warn!(tool = previous.name(), "Replaced registered tool");
        }
    }

    /// Get a tool by kind
    pub fn get(&self, kind: ToolKind) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.get(&kind).cloned()
    }

    /// Resolve a tool name and execute it
    pub async fn dispatch(&self, name: &str, params: Value) -> Result<Value> {
        let kind: ToolKind = name.parse()?;
        let tool = self
            .get(kind)
            .ok_or_else(|| ToolError::NotRegistered(name.to_string()))?;

        debug!(tool = name, "Dispatching tool call");
        tool.execute(params).await
    }

    /// Definitions of all registered tools, ordered by kind
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.values().map(|tool| tool.definition()).collect()
    }

    /// Kinds that currently have a registered tool
    pub fn kinds(&self) -> Vec<ToolKind> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.keys().copied().collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.is_empty()
    }
}
