//! Agent profiles

use advisor_tools::{ToolDefinition, ToolKind, ToolRegistry};
use advisor_utils::ModelConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::prompts::{FINANCIAL_ADVISOR_INSTRUCTION, ROOT_INSTRUCTION, render};

/// Declarative description of an LLM agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name: String,
    /// Shown to the parent agent when it decides whether to delegate
    pub description: String,
    /// Rendered system instruction
    pub instruction: String,
    pub model: ModelConfig,
    pub tools: Vec<ToolKind>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_agents: Vec<AgentProfile>,
}

impl AgentProfile {
    /// Definitions of this profile's tools that the registry provides
    ///
    /// Tools missing from the registry are skipped.
    pub fn tool_definitions(&self, registry: &ToolRegistry) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .filter_map(|kind| registry.get(*kind))
            .map(|tool| tool.definition())
            .collect()
    }

    /// Find a profile by name in this profile's tree
    pub fn find(&self, name: &str) -> Option<&AgentProfile> {
        if self.name == name {
            return Some(self);
        }
        self.sub_agents.iter().find_map(|agent| agent.find(name))
    }
}

/// Sub-agent answering stock and mutual fund questions
pub fn financial_advisor_agent(model: &ModelConfig, today: NaiveDate) -> Result<AgentProfile> {
    let tools = vec![ToolKind::AnalyzeInvestment, ToolKind::AnalyzeSeries];
    let names: Vec<&str> = tools.iter().map(ToolKind::name).collect();

    Ok(AgentProfile {
        name: "financial_advisor_agent".to_string(),
        description: "A financial advisor specializing in the Indian stock market (NSE/BSE) \
                      and Indian mutual funds (AMFI). Handles investment risk/return analysis \
                      (CAGR, Sharpe ratio, volatility, drawdown). Delegate to this agent for any \
                      query about stocks, mutual funds, investments or portfolios."
            .to_string(),
        instruction: render("financial_advisor", FINANCIAL_ADVISOR_INSTRUCTION, today, &names)?,
        model: model.clone(),
        tools,
        sub_agents: Vec::new(),
    })
}

/// Top-level assistant that delegates financial questions
pub fn root_agent(model: &ModelConfig, today: NaiveDate) -> Result<AgentProfile> {
    Ok(AgentProfile {
        name: "root_agent".to_string(),
        description: "A helpful assistant for user questions. Delegates financial and \
                      investment queries to the financial advisor."
            .to_string(),
        instruction: render("root", ROOT_INSTRUCTION, today, &[])?,
        model: model.clone(),
        tools: vec![ToolKind::GetCurrentTime],
        sub_agents: vec![financial_advisor_agent(model, today)?],
    })
}
