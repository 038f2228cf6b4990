//! Closed set of tools known to the advisor

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ToolError;

/// Identifies a tool independently of its implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Risk/return report for a stock or mutual fund
    AnalyzeInvestment,
    /// Metrics over caller-supplied points
    AnalyzeSeries,
    /// Local date and time
    GetCurrentTime,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [
        ToolKind::AnalyzeInvestment,
        ToolKind::AnalyzeSeries,
        ToolKind::GetCurrentTime,
    ];

    /// Name the LLM uses to call the tool
    pub fn name(&self) -> &'static str {
        match self {
            Self::AnalyzeInvestment => "analyze_investment",
            Self::AnalyzeSeries => "analyze_series",
            Self::GetCurrentTime => "get_current_time",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ToolError::UnknownTool(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.name().parse::<ToolKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "search_web".parse::<ToolKind>().unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(name) if name == "search_web"));
    }

    #[test]
    fn test_serde_matches_name() {
        let json = serde_json::to_value(ToolKind::GetCurrentTime).unwrap();
        assert_eq!(json, serde_json::json!("get_current_time"));
    }
}
