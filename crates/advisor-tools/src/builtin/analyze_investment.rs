//! Tool producing a risk/return report for a stock or mutual fund

use advisor_analysis::{AnalysisConfig, InvestmentReport, InvestmentType};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use crate::error::{Result, ToolError};
use crate::kind::ToolKind;
use crate::source::SeriesSource;
use crate::tool::{Tool, parse_params};

/// Loads a history from a [`SeriesSource`] and builds an [`InvestmentReport`]
pub struct AnalyzeInvestmentTool {
    source: Arc<dyn SeriesSource>,
    config: AnalysisConfig,
}

#[derive(Debug, Deserialize)]
struct AnalyzeInvestmentParams {
    identifier: String,
    #[serde(default)]
    investment_type: Option<String>,
}

impl AnalyzeInvestmentTool {
    /// Create a new investment analysis tool
    pub fn new(source: Arc<dyn SeriesSource>, config: AnalysisConfig) -> Self {
        Self { source, config }
    }

    async fn report(&self, params: AnalyzeInvestmentParams) -> Result<InvestmentReport> {
        let identifier = params.identifier.trim();
        if identifier.is_empty() {
            return Err(ToolError::InvalidParameters(
                "identifier must not be empty".to_string(),
            ));
        }
        let investment_type = match params.investment_type.as_deref() {
            Some(raw) => raw.parse::<InvestmentType>()?,
            None => InvestmentType::Stock,
        };

        let series = self.source.load(identifier, investment_type).await?;
        let report = InvestmentReport::build(identifier, investment_type, &series, &self.config)?;

        info!(
            identifier,
            investment_type = %investment_type,
            points = report.data_points,
            "Investment report ready"
        );
        Ok(report)
    }
}

#[async_trait]
impl Tool for AnalyzeInvestmentTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: AnalyzeInvestmentParams = parse_params(params)?;
        let report = self.report(params).await?;
        Ok(serde_json::to_value(report)?)
    }

    fn kind(&self) -> ToolKind {
        ToolKind::AnalyzeInvestment
    }

    fn description(&self) -> &'static str {
        "Analyze the historical performance of an Indian stock or mutual fund. \
         Returns CAGR over 1, 3 and 5 years, annualized volatility, Sharpe ratio, \
         maximum drawdown and 1-year rolling returns, with the assumptions used."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "identifier": {
                    "type": "string",
                    "description": "Stock symbol (e.g. 'RELIANCE.NS', 'TCS.NS') or AMFI scheme code (e.g. '119597')"
                },
                "investment_type": {
                    "type": "string",
                    "enum": ["stock", "mutual_fund"],
                    "default": "stock"
                }
            },
            "required": ["identifier"]
        })
    }
}
