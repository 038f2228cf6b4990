//! Tool computing metrics over caller-supplied points

use advisor_analysis::{Analyzer, Annualization, PeriodsPerYear, PricePoint, Series};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::Result;
use crate::kind::ToolKind;
use crate::tool::{Tool, parse_params};

/// Runs CAGR, volatility, Sharpe ratio and max drawdown over a series
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyzeSeriesTool {
    annualization: Annualization,
}

#[derive(Debug, Deserialize)]
struct AnalyzeSeriesParams {
    points: Vec<PricePoint>,
    #[serde(default)]
    risk_free_rate: f64,
    #[serde(default)]
    periods_per_year: Option<f64>,
}

impl AnalyzeSeriesTool {
    pub fn new(annualization: Annualization) -> Self {
        Self { annualization }
    }

    fn analyze(&self, params: AnalyzeSeriesParams) -> Result<Value> {
        let series = Series::new(params.points)?;

        let mut annualization = self.annualization;
        if let Some(periods) = params.periods_per_year {
            annualization.periods_per_year = PeriodsPerYear::Fixed(periods);
        }
        annualization.validate()?;

        let analyzer = Analyzer::new(annualization);
        debug!(points = series.len(), "Analyzing series");

        let metrics = analyzer.analyze(&series, params.risk_free_rate);
        Ok(json!({
            "data_points": series.len(),
            "frequency": annualization.frequency(&series).ok(),
            "periods_per_year": analyzer.periods_per_year(&series).ok(),
            "metrics": metrics,
        }))
    }
}

#[async_trait]
impl Tool for AnalyzeSeriesTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: AnalyzeSeriesParams = parse_params(params)?;
        self.analyze(params)
    }

    fn kind(&self) -> ToolKind {
        ToolKind::AnalyzeSeries
    }

    fn description(&self) -> &'static str {
        "Compute CAGR, annualized volatility, Sharpe ratio and maximum drawdown \
         for a list of dated values (prices or NAVs) in ascending date order."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "points": {
                    "type": "array",
                    "description": "Observations in strictly ascending date order",
                    "items": {
                        "type": "object",
                        "properties": {
                            "date": { "type": "string", "format": "date" },
                            "value": { "type": "number", "exclusiveMinimum": 0 }
                        },
                        "required": ["date", "value"]
                    }
                },
                "risk_free_rate": {
                    "type": "number",
                    "description": "Annual risk-free rate as a fraction (0.07 = 7%)",
                    "default": 0
                },
                "periods_per_year": {
                    "type": "number",
                    "description": "Override the number of periods per year inferred from the dates"
                }
            },
            "required": ["points"]
        })
    }
}
