//! Subcommand implementations
//!
//! Each command returns the text to print so it can be exercised without a
//! terminal.

use advisor_agents::root_agent;
use advisor_analysis::{AnalysisConfig, InvestmentReport, InvestmentType, PeriodsPerYear};
use advisor_tools::{CsvSeriesSource, SeriesSource, ToolRegistry, parse_csv};
use advisor_utils::Config;
use anyhow::{Context as _, Result};
use chrono::Local;
use clap::Args;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::output;

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub analysis: AnalysisConfig,
}

impl Context {
    /// Load settings from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            config: Config::from_env()?,
            analysis: AnalysisConfig::default().with_env()?,
        })
    }

    fn registry(&self, data_dir: Option<PathBuf>) -> ToolRegistry {
        let dir = data_dir.unwrap_or_else(|| self.config.data_dir.clone());
        ToolRegistry::with_builtin_tools(Arc::new(CsvSeriesSource::new(dir)), self.analysis)
    }
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// CSV file with a date column and a value/close/nav column
    pub csv: PathBuf,

    /// Annual risk-free rate as a fraction
    #[arg(long, default_value_t = 0.0)]
    pub risk_free_rate: f64,

    /// Fixed periods per year instead of inferring from the dates
    #[arg(long)]
    pub periods_per_year: Option<f64>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Stock symbol (e.g. RELIANCE.NS) or AMFI scheme code
    pub identifier: String,

    /// Investment type: stock or mutual_fund
    #[arg(long = "type", default_value = "stock")]
    pub investment_type: InvestmentType,

    /// Directory holding <identifier>.csv histories
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Override the annual risk-free rate
    #[arg(long)]
    pub risk_free_rate: Option<f64>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CallArgs {
    /// Tool name, e.g. analyze_investment
    pub tool: String,

    /// Tool parameters as a JSON object
    #[arg(long, default_value = "{}")]
    pub params: String,

    /// Directory holding <identifier>.csv histories
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ToolsArgs {
    /// Print JSON definitions instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct AgentsArgs {
    /// Include rendered instructions
    #[arg(long)]
    pub instructions: bool,

    /// Print the profile tree as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn analyze(ctx: &Context, args: AnalyzeArgs) -> Result<String> {
    let text = tokio::fs::read_to_string(&args.csv)
        .await
        .with_context(|| format!("failed to read {}", args.csv.display()))?;
    let series = parse_csv(&text)?;

    let mut config = ctx.analysis;
    config.risk_free_rate = args.risk_free_rate;
    if let Some(periods) = args.periods_per_year {
        config.annualization.periods_per_year = PeriodsPerYear::Fixed(periods);
    }
    config.validate()?;

    let annualization = config.annualization;
    let analyzer = config.analyzer();
    let result = analyzer.analyze(&series, args.risk_free_rate);
    info!(points = series.len(), "Analyzed {}", args.csv.display());

    if args.json {
        let value = json!({
            "data_points": series.len(),
            "start_date": series.first().date,
            "end_date": series.last().date,
            "frequency": annualization.frequency(&series).ok(),
            "periods_per_year": analyzer.periods_per_year(&series).ok(),
            "risk_free_rate": args.risk_free_rate,
            "metrics": result,
        });
        Ok(serde_json::to_string_pretty(&value)?)
    } else {
        Ok(output::metrics_table(&series, &result))
    }
}

pub async fn report(ctx: &Context, args: ReportArgs) -> Result<String> {
    let mut config = ctx.analysis;
    if let Some(rate) = args.risk_free_rate {
        config.risk_free_rate = rate;
        config.validate()?;
    }

    let dir = args.data_dir.unwrap_or_else(|| ctx.config.data_dir.clone());
    let source = CsvSeriesSource::new(dir);
    debug!(dir = %source.dir().display(), "Loading report history");
    let series = source.load(&args.identifier, args.investment_type).await?;
    let report = InvestmentReport::build(&args.identifier, args.investment_type, &series, &config)?;

    if args.json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(output::report_table(&report))
    }
}

pub async fn call(ctx: &Context, args: CallArgs) -> Result<String> {
    let params: Value =
        serde_json::from_str(&args.params).context("--params must be valid JSON")?;
    debug!(tool = %args.tool, "Calling tool from CLI");

    let registry = ctx.registry(args.data_dir);
    let result = registry.dispatch(&args.tool, params).await?;
    Ok(serde_json::to_string_pretty(&result)?)
}

pub fn tools(ctx: &Context, args: &ToolsArgs) -> Result<String> {
    let definitions = ctx.registry(None).definitions();
    if args.json {
        Ok(serde_json::to_string_pretty(&definitions)?)
    } else {
        Ok(output::tools_table(&definitions))
    }
}

pub fn agents(ctx: &Context, args: &AgentsArgs) -> Result<String> {
    let root = root_agent(&ctx.config.model, Local::now().date_naive())?;
    if args.json {
        Ok(serde_json::to_string_pretty(&root)?)
    } else {
        Ok(output::agent_tree(&root, args.instructions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn context(data_dir: PathBuf) -> Context {
        Context {
            config: Config {
                data_dir,
                ..Config::default()
            },
            analysis: AnalysisConfig::default(),
        }
    }

    fn write_history(dir: &std::path::Path, name: &str, points: usize) -> PathBuf {
        let mut text = String::from("date,close\n");
        for i in 0..points {
            let day = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                + chrono::Duration::days(i as i64);
            text.push_str(&format!("{day},{}\n", 100.0 + (i % 4) as f64));
        }
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[tokio::test]
    async fn test_analyze_json() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_history(dir.path(), "prices.csv", 20);
        let ctx = context(dir.path().to_path_buf());

        let out = analyze(
            &ctx,
            AnalyzeArgs {
                csv,
                risk_free_rate: 0.0,
                periods_per_year: None,
                json: true,
            },
        )
        .await
        .unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["data_points"], 20);
        assert_eq!(value["frequency"], "daily");
        assert_eq!(value["periods_per_year"], 252.0);
        assert!(value["metrics"]["sharpe_ratio"]["value"].is_number());
    }

    #[tokio::test]
    async fn test_analyze_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path().to_path_buf());

        let err = analyze(
            &ctx,
            AnalyzeArgs {
                csv: dir.path().join("nope.csv"),
                risk_free_rate: 0.0,
                periods_per_year: None,
                json: false,
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[tokio::test]
    async fn test_analyze_rejects_non_finite_rate() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_history(dir.path(), "prices.csv", 20);
        let ctx = context(dir.path().to_path_buf());

        let err = analyze(
            &ctx,
            AnalyzeArgs {
                csv,
                risk_free_rate: f64::NAN,
                periods_per_year: None,
                json: true,
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("risk_free_rate must be finite"));
    }

    #[tokio::test]
    async fn test_report_table() {
        let dir = tempfile::tempdir().unwrap();
        write_history(dir.path(), "INFY.NS.csv", 15);
        let ctx = context(dir.path().to_path_buf());

        let out = report(
            &ctx,
            ReportArgs {
                identifier: "INFY.NS".to_string(),
                investment_type: InvestmentType::Stock,
                data_dir: None,
                risk_free_rate: Some(0.05),
                json: false,
            },
        )
        .await
        .unwrap();

        assert!(out.starts_with("Stock: INFY.NS\n15 points"));
        assert!(out.contains("risk-free rate 5.00%"));
        assert!(out.contains("Past performance is not indicative"));
    }

    #[tokio::test]
    async fn test_call_dispatches_through_registry() {
        let dir = tempfile::tempdir().unwrap();
        write_history(dir.path(), "119597.csv", 12);
        let ctx = context(dir.path().to_path_buf());

        let out = call(
            &ctx,
            CallArgs {
                tool: "analyze_investment".to_string(),
                params: r#"{"identifier": "119597", "investment_type": "mutual_fund"}"#
                    .to_string(),
                data_dir: None,
            },
        )
        .await
        .unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["label"], "Mutual Fund (scheme code: 119597)");

        let err = call(
            &ctx,
            CallArgs {
                tool: "search_web".to_string(),
                params: "{}".to_string(),
                data_dir: None,
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Unknown tool: search_web"));
    }

    #[test]
    fn test_tools_and_agents() {
        let ctx = context(PathBuf::from("data"));

        let out = tools(&ctx, &ToolsArgs { json: true }).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);

        let out = agents(
            &ctx,
            &AgentsArgs {
                instructions: false,
                json: false,
            },
        )
        .unwrap();
        assert!(out.contains("financial_advisor_agent"));
    }
}
