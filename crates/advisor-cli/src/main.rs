//! Command-line interface for fin-advisor
//!
//! ```bash
//! # Metrics over a local price history
//! fin-advisor analyze data/TCS.NS.csv --risk-free-rate 0.07
//!
//! # Full report for a mutual fund NAV history in ./data/mutual_fund/119597.csv
//! fin-advisor report 119597 --type mutual_fund
//!
//! # Any tool, as an agent would call it
//! fin-advisor call analyze_investment --params '{"identifier": "RELIANCE.NS"}'
//! ```

use clap::{Parser, Subcommand};
use tracing::info;

mod commands;
mod output;

use commands::{AgentsArgs, AnalyzeArgs, CallArgs, Context, ReportArgs, ToolsArgs};

#[derive(Parser, Debug)]
#[command(name = "fin-advisor")]
#[command(about = "Risk and return analysis for stocks and mutual funds", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute CAGR, volatility, Sharpe ratio and max drawdown for a CSV history
    Analyze(AnalyzeArgs),
    /// Build an investment report for a stock or mutual fund
    Report(ReportArgs),
    /// Call a registered tool with JSON parameters
    Call(CallArgs),
    /// List the tools available to agents
    Tools(ToolsArgs),
    /// Show the agent profile tree
    Agents(AgentsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let ctx = Context::from_env()?;
    advisor_utils::init_tracing_with(ctx.config.log_format);

    let cli = Cli::parse();
    info!(environment = %ctx.config.environment, "Starting {}", ctx.config.app_name);

    let out = match cli.command {
        Commands::Analyze(args) => commands::analyze(&ctx, args).await?,
        Commands::Report(args) => commands::report(&ctx, args).await?,
        Commands::Call(args) => commands::call(&ctx, args).await?,
        Commands::Tools(args) => commands::tools(&ctx, &args)?,
        Commands::Agents(args) => commands::agents(&ctx, &args)?,
    };
    println!("{out}");

    Ok(())
}
