//! Table and tree rendering for terminal output

use advisor_agents::AgentProfile;
use advisor_analysis::{
    AnalysisResult, InvestmentReport, Metric, MetricValue, ReportFigure, Series,
};
use advisor_tools::ToolDefinition;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Fractions print as percentages, the Sharpe ratio as a plain number
fn format_metric(metric: Metric, value: MetricValue) -> String {
    match (metric, value) {
        (Metric::SharpeRatio, MetricValue::Value(v)) => format!("{v:.2}"),
        (_, MetricValue::Value(v)) => format!("{:.2}%", v * 100.0),
        (_, MetricValue::Undefined(reason)) => format!("undefined ({reason})"),
    }
}

fn percent(figure: &ReportFigure) -> String {
    match figure {
        ReportFigure::Number(v) => format!("{v:.2}%"),
        ReportFigure::Unavailable(reason) => reason.clone(),
    }
}

pub fn metrics_table(series: &Series, result: &AnalysisResult) -> String {
    let mut table = table(vec!["Metric", "Value"]);
    for metric in Metric::ALL {
        let value = result
            .get(metric)
            .map_or_else(|| "-".to_string(), |value| format_metric(metric, value));
        table.add_row(vec![metric.label().to_string(), value]);
    }
    format!(
        "{} points, {} to {}\n{table}",
        series.len(),
        series.first().date,
        series.last().date
    )
}

pub fn report_table(report: &InvestmentReport) -> String {
    let metrics = &report.metrics;
    let mut table = table(vec!["Metric", "Value"]);
    table
        .add_row(vec!["CAGR (1Y)".to_string(), percent(&metrics.cagr_1y_percent)])
        .add_row(vec!["CAGR (3Y)".to_string(), percent(&metrics.cagr_3y_percent)])
        .add_row(vec!["CAGR (5Y)".to_string(), percent(&metrics.cagr_5y_percent)])
        .add_row(vec![
            "Annualized volatility".to_string(),
            percent(&metrics.annualized_volatility_percent),
        ])
        .add_row(vec!["Sharpe ratio".to_string(), metrics.sharpe_ratio.to_string()])
        .add_row(vec![
            "Max drawdown".to_string(),
            percent(&metrics.max_drawdown_percent),
        ]);
    if let Some(rolling) = &metrics.rolling_1y_percent {
        table.add_row(vec![
            format!("Rolling 1Y ({} windows)", rolling.count),
            format!(
                "min {:.2}% / mean {:.2}% / max {:.2}%",
                rolling.min, rolling.mean, rolling.max
            ),
        ]);
    }

    let assumptions = &report.assumptions;
    format!(
        "{}\n{} points, {} to {}, latest {:.2}\n{table}\n\
         Assumptions: risk-free rate {:.2}%, {} data, {} periods per year\n{}",
        report.label,
        report.data_points,
        report.data_start_date,
        report.data_end_date,
        report.latest_value,
        assumptions.risk_free_rate_percent,
        assumptions.frequency,
        assumptions.periods_per_year,
        report.disclaimer
    )
}

pub fn tools_table(definitions: &[ToolDefinition]) -> String {
    let mut table = table(vec!["Tool", "Description"]);
    for definition in definitions {
        table.add_row(vec![definition.name.clone(), definition.description.clone()]);
    }
    table.to_string()
}

/// Indented agent tree, optionally with each rendered instruction
pub fn agent_tree(profile: &AgentProfile, instructions: bool) -> String {
    let mut out = String::new();
    write_agent(&mut out, profile, 0, instructions);
    out
}

fn write_agent(out: &mut String, profile: &AgentProfile, depth: usize, instructions: bool) {
    let indent = "  ".repeat(depth);
    let tools: Vec<&str> = profile.tools.iter().map(|kind| kind.name()).collect();
    out.push_str(&format!(
        "{indent}{} [{}] tools: {}\n",
        profile.name,
        profile.model.name,
        tools.join(", ")
    ));
    if instructions {
        for line in profile.instruction.lines() {
            out.push_str(&format!("{indent}  | {line}\n"));
        }
    }
    for agent in &profile.sub_agents {
        write_agent(out, agent, depth + 1, instructions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_agents::root_agent;
    use advisor_analysis::{Analyzer, UndefinedReason};
    use advisor_utils::ModelConfig;
    use chrono::NaiveDate;

    #[test]
    fn test_format_metric() {
        assert_eq!(format_metric(Metric::Cagr, MetricValue::Value(0.0627)), "6.27%");
        assert_eq!(format_metric(Metric::SharpeRatio, MetricValue::Value(1.234)), "1.23");
        assert_eq!(
            format_metric(
                Metric::SharpeRatio,
                MetricValue::Undefined(UndefinedReason::ZeroVolatility)
            ),
            "undefined (zero volatility)"
        );
    }

    #[test]
    fn test_metrics_table() {
        let date = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
        let series = Series::from_pairs([
            (date(2020), 100.0),
            (date(2021), 90.0),
            (date(2022), 95.0),
        ])
        .unwrap();
        let result = Analyzer::default().analyze(&series, 0.0);

        let text = metrics_table(&series, &result);
        assert!(text.starts_with("3 points, 2020-01-01 to 2022-01-01"));
        assert!(text.contains("Max drawdown"));
        assert!(text.contains("-10.00%"));

        // metrics missing from the result still get a row
        let partial = AnalysisResult::new().with(Metric::Cagr, MetricValue::Value(0.05));
        let text = metrics_table(&series, &partial);
        assert!(text.contains("5.00%"));
        assert!(text.contains("Sharpe ratio"));
    }

    #[test]
    fn test_agent_tree() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let root = root_agent(&ModelConfig::new("ollama_chat/test"), today).unwrap();

        let tree = agent_tree(&root, false);
        let lines: Vec<&str> = tree.lines().collect();
        assert_eq!(lines[0], "root_agent [ollama_chat/test] tools: get_current_time");
        assert!(lines[1].starts_with("  financial_advisor_agent"));

        let verbose = agent_tree(&root, true);
        assert!(verbose.contains("  | Today's date is 2025-06-01."));
    }
}
