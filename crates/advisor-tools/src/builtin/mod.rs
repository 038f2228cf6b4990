//! Built-in advisor tools

pub mod analyze_investment;
pub mod analyze_series;
pub mod current_time;

pub use analyze_investment::AnalyzeInvestmentTool;
pub use analyze_series::AnalyzeSeriesTool;
pub use current_time::CurrentTimeTool;
