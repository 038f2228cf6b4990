//! Tool management and execution for fin-advisor
//!
//! Tools are the functions an LLM agent may call. Every tool has a
//! [`ToolKind`]; the [`ToolRegistry`] resolves a tool name to its kind before
//! dispatching, so unknown names and unregistered tools are distinct errors.
//!
//! Price and NAV histories enter through the [`SeriesSource`] trait, which
//! keeps data fetching outside of the analysis tools.

pub mod builtin;
pub mod error;
pub mod kind;
pub mod registry;
pub mod source;
pub mod tool;

pub use builtin::{AnalyzeInvestmentTool, AnalyzeSeriesTool, CurrentTimeTool};
pub use error::{Result, ToolError};
pub use kind::ToolKind;
pub use registry::ToolRegistry;
pub use source::{CsvSeriesSource, InMemorySeriesSource, SeriesSource, parse_csv};
pub use tool::{Tool, ToolDefinition};
