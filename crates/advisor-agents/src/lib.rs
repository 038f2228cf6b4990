//! Agent profiles for fin-advisor
//!
//! Profiles are declarative: name, description, rendered instruction, model
//! and the tools an agent may call. Running the conversation and delegating
//! between agents is left to the hosting LLM framework.
//!
//! ```rust
//! use advisor_agents::root_agent;
//! use advisor_utils::ModelConfig;
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
//! let root = root_agent(&ModelConfig::default(), today)?;
//! assert!(root.find("financial_advisor_agent").is_some());
//! # Ok::<(), advisor_agents::PromptError>(())
//! ```

pub mod error;
pub mod profile;
pub mod prompts;

pub use error::{PromptError, Result};
pub use profile::{AgentProfile, financial_advisor_agent, root_agent};
