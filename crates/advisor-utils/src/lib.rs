//! Shared utilities for fin-advisor
//!
//! This crate provides common functionality used across the fin-advisor workspace,
//! including logging setup and the process-level configuration that is handed
//! explicitly to whichever component builds the agents.

pub mod config;
pub mod logging;

pub use config::{Config, ConfigError, ModelConfig};
pub use logging::{LogFormat, init_tracing, init_tracing_with};
