//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod assess;
mod batch;
mod countries;
mod trend;

pub use assess::run_assess;
pub use batch::{assess_batch, run_batch, BatchOutcome};
pub use countries::run_countries;
pub use trend::{run_trend, TrendReport};

// Re-export config types used by handlers
pub use crate::config::AppConfig;
