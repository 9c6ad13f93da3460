//! Pipeline orchestration for assessment commands.
//!
//! This module provides shared orchestration logic for the
//! read → normalize → assess → report workflow, reducing duplication
//! across CLI command handlers.

mod input;
mod output;
mod report_stage;

pub use input::{build_assessor, parse_input_str, read_batch, read_input, BatchRecord};
pub use output::{should_use_color, write_output, OutputTarget};
pub use report_stage::{exceeds_max_risk, output_report};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse an input file
    #[error("Failed to read input {path}: {source}")]
    InputFailed {
        path: String,
        source: anyhow::Error,
    },

    /// Reference overrides from configuration were rejected
    #[error("Reference data rejected: {source}")]
    ReferenceFailed {
        #[source]
        source: crate::error::FootprintError,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for scripting and CI integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// Assessed risk is above the `--max-risk` threshold
    pub const RISK_EXCEEDED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
