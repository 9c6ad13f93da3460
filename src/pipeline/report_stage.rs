//! Report output stage.
//!
//! Renders an assessment in the configured format and writes it to the
//! configured destination.

use crate::config::AppConfig;
use crate::engine::{Assessment, RiskLevel};
use crate::reports::{create_reporter_with_options, ReportConfig, ReportMetadata};
use anyhow::Result;
use std::path::Path;

use super::{should_use_color, write_output, OutputTarget, PipelineError};

/// Output an assessment report to the configured destination.
pub fn output_report(
    config: &AppConfig,
    assessment: &Assessment,
    input_path: Option<&Path>,
) -> Result<(), PipelineError> {
    let output_target = OutputTarget::from_option(config.output.file.clone());
    let use_color = should_use_color(config.output.no_color, &output_target);

    let report_config = ReportConfig {
        metadata: ReportMetadata {
            input_path: input_path.map(|p| p.display().to_string()),
            ..ReportMetadata::new()
        },
        ..ReportConfig::default()
    };

    let render = || -> Result<()> {
        let reporter = create_reporter_with_options(config.output.format, use_color);
        let report = reporter.generate(assessment, &report_config)?;
        write_output(&report, &output_target, config.behavior.quiet)
    };
    render().map_err(|source| PipelineError::ReportFailed { source })
}

/// Whether the assessed risk is above the configured threshold.
#[must_use]
pub fn exceeds_max_risk(risk: RiskLevel, max_risk: Option<RiskLevel>) -> bool {
    max_risk.is_some_and(|max| risk > max)
}
