//! Batch command handler.
//!
//! Implements the `batch` subcommand: many profiles from one JSON array,
//! assessed in parallel.

use crate::config::AppConfig;
use crate::engine::{Assessment, Assessor};
use crate::pipeline::{
    build_assessor, exceeds_max_risk, exit_codes, read_batch, should_use_color, write_output,
    BatchRecord, OutputTarget,
};
use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// Result for one record of a batch
#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    /// Zero-based position in the input array
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<Assessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOutcome {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.assessment.is_some()
    }
}

/// Assess every record in parallel, keeping input order.
#[must_use]
pub fn assess_batch(assessor: &Assessor, records: Vec<BatchRecord>) -> Vec<BatchOutcome> {
    records
        .into_par_iter()
        .map(|record| {
            match record.input.and_then(|raw| assessor.assess(&raw)) {
                Ok(assessment) => BatchOutcome {
                    index: record.index,
                    assessment: Some(assessment),
                    error: None,
                },
                Err(e) => BatchOutcome {
                    index: record.index,
                    assessment: None,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect()
}

/// Run the batch command, returning the desired exit code.
///
/// Any invalid record makes the command fail with [`exit_codes::ERROR`]
/// unless `skip_invalid` is set, in which case invalid records are reported
/// and left out of the output.
pub fn run_batch(config: &AppConfig, input_path: &Path, skip_invalid: bool) -> Result<i32> {
    let records = read_batch(input_path)?;
    let assessor = build_assessor(config)?;

    let total = records.len();
    let outcomes = assess_batch(&assessor, records);
    let failed: Vec<&BatchOutcome> = outcomes.iter().filter(|o| !o.is_ok()).collect();

    for outcome in &failed {
        tracing::error!(
            "Record {}: {}",
            outcome.index,
            outcome.error.as_deref().unwrap_or_default()
        );
    }
    if !failed.is_empty() && !skip_invalid {
        tracing::error!(
            "{} of {total} records are invalid; use --skip-invalid to assess the rest",
            failed.len()
        );
        return Ok(exit_codes::ERROR);
    }

    if !config.behavior.quiet {
        tracing::info!(
            "Assessed {} of {total} records",
            total - failed.len()
        );
    }

    let target = OutputTarget::from_option(config.output.file.clone());
    let content = match config.output.format {
        ReportFormat::Json => {
            let assessed: Vec<&BatchOutcome> = outcomes.iter().filter(|o| o.is_ok()).collect();
            serde_json::to_string_pretty(&assessed).context("Failed to serialize batch results")?
        }
        _ => format_table(&outcomes, should_use_color(config.output.no_color, &target))?,
    };
    write_output(&content, &target, config.behavior.quiet)?;

    let any_exceeded = outcomes
        .iter()
        .filter_map(|o| o.assessment.as_ref())
        .any(|a| exceeds_max_risk(a.risk, config.behavior.max_risk));
    if any_exceeded {
        return Ok(exit_codes::RISK_EXCEEDED);
    }
    Ok(exit_codes::SUCCESS)
}

fn format_table(outcomes: &[BatchOutcome], use_color: bool) -> Result<String> {
    let (bold, reset) = if use_color {
        ("\x1b[1m", "\x1b[0m")
    } else {
        ("", "")
    };

    let mut out = String::new();
    writeln!(
        out,
        "{bold}{:>5}  {:<16} {:>10} {:>9}  {:<7} {:<12} {:>10}{reset}",
        "#", "Country", "Footprint", "Average", "Risk", "Top", "Cost/year"
    )?;
    for outcome in outcomes {
        let Some(a) = &outcome.assessment else {
            continue;
        };
        let country = if a.country.is_empty() {
            "default"
        } else {
            a.country.as_str()
        };
        writeln!(
            out,
            "{:>5}  {:<16} {:>10.2} {:>9.2}  {:<7} {:<12} {:>10}",
            outcome.index,
            country,
            a.personal_current,
            a.country_avg,
            a.risk.name(),
            a.breakdown.top_category().name(),
            a.cost_analysis.current_annual_cost
        )?;
    }
    Ok(out)
}
