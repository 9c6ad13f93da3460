//! Input loading stage.
//!
//! Reads profile records from files (or stdin) and builds the assessor
//! configured with any reference overrides.

use super::PipelineError;
use crate::config::AppConfig;
use crate::engine::Assessor;
use crate::error::FootprintError;
use crate::model::RawInput;
use crate::reference::ReferenceData;
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// One element of a batch file
#[derive(Debug)]
pub struct BatchRecord {
    /// Zero-based position in the input array
    pub index: usize,
    /// The record, or why it could not be read
    pub input: crate::error::Result<RawInput>,
}

/// Read the whole file, or stdin when the path is `-`.
fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read input from stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))
}

/// Parse a single profile from text.
///
/// A document starting with `{` is read as a JSON object, anything else as
/// `key=value` lines.
pub fn parse_input_str(content: &str) -> crate::error::Result<RawInput> {
    if content.trim_start().starts_with('{') {
        let value: serde_json::Value = serde_json::from_str(content)?;
        RawInput::from_json(&value)
    } else {
        RawInput::parse_key_value(content)
    }
}

/// Read a single profile from a file
pub fn read_input(path: &Path) -> Result<RawInput, PipelineError> {
    tracing::info!("Reading input profile: {}", path.display());

    let to_error = |source: anyhow::Error| PipelineError::InputFailed {
        path: path.display().to_string(),
        source,
    };

    let content = read_source(path).map_err(to_error)?;
    let raw = parse_input_str(&content).map_err(|e| to_error(e.into()))?;

    tracing::debug!("Read {} input fields", raw.len());
    Ok(raw)
}

/// Read a JSON array of profiles.
///
/// A malformed document fails as a whole; an element that is not a valid
/// record is returned as an error at its index so the caller can decide
/// whether to skip it.
pub fn read_batch(path: &Path) -> Result<Vec<BatchRecord>, PipelineError> {
    tracing::info!("Reading batch input: {}", path.display());

    let to_error = |source: anyhow::Error| PipelineError::InputFailed {
        path: path.display().to_string(),
        source,
    };

    let content = read_source(path).map_err(to_error)?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .context("Batch input is not valid JSON")
        .map_err(to_error)?;
    let serde_json::Value::Array(items) = value else {
        return Err(to_error(anyhow::anyhow!(
            "Batch input must be a JSON array of objects"
        )));
    };

    let records: Vec<BatchRecord> = items
        .iter()
        .enumerate()
        .map(|(index, item)| BatchRecord {
            index,
            input: RawInput::from_json(item),
        })
        .collect();

    tracing::debug!("Read {} batch records", records.len());
    Ok(records)
}

/// Build an assessor with the configured range policy and reference overrides.
pub fn build_assessor(config: &AppConfig) -> Result<Assessor, PipelineError> {
    let assessor = Assessor::new().with_range_policy(config.input.range_policy);
    if config.reference.is_empty() {
        return Ok(assessor);
    }

    let reference = ReferenceData::builtin()
        .with_overrides(
            &config.reference.carbon_prices,
            &config.reference.country_averages,
        )
        .map_err(|source: FootprintError| PipelineError::ReferenceFailed { source })?;
    tracing::debug!(
        "Applied {} carbon price and {} country average overrides",
        config.reference.carbon_prices.len(),
        config.reference.country_averages.len()
    );
    Ok(assessor.with_reference(Arc::new(reference)))
}
