//! Assess command handler.
//!
//! Implements the `assess` subcommand for a single lifestyle profile.

use crate::config::AppConfig;
use crate::model::RawInput;
use crate::pipeline::{build_assessor, exceeds_max_risk, exit_codes, output_report, read_input};
use anyhow::Result;
use std::path::PathBuf;

/// Run the assess command, returning the desired exit code.
///
/// Fields from `overrides` (the command-line flags) replace the same fields
/// read from `input_path`.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_assess(
    config: &AppConfig,
    input_path: Option<PathBuf>,
    overrides: &RawInput,
) -> Result<i32> {
    let mut raw = match &input_path {
        Some(path) => read_input(path)?,
        None => RawInput::new(),
    };
    raw.extend_from(overrides);

    let assessor = build_assessor(config)?;
    let assessment = assessor.assess(&raw)?;

    if !config.behavior.quiet {
        tracing::info!(
            "Assessed footprint: {:.2} t CO2/year ({} risk)",
            assessment.personal_current,
            assessment.risk
        );
    }

    output_report(config, &assessment, input_path.as_deref())?;

    if exceeds_max_risk(assessment.risk, config.behavior.max_risk) {
        if !config.behavior.quiet {
            tracing::warn!(
                "Risk {} is above the allowed maximum {}",
                assessment.risk,
                config.behavior.max_risk.map_or("", |r| r.name())
            );
        }
        return Ok(exit_codes::RISK_EXCEEDED);
    }
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RiskLevel;
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    fn json_config(dir: &TempDir) -> (AppConfig, PathBuf) {
        let out = dir.path().join("report.json");
        let config = AppConfig::builder()
            .output_format(ReportFormat::Json)
            .output_file(Some(out.clone()))
            .quiet(true)
            .build();
        (config, out)
    }

    #[test]
    fn test_flags_override_input_file() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("profile.txt");
        std::fs::write(&input, "country=sweden\ndistance=100\n").unwrap();
        let (config, out) = json_config(&tmp);

        let overrides = RawInput::new().with("distance", "20");
        let code = run_assess(&config, Some(input), &overrides).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(report["breakdown"]["Transport"], 0.88);
        assert_eq!(report["country"], "sweden");
    }

    #[test]
    fn test_max_risk_exit_code() {
        let tmp = TempDir::new().unwrap();
        let (mut config, _) = json_config(&tmp);
        config.behavior.max_risk = Some(RiskLevel::Medium);

        let raw = RawInput::new()
            .with("country", "sweden")
            .with("distance", "20")
            .with("electricity", "300")
            .with("waste", "10");
        assert_eq!(
            run_assess(&config, None, &raw).unwrap(),
            exit_codes::RISK_EXCEEDED
        );
    }

    #[test]
    fn test_invalid_input_is_error() {
        let tmp = TempDir::new().unwrap();
        let (config, _) = json_config(&tmp);
        let raw = RawInput::new().with("distance", "far");
        assert!(run_assess(&config, None, &raw).is_err());
    }
}
