//! Countries command handler.
//!
//! Lists the reference baselines and carbon prices, including any entries
//! added or replaced by configuration.

use crate::config::AppConfig;
use crate::pipeline::{build_assessor, exit_codes, write_output, OutputTarget};
use crate::reference::CountryEntry;
use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use std::fmt::Write as _;

/// Run the countries command, returning the desired exit code.
pub fn run_countries(config: &AppConfig) -> Result<i32> {
    let assessor = build_assessor(config)?;
    let entries = assessor.reference().entries();
    tracing::debug!("Listing {} reference entries", entries.len());

    let content = match config.output.format {
        ReportFormat::Json => {
            serde_json::to_string_pretty(&entries).context("Failed to serialize countries")?
        }
        ReportFormat::Csv => format_csv(&entries),
        ReportFormat::Summary | ReportFormat::Markdown => format_table(&entries)?,
    };

    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&content, &target, config.behavior.quiet)?;
    Ok(exit_codes::SUCCESS)
}

fn format_table(entries: &[CountryEntry]) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{:<24} {:>14} {:>14}", "Country", "Avg t/capita", "Price USD/t")?;
    for entry in entries {
        writeln!(
            out,
            "{:<24} {:>14} {:>14}",
            entry.country,
            display_value(entry.average),
            display_value(entry.carbon_price)
        )?;
    }
    Ok(out)
}

fn format_csv(entries: &[CountryEntry]) -> String {
    let mut out = String::from("Country,Average,CarbonPrice\n");
    for entry in entries {
        out.push_str(&format!(
            "\"{}\",{},{}\n",
            entry.country.replace('"', "\"\""),
            entry.average.map(|v| v.to_string()).unwrap_or_default(),
            entry.carbon_price.map(|v| v.to_string()).unwrap_or_default()
        ));
    }
    out
}

fn display_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_countries_include_overrides() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("countries.json");
        let config = AppConfig::builder()
            .carbon_price("Freedonia", 75.0)
            .output_format(ReportFormat::Json)
            .output_file(Some(out.clone()))
            .quiet(true)
            .build();

        assert_eq!(run_countries(&config).unwrap(), exit_codes::SUCCESS);

        let entries: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        let entries = entries.as_array().unwrap();
        assert_eq!(entries[0]["country"], "default");
        let freedonia = entries
            .iter()
            .find(|e| e["country"] == "freedonia")
            .unwrap();
        assert_eq!(freedonia["carbon_price"], 75.0);
        assert!(freedonia["average"].is_null());
    }

    #[test]
    fn test_table_marks_missing_values() {
        let entries = vec![CountryEntry {
            country: "freedonia".to_string(),
            average: Some(6.2),
            carbon_price: None,
        }];
        let table = format_table(&entries).unwrap();
        assert!(table.contains("freedonia"));
        assert!(table.contains("6.2"));
        assert!(table.trim_end().ends_with('-'));
    }

    #[test]
    fn test_csv_output() {
        let entries = vec![CountryEntry {
            country: "sweden".to_string(),
            average: Some(3.4),
            carbon_price: Some(130.0),
        }];
        assert_eq!(
            format_csv(&entries),
            "Country,Average,CarbonPrice\n\"sweden\",3.4,130\n"
        );
    }
}
