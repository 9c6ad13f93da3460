//! Trend command handler.
//!
//! Implements the `trend` subcommand: recent direction of a country's
//! per-capita emissions from the historical dataset, and whether the country
//! has enough history to be forecast.

use crate::config::AppConfig;
use crate::forecast::{
    has_sufficient_history, CountryTrend, HistoricalDataset, MIN_FORECAST_RECORDS,
    MIN_TREND_RECORDS,
};
use crate::pipeline::{exit_codes, write_output, OutputTarget};
use crate::reports::ReportFormat;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Trend and history sufficiency for one country
#[derive(Debug, Serialize)]
pub struct TrendReport {
    pub country: String,
    /// Records available for the country
    pub records: usize,
    /// Records required before a forecast is attempted
    pub required: usize,
    pub sufficient_history: bool,
    /// `None` when there are too few records for trend statistics
    pub trend: Option<CountryTrend>,
}

impl TrendReport {
    /// Build the report for a country from a loaded dataset.
    #[must_use]
    pub fn from_dataset(dataset: &HistoricalDataset, country: &str) -> Self {
        let records = dataset.country(country);
        Self {
            country: records
                .first()
                .map_or_else(|| country.to_string(), |r| r.country.clone()),
            records: records.len(),
            required: MIN_FORECAST_RECORDS,
            sufficient_history: has_sufficient_history(records),
            trend: CountryTrend::analyze(records),
        }
    }
}

/// Run the trend command, returning the desired exit code.
///
/// `dataset` takes precedence over `history.dataset` from the config.
pub fn run_trend(config: &AppConfig, dataset: Option<PathBuf>, country: &str) -> Result<i32> {
    let Some(path) = dataset.or_else(|| config.history.dataset.clone()) else {
        bail!("No historical dataset configured; pass --dataset or set history.dataset");
    };

    let dataset = HistoricalDataset::load(&path)
        .with_context(|| format!("Failed to load dataset {}", path.display()))?;
    if dataset.dropped_rows() > 0 {
        tracing::warn!(
            "Skipped {} malformed rows in {}",
            dataset.dropped_rows(),
            path.display()
        );
    }

    let report = TrendReport::from_dataset(&dataset, country);
    if report.records == 0 {
        bail!(
            "No history for '{country}' in {} ({} countries available)",
            path.display(),
            dataset.countries().len()
        );
    }

    let content = match config.output.format {
        ReportFormat::Json => {
            serde_json::to_string_pretty(&report).context("Failed to serialize trend")?
        }
        _ => format_text(&report, config.history.horizon)?,
    };
    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&content, &target, config.behavior.quiet)?;
    Ok(exit_codes::SUCCESS)
}

fn format_text(report: &TrendReport, horizon: usize) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Country: {}", report.country)?;
    match &report.trend {
        Some(trend) => {
            writeln!(out, "Years: {}-{}", trend.first_year, trend.latest_year)?;
            writeln!(out, "Latest: {:.2} t CO2 per capita", trend.latest)?;
            writeln!(out, "Recent growth: {:+.2}%", trend.recent_growth)?;
            writeln!(out, "Volatility: {:.2}", trend.volatility)?;
            writeln!(out, "Trend risk: {}", trend.risk)?;
        }
        None => {
            writeln!(
                out,
                "Trend: not available ({} records, at least {MIN_TREND_RECORDS} needed)",
                report.records
            )?;
        }
    }
    if report.sufficient_history {
        writeln!(
            out,
            "Forecast: {} records available, ready for a {horizon}-year forecast",
            report.records
        )?;
    } else {
        writeln!(
            out,
            "Forecast: insufficient history ({} of {} records)",
            report.records, report.required
        )?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dataset(years: i32) -> HistoricalDataset {
        let mut csv = String::from("country,year,co2_per_capita\n");
        for i in 0..years {
            csv.push_str(&format!("Sweden,{},{}\n", 2000 + i, 5.0 + f64::from(i) * 0.1));
        }
        HistoricalDataset::from_csv_str(&csv).unwrap()
    }

    #[test]
    fn test_report_insufficient_history() {
        let report = TrendReport::from_dataset(&dataset(8), "sweden");
        assert_eq!(report.country, "Sweden");
        assert_eq!(report.records, 8);
        assert!(!report.sufficient_history);
        assert!(report.trend.is_some());

        let text = format_text(&report, 10).unwrap();
        assert!(text.contains("insufficient history (8 of 20 records)"));
    }

    #[test]
    fn test_report_sufficient_history() {
        let report = TrendReport::from_dataset(&dataset(25), "SWEDEN");
        assert!(report.sufficient_history);
        let text = format_text(&report, 10).unwrap();
        assert!(text.contains("ready for a 10-year forecast"));
    }

    #[test]
    fn test_run_trend_requires_dataset() {
        let config = AppConfig::default();
        assert!(run_trend(&config, None, "sweden").is_err());
    }

    #[test]
    fn test_run_trend_json() {
        let tmp = TempDir::new().unwrap();
        let csv = tmp.path().join("history.csv");
        std::fs::write(
            &csv,
            "country,year,co2_per_capita\nNorway,2018,8.0\nNorway,2019,8.1\nNorway,2020,7.9\n",
        )
        .unwrap();
        let out = tmp.path().join("trend.json");
        let config = AppConfig::builder()
            .output_format(ReportFormat::Json)
            .output_file(Some(out.clone()))
            .quiet(true)
            .build();

        assert_eq!(
            run_trend(&config, Some(csv.clone()), "norway").unwrap(),
            exit_codes::SUCCESS
        );
        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(report["records"], 3);
        assert_eq!(report["sufficient_history"], false);
        assert!(report["trend"].is_null());

        assert!(run_trend(&config, Some(csv), "atlantis").is_err());
    }
}
