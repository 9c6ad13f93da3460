//! Historical per-capita emissions dataset.
//!
//! The dataset is a CSV file with at least the columns `country`, `year` and
//! `co2_per_capita`; any other columns are ignored. Rows with a missing or
//! unparsable value in one of those columns are dropped.

use crate::error::{ErrorContext, FootprintError, HistoryErrorKind, Result};
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;

const COUNTRY_COLUMN: &str = "country";
const YEAR_COLUMN: &str = "year";
const VALUE_COLUMN: &str = "co2_per_capita";

/// One year of a country's emissions history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub country: String,
    pub year: i32,
    /// Tonnes CO2 per capita
    pub co2_per_capita: f64,
}

/// Emissions history for many countries, sorted by country then year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalDataset {
    records: Vec<HistoryRecord>,
    dropped_rows: usize,
}

impl HistoricalDataset {
    /// Load a dataset from a CSV file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| FootprintError::io(path, e))?;
        Self::from_csv_str(&content)
            .with_context(|| format!("loading {}", path.display()))
    }

    /// Parse a dataset from CSV text.
    ///
    /// Columns are located by header name, case-insensitively. Quoted
    /// fields, CRLF line endings and a leading byte order mark are accepted.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| FootprintError::history("reading header", malformed(&e)))?
            .clone();
        if headers.iter().all(str::is_empty) {
            return Err(FootprintError::history(
                "reading header",
                HistoryErrorKind::Empty,
            ));
        }

        let columns = [
            column_index(&headers, COUNTRY_COLUMN)?,
            column_index(&headers, YEAR_COLUMN)?,
            column_index(&headers, VALUE_COLUMN)?,
        ];
        let canonical = StringRecord::from(vec![COUNTRY_COLUMN, YEAR_COLUMN, VALUE_COLUMN]);

        let mut records = Vec::new();
        let mut dropped_rows = 0;
        for row in reader.records() {
            let row = row.map_err(|e| FootprintError::history("reading rows", malformed(&e)))?;
            let selected: StringRecord = columns
                .iter()
                .map(|&idx| row.get(idx).unwrap_or_default())
                .collect();
            match selected
                .deserialize::<HistoryRecord>(Some(&canonical))
                .ok()
                .and_then(complete)
            {
                Some(record) => records.push(record),
                None => {
                    tracing::trace!(
                        "Dropping incomplete dataset row at line {}",
                        row.position().map_or(0, csv::Position::line)
                    );
                    dropped_rows += 1;
                }
            }
        }

        // Spellings that differ only in case share a group, in year order.
        records.sort_by_cached_key(|r| (r.country.to_ascii_lowercase(), r.year));

        tracing::debug!(
            records = records.len(),
            dropped_rows,
            "Loaded historical dataset"
        );

        Ok(Self {
            records,
            dropped_rows,
        })
    }

    /// All records
    #[must_use]
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Number of rows dropped for missing or unparsable values
    #[must_use]
    pub const fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records for one country, in year order.
    ///
    /// Country names are compared case-insensitively.
    #[must_use]
    pub fn country(&self, name: &str) -> &[HistoryRecord] {
        let name = name.trim();
        let Some(first) = self
            .records
            .iter()
            .position(|r| r.country.eq_ignore_ascii_case(name))
        else {
            return &[];
        };
        let len = self.records[first..]
            .iter()
            .take_while(|r| r.country.eq_ignore_ascii_case(name))
            .count();
        &self.records[first..first + len]
    }

    /// Distinct country names, sorted case-insensitively.
    ///
    /// When a country is spelled with different capitalization, the spelling
    /// of its earliest record is listed.
    #[must_use]
    pub fn countries(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.records.iter().map(|r| r.country.as_str()).collect();
        names.dedup_by(|later, earlier| later.eq_ignore_ascii_case(earlier));
        names
    }
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|c| c.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            FootprintError::history(
                "reading header",
                HistoryErrorKind::MissingColumn(name.to_string()),
            )
        })
}

fn complete(mut record: HistoryRecord) -> Option<HistoryRecord> {
    let country = record.country.trim();
    if country.is_empty() || !record.co2_per_capita.is_finite() {
        return None;
    }
    if country.len() != record.country.len() {
        record.country = country.to_string();
    }
    Some(record)
}

fn malformed(err: &csv::Error) -> HistoryErrorKind {
    HistoryErrorKind::MalformedRow {
        line: err.position().map_or(0, |p| p.line() as usize),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
iso_code,country,year,co2,co2_per_capita
SWE,Sweden,2001,55.1,6.02
SWE,Sweden,2000,54.9,6.10
NOR,Norway,2000,41.0,8.55
NOR,Norway,2001,,
\"X\",\"Bosnia, Herzegovina\",2000,20.0,5.1
";

    #[test]
    fn test_parse_and_sort() {
        let dataset = HistoricalDataset::from_csv_str(SAMPLE).unwrap();
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.dropped_rows(), 1);
        assert_eq!(
            dataset.countries(),
            vec!["Bosnia, Herzegovina", "Norway", "Sweden"]
        );

        let sweden = dataset.country("sweden");
        assert_eq!(sweden.len(), 2);
        assert_eq!(sweden[0].year, 2000);
        assert_eq!(sweden[1].co2_per_capita, 6.02);
    }

    #[test]
    fn test_unknown_country_is_empty() {
        let dataset = HistoricalDataset::from_csv_str(SAMPLE).unwrap();
        assert!(dataset.country("atlantis").is_empty());
    }

    #[test]
    fn test_missing_column() {
        let err = HistoricalDataset::from_csv_str("country,year\nSweden,2000\n").unwrap_err();
        match err {
            FootprintError::History {
                source: HistoryErrorKind::MissingColumn(col),
                ..
            } => assert_eq!(col, "co2_per_capita"),
            other => panic!("Expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        let err = HistoricalDataset::from_csv_str("\n\n").unwrap_err();
        assert!(matches!(
            err,
            FootprintError::History {
                source: HistoryErrorKind::Empty,
                ..
            }
        ));
    }

    #[test]
    fn test_quoted_newlines_bom_and_crlf() {
        let content = "\u{feff}Country,Year,CO2_per_capita\r\n\
\"Bosnia,\r\nHerzegovina\",2000,5.1\r\n\
Sweden,2000,6.1\r\n\
\"Sweden\",2001,\"6.0\"\r\n";
        let dataset = HistoricalDataset::from_csv_str(content).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.dropped_rows(), 0);
        assert_eq!(dataset.records()[0].country, "Bosnia,\r\nHerzegovina");
        assert_eq!(dataset.country("Sweden").len(), 2);
        assert_eq!(dataset.country("Sweden")[1].co2_per_capita, 6.0);
    }

    #[test]
    fn test_mixed_case_spellings_form_one_group() {
        let content = "\
country,year,co2_per_capita
Sweden,2001,6.0
Norway,2000,8.5
SWEDEN,2000,6.1
sweden,2002,5.9
";
        let dataset = HistoricalDataset::from_csv_str(content).unwrap();
        let sweden = dataset.country("Sweden");
        let years: Vec<i32> = sweden.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2000, 2001, 2002]);
        assert_eq!(dataset.countries(), vec!["Norway", "SWEDEN"]);
    }

    #[test]
    fn test_short_and_non_finite_rows_are_dropped() {
        let content = "country,year,co2_per_capita\nSweden,2000\nSweden,2001,NaN\nSweden,2002,5.9\n";
        let dataset = HistoricalDataset::from_csv_str(content).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.dropped_rows(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = HistoricalDataset::load(Path::new("/nonexistent/history.csv")).unwrap_err();
        assert!(matches!(err, FootprintError::Io { .. }));
    }
}
