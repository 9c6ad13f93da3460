//! Country reference data: carbon prices and per-capita emission baselines.
//!
//! The tables are read-only, process-wide data. The built-in tables are
//! constructed once on first use and shared through an [`Arc`]; callers that
//! need extra or overriding entries (from configuration) derive a new
//! validated [`ReferenceData`] at startup with [`ReferenceData::with_overrides`].
//!
//! Lookups never fail: a country missing from a table resolves to that
//! table's `"default"` entry.

mod tables;

use crate::error::{FootprintError, Result};
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::{Arc, LazyLock};

/// Key of the fallback entry present in every table
pub const DEFAULT_KEY: &str = "default";

/// Minimum Jaro-Winkler similarity for a country suggestion
const SUGGESTION_THRESHOLD: f64 = 0.85;

const CARBON_PRICE_TABLE: &str = "carbon price";
const COUNTRY_AVERAGE_TABLE: &str = "country average";

static BUILTIN: LazyLock<Arc<ReferenceData>> = LazyLock::new(|| {
    Arc::new(
        ReferenceData::new(
            tables::CARBON_PRICES
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect(),
            tables::COUNTRY_AVERAGES
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect(),
        )
        .expect("built-in reference tables are valid"),
    )
});

/// Result of a table lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lookup {
    /// Resolved value
    pub value: f64,
    /// Whether the country had its own entry (false means `"default"` was used)
    pub matched: bool,
}

/// One row of the merged country listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryEntry {
    pub country: String,
    /// Tonnes CO2 per capita, when the country has a baseline entry
    pub average: Option<f64>,
    /// USD per tonne, when the country has a price entry
    pub carbon_price: Option<f64>,
}

/// Validated carbon price and country average tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    carbon_prices: IndexMap<String, f64>,
    country_averages: IndexMap<String, f64>,
}

impl ReferenceData {
    /// Build reference data from two tables, validating their invariants.
    pub fn new(
        carbon_prices: IndexMap<String, f64>,
        country_averages: IndexMap<String, f64>,
    ) -> Result<Self> {
        let data = Self {
            carbon_prices,
            country_averages,
        };
        data.validate()?;
        Ok(data)
    }

    /// Shared handle to the built-in tables
    #[must_use]
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Derive new reference data with extra or replacement entries.
    ///
    /// Override keys are trimmed and lowercased before insertion.
    pub fn with_overrides(
        &self,
        carbon_prices: &IndexMap<String, f64>,
        country_averages: &IndexMap<String, f64>,
    ) -> Result<Self> {
        let mut merged = self.clone();
        for (country, price) in carbon_prices {
            merged
                .carbon_prices
                .insert(normalize_key(country), *price);
        }
        for (country, average) in country_averages {
            merged
                .country_averages
                .insert(normalize_key(country), *average);
        }
        merged.validate()?;
        Ok(merged)
    }

    /// Check that both tables carry a default and only positive finite values.
    pub fn validate(&self) -> Result<()> {
        validate_table(CARBON_PRICE_TABLE, &self.carbon_prices)?;
        validate_table(COUNTRY_AVERAGE_TABLE, &self.country_averages)
    }

    /// Carbon price (USD/tonne) for a country, falling back to the default.
    #[must_use]
    pub fn carbon_price(&self, country: &str) -> Lookup {
        lookup(&self.carbon_prices, country)
    }

    /// Average emissions (tonnes/capita/year) for a country, falling back to the default.
    #[must_use]
    pub fn country_average(&self, country: &str) -> Lookup {
        lookup(&self.country_averages, country)
    }

    /// Closest known country name, for "did you mean" hints.
    #[must_use]
    pub fn suggest(&self, country: &str) -> Option<&str> {
        if country.is_empty() {
            return None;
        }
        self.country_averages
            .keys()
            .chain(self.carbon_prices.keys())
            .filter(|k| k.as_str() != DEFAULT_KEY)
            .map(|k| (k.as_str(), strsim::jaro_winkler(country, k)))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(k, _)| k)
    }

    /// Every country with an entry in either table, sorted by name.
    ///
    /// The `"default"` entry is listed first.
    #[must_use]
    pub fn entries(&self) -> Vec<CountryEntry> {
        let mut names: Vec<&str> = self
            .country_averages
            .keys()
            .chain(self.carbon_prices.keys())
            .map(String::as_str)
            .filter(|k| *k != DEFAULT_KEY)
            .collect();
        names.sort_unstable();
        names.dedup();

        std::iter::once(DEFAULT_KEY)
            .chain(names)
            .map(|name| CountryEntry {
                country: name.to_string(),
                average: self.country_averages.get(name).copied(),
                carbon_price: self.carbon_prices.get(name).copied(),
            })
            .collect()
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        (*BUILTIN).as_ref().clone()
    }
}

fn normalize_key(country: &str) -> String {
    country.trim().to_lowercase()
}

fn lookup(table: &IndexMap<String, f64>, country: &str) -> Lookup {
    match table.get(country) {
        Some(value) if country != DEFAULT_KEY => Lookup {
            value: *value,
            matched: true,
        },
        _ => Lookup {
            // validate() guarantees the default entry
            value: table.get(DEFAULT_KEY).copied().unwrap_or_default(),
            matched: false,
        },
    }
}

fn validate_table(name: &str, table: &IndexMap<String, f64>) -> Result<()> {
    if !table.contains_key(DEFAULT_KEY) {
        return Err(FootprintError::invalid_reference(
            name,
            DEFAULT_KEY,
            "missing required default entry",
        ));
    }
    for (key, value) in table {
        if !value.is_finite() || *value <= 0.0 {
            return Err(FootprintError::invalid_reference(
                name,
                key.as_str(),
                format!("value must be a positive number, got {value}"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_valid() {
        let data = ReferenceData::builtin();
        assert!(data.validate().is_ok());
        assert_eq!(data.carbon_price(DEFAULT_KEY).value, 50.0);
        assert_eq!(data.country_average(DEFAULT_KEY).value, 4.5);
    }

    #[test]
    fn test_known_country_lookup() {
        let data = ReferenceData::builtin();
        let price = data.carbon_price("sweden");
        assert_eq!(price.value, 130.0);
        assert!(price.matched);
        assert_eq!(data.country_average("sweden").value, 3.4);
    }

    #[test]
    fn test_unmatched_country_falls_back() {
        let data = ReferenceData::builtin();
        let avg = data.country_average("atlantis");
        assert_eq!(avg.value, 4.5);
        assert!(!avg.matched);
        assert_eq!(data.carbon_price("atlantis").value, 50.0);
        assert_eq!(data.carbon_price("").value, 50.0);
    }

    #[test]
    fn test_tables_fall_back_independently() {
        // Baseline entry but no price entry
        let data = ReferenceData::builtin();
        assert!(data.country_average("saudi arabia").matched);
        let price = data.carbon_price("saudi arabia");
        assert!(!price.matched);
        assert_eq!(price.value, 50.0);
    }

    #[test]
    fn test_default_key_is_not_a_match() {
        let data = ReferenceData::builtin();
        assert!(!data.country_average(DEFAULT_KEY).matched);
        assert!(!data.carbon_price(DEFAULT_KEY).matched);
    }

    #[test]
    fn test_missing_default_is_rejected() {
        let mut prices = IndexMap::new();
        prices.insert("sweden".to_string(), 130.0);
        let mut averages = IndexMap::new();
        averages.insert(DEFAULT_KEY.to_string(), 4.5);

        let err = ReferenceData::new(prices, averages).unwrap_err();
        assert!(matches!(err, FootprintError::InvalidReferenceData { .. }));
    }

    #[test]
    fn test_non_positive_price_is_rejected() {
        let data = ReferenceData::builtin();
        let mut prices = IndexMap::new();
        prices.insert("Freedonia".to_string(), 0.0);
        let err = data.with_overrides(&prices, &IndexMap::new()).unwrap_err();
        match err {
            FootprintError::InvalidReferenceData { key, .. } => assert_eq!(key, "freedonia"),
            other => panic!("Expected InvalidReferenceData, got {other:?}"),
        }
    }

    #[test]
    fn test_overrides_are_normalized_and_applied() {
        let data = ReferenceData::builtin();
        let mut averages = IndexMap::new();
        averages.insert("  Sweden ".to_string(), 4.0);
        averages.insert("Freedonia".to_string(), 2.2);
        let merged = data.with_overrides(&IndexMap::new(), &averages).unwrap();

        assert_eq!(merged.country_average("sweden").value, 4.0);
        assert_eq!(merged.country_average("freedonia").value, 2.2);
        // The shared built-in tables are untouched
        assert_eq!(data.country_average("sweden").value, 3.4);
    }

    #[test]
    fn test_suggest_close_match() {
        let data = ReferenceData::builtin();
        assert_eq!(data.suggest("swedn"), Some("sweden"));
        assert_eq!(data.suggest("qqqq"), None);
        assert_eq!(data.suggest(""), None);
    }

    #[test]
    fn test_entries_include_union_of_tables() {
        let data = ReferenceData::builtin();
        let entries = data.entries();
        assert_eq!(entries[0].country, DEFAULT_KEY);

        let sweden = entries.iter().find(|e| e.country == "sweden").unwrap();
        assert_eq!(sweden.average, Some(3.4));
        assert_eq!(sweden.carbon_price, Some(130.0));

        let saudi = entries.iter().find(|e| e.country == "saudi arabia").unwrap();
        assert_eq!(saudi.carbon_price, None);

        let names: Vec<_> = entries.iter().skip(1).map(|e| e.country.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}
