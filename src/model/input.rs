//! Raw input records and the normalized input profile.
//!
//! A [`RawInput`] is the flat string-keyed record handed over by whatever
//! front end collected the answers (a form, a file, CLI flags). The
//! [`InputProfile`] is its typed, defaulted and range-checked form.

use crate::error::{FootprintError, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Recognized input field names
pub mod fields {
    pub const COUNTRY: &str = "country";
    pub const DISTANCE: &str = "distance";
    pub const ELECTRICITY: &str = "electricity";
    pub const MEALS: &str = "meals";
    pub const WASTE: &str = "waste";
    pub const RENEWABLE: &str = "renewable";
    pub const REDUCTION: &str = "reduction";

    /// All recognized fields, in canonical order
    pub const ALL: [&str; 7] = [
        COUNTRY,
        DISTANCE,
        ELECTRICITY,
        MEALS,
        WASTE,
        RENEWABLE,
        REDUCTION,
    ];
}

/// Default meals per day when the field is absent
pub const DEFAULT_MEALS: f64 = 3.0;
/// Default reduction target (percent) when the field is absent
pub const DEFAULT_REDUCTION: f64 = 10.0;
/// Largest accepted distance, electricity, meals or waste figure.
///
/// Keeps every derived emission and cost figure finite and within whole
/// currency range.
pub const MAX_QUANTITY: f64 = 1.0e9;

/// What to do with a percentage outside `[0, 100]`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    /// Fail with an input error
    #[default]
    Reject,
    /// Clamp into range and log a warning
    Clamp,
}

/// Flat string-keyed input record.
///
/// Keys are trimmed and lowercased on insertion. Values are kept verbatim
/// until normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInput {
    values: IndexMap<String, String>,
}

impl RawInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a field value
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.values
            .insert(key.as_ref().trim().to_lowercase(), value.into());
    }

    /// Look up a field value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Copy every field of `other` into this record, replacing existing values.
    pub fn extend_from(&mut self, other: &Self) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Fields that are not part of the recognized input set
    pub fn unknown_fields(&self) -> impl Iterator<Item = &str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|k| !fields::ALL.contains(k))
    }

    /// Parse `key=value` lines.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn parse_key_value(text: &str) -> Result<Self> {
        let mut raw = Self::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(FootprintError::validation(format!(
                    "line {}: expected key=value, got {line:?}",
                    idx + 1
                )));
            };
            raw.insert(key, value.trim());
        }
        Ok(raw)
    }

    /// Build a record from a JSON object.
    ///
    /// Strings are taken verbatim, numbers and booleans are rendered to
    /// text, and `null` marks the field as unset.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let Some(object) = value.as_object() else {
            return Err(FootprintError::validation(
                "input record must be a JSON object",
            ));
        };
        let mut raw = Self::new();
        for (key, value) in object {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => raw.insert(key, s.clone()),
                serde_json::Value::Number(n) => raw.insert(key, n.to_string()),
                serde_json::Value::Bool(b) => raw.insert(key, b.to_string()),
                other => {
                    return Err(FootprintError::invalid_input(
                        key.as_str(),
                        other.to_string(),
                        "expected a string or number",
                    ));
                }
            }
        }
        Ok(raw)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut raw = Self::new();
        for (k, v) in iter {
            raw.insert(k, v);
        }
        raw
    }
}

/// Normalized lifestyle inputs for a single assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputProfile {
    /// Lowercase, trimmed country key
    pub country: String,
    /// Commute distance, km/day
    pub distance: f64,
    /// Electricity use, kWh/month
    pub electricity: f64,
    /// Meals per day
    pub meals: f64,
    /// Waste, kg/week
    pub waste: f64,
    /// Share of electricity from renewables, percent
    pub renewable: f64,
    /// Target reduction, percent
    pub reduction: f64,
}

impl Default for InputProfile {
    fn default() -> Self {
        Self {
            country: String::new(),
            distance: 0.0,
            electricity: 0.0,
            meals: DEFAULT_MEALS,
            waste: 0.0,
            renewable: 0.0,
            reduction: DEFAULT_REDUCTION,
        }
    }
}

impl InputProfile {
    /// Normalize a raw record.
    ///
    /// Missing or blank fields take their defaults. Any provided value that
    /// is not a finite number fails with [`FootprintError::InvalidInput`],
    /// as does a quantity that is negative or above [`MAX_QUANTITY`]. Percentages outside `[0, 100]` are
    /// handled according to `policy`.
    pub fn from_raw(raw: &RawInput, policy: RangePolicy) -> Result<Self> {
        for field in raw.unknown_fields() {
            tracing::debug!("Ignoring unrecognized input field '{field}'");
        }

        let country = raw
            .get(fields::COUNTRY)
            .map(|c| c.trim().to_lowercase())
            .unwrap_or_default();

        let profile = Self {
            country,
            distance: parse_quantity(raw, fields::DISTANCE, 0.0)?,
            electricity: parse_quantity(raw, fields::ELECTRICITY, 0.0)?,
            meals: parse_quantity(raw, fields::MEALS, DEFAULT_MEALS)?,
            waste: parse_quantity(raw, fields::WASTE, 0.0)?,
            renewable: parse_percentage(raw, fields::RENEWABLE, 0.0, policy)?,
            reduction: parse_percentage(raw, fields::REDUCTION, DEFAULT_REDUCTION, policy)?,
        };

        tracing::debug!(?profile, "Normalized input profile");
        Ok(profile)
    }
}

/// Parse a field as a finite number, falling back to `default` when unset.
fn parse_number(raw: &RawInput, field: &str, default: f64) -> Result<f64> {
    let text = match raw.get(field).map(str::trim) {
        None | Some("") => return Ok(default),
        Some(text) => text,
    };

    let value: f64 = text
        .parse()
        .map_err(|_| FootprintError::invalid_input(field, text, "not a number"))?;

    if !value.is_finite() {
        return Err(FootprintError::invalid_input(
            field,
            text,
            "must be a finite number",
        ));
    }
    Ok(value)
}

fn parse_quantity(raw: &RawInput, field: &str, default: f64) -> Result<f64> {
    let value = parse_number(raw, field, default)?;
    if value < 0.0 {
        return Err(FootprintError::invalid_input(
            field,
            value.to_string(),
            "must not be negative",
        ));
    }
    if value > MAX_QUANTITY {
        return Err(FootprintError::invalid_input(
            field,
            value.to_string(),
            format!("must not exceed {MAX_QUANTITY}"),
        ));
    }
    Ok(value)
}

fn parse_percentage(raw: &RawInput, field: &str, default: f64, policy: RangePolicy) -> Result<f64> {
    let value = parse_number(raw, field, default)?;
    if (0.0..=100.0).contains(&value) {
        return Ok(value);
    }
    match policy {
        RangePolicy::Reject => Err(FootprintError::invalid_input(
            field,
            value.to_string(),
            "must be between 0 and 100",
        )),
        RangePolicy::Clamp => {
            let clamped = value.clamp(0.0, 100.0);
            tracing::warn!("Clamped {field} from {value} to {clamped}");
            Ok(clamped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let profile = InputProfile::from_raw(&RawInput::new(), RangePolicy::Reject).unwrap();
        assert_eq!(profile, InputProfile::default());
        assert_eq!(profile.meals, 3.0);
        assert_eq!(profile.reduction, 10.0);
    }

    #[test]
    fn test_blank_value_is_treated_as_missing() {
        let raw = RawInput::new().with("meals", "  ").with("distance", "");
        let profile = InputProfile::from_raw(&raw, RangePolicy::Reject).unwrap();
        assert_eq!(profile.meals, 3.0);
        assert_eq!(profile.distance, 0.0);
    }

    #[test]
    fn test_country_is_trimmed_and_lowercased() {
        let raw = RawInput::new().with("country", "  United Kingdom ");
        let profile = InputProfile::from_raw(&raw, RangePolicy::Reject).unwrap();
        assert_eq!(profile.country, "united kingdom");
    }

    #[test]
    fn test_non_numeric_value_is_rejected() {
        let raw = RawInput::new().with("distance", "twenty");
        let err = InputProfile::from_raw(&raw, RangePolicy::Reject).unwrap_err();
        match err {
            FootprintError::InvalidInput { field, value, .. } => {
                assert_eq!(field, "distance");
                assert_eq!(value, "twenty");
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_value_is_rejected() {
        for text in ["NaN", "inf", "-infinity"] {
            let raw = RawInput::new().with("waste", text);
            assert!(
                InputProfile::from_raw(&raw, RangePolicy::Clamp).is_err(),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let raw = RawInput::new().with("electricity", "-5");
        assert!(InputProfile::from_raw(&raw, RangePolicy::Clamp).is_err());
    }

    #[test]
    fn test_oversized_quantity_is_rejected() {
        for (field, text) in [("distance", "1e20"), ("distance", "1e308"), ("meals", "2e9")] {
            let raw = RawInput::new().with(field, text);
            match InputProfile::from_raw(&raw, RangePolicy::Clamp) {
                Err(FootprintError::InvalidInput { field: f, .. }) => assert_eq!(f, field),
                other => panic!("Expected InvalidInput for {field}={text}, got {other:?}"),
            }
        }

        let raw = RawInput::new().with("waste", MAX_QUANTITY.to_string());
        let profile = InputProfile::from_raw(&raw, RangePolicy::Reject).unwrap();
        assert_eq!(profile.waste, MAX_QUANTITY);
    }

    #[test]
    fn test_out_of_range_percentage_rejected_by_default() {
        let raw = RawInput::new().with("renewable", "150");
        let err = InputProfile::from_raw(&raw, RangePolicy::Reject).unwrap_err();
        assert!(err.to_string().contains("renewable"));
    }

    #[test]
    fn test_out_of_range_percentage_clamped() {
        let raw = RawInput::new()
            .with("renewable", "150")
            .with("reduction", "-20");
        let profile = InputProfile::from_raw(&raw, RangePolicy::Clamp).unwrap();
        assert_eq!(profile.renewable, 100.0);
        assert_eq!(profile.reduction, 0.0);
    }

    #[test]
    fn test_keys_are_normalized() {
        let raw = RawInput::new().with(" Distance ", "12.5");
        assert_eq!(raw.get("distance"), Some("12.5"));
        let profile = InputProfile::from_raw(&raw, RangePolicy::Reject).unwrap();
        assert_eq!(profile.distance, 12.5);
    }

    #[test]
    fn test_unknown_fields_listed() {
        let raw = RawInput::new().with("distance", "1").with("pets", "2");
        let unknown: Vec<_> = raw.unknown_fields().collect();
        assert_eq!(unknown, vec!["pets"]);
    }

    #[test]
    fn test_parse_key_value() {
        let raw = RawInput::parse_key_value(
            "# commute\ncountry = Sweden\ndistance=20\n\nmeals = 2\n",
        )
        .unwrap();
        assert_eq!(raw.get("country"), Some("Sweden"));
        assert_eq!(raw.get("distance"), Some("20"));
        assert_eq!(raw.get("meals"), Some("2"));
        assert_eq!(raw.len(), 3);
    }

    #[test]
    fn test_parse_key_value_rejects_bare_line() {
        let err = RawInput::parse_key_value("distance 20").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_from_json_object() {
        let value = serde_json::json!({
            "country": "france",
            "distance": 12,
            "renewable": "35.5",
            "waste": null
        });
        let raw = RawInput::from_json(&value).unwrap();
        assert_eq!(raw.get("distance"), Some("12"));
        assert_eq!(raw.get("renewable"), Some("35.5"));
        assert_eq!(raw.get("waste"), None);
    }

    #[test]
    fn test_from_json_rejects_nested_values() {
        let value = serde_json::json!({ "distance": [1, 2] });
        assert!(RawInput::from_json(&value).is_err());
        assert!(RawInput::from_json(&serde_json::json!([1])).is_err());
    }

    #[test]
    fn test_extend_from_overrides() {
        let mut base = RawInput::new().with("distance", "10").with("meals", "2");
        base.extend_from(&RawInput::new().with("distance", "30"));
        assert_eq!(base.get("distance"), Some("30"));
        assert_eq!(base.get("meals"), Some("2"));
    }
}
