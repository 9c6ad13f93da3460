//! Baseline comparison and risk classification.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Above this multiple of the country average the footprint is high risk
pub const HIGH_RISK_RATIO: f64 = 1.3;
/// Above this multiple of the country average the footprint is medium risk
pub const MEDIUM_RISK_RATIO: f64 = 0.9;

/// Footprint risk relative to the country baseline.
///
/// Ordered from lowest to highest.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
pub enum RiskLevel {
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
}

impl RiskLevel {
    /// Classify a footprint against a country average.
    ///
    /// Comparisons are strict: a footprint exactly on a threshold falls into
    /// the lower bucket.
    #[must_use]
    pub fn classify(personal_current: f64, country_avg: f64) -> Self {
        if personal_current > country_avg * HIGH_RISK_RATIO {
            Self::High
        } else if personal_current > country_avg * MEDIUM_RISK_RATIO {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_buckets() {
        assert_eq!(RiskLevel::classify(10.0, 4.5), RiskLevel::High);
        assert_eq!(RiskLevel::classify(5.0, 4.5), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(2.0, 4.5), RiskLevel::Low);
    }

    #[test]
    fn test_boundaries_fall_to_lower_bucket() {
        // 10 * 1.3 and 10 * 0.9 are exactly representable thresholds here
        assert_eq!(RiskLevel::classify(13.0, 10.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(9.0, 10.0), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(13.000_001, 10.0), RiskLevel::High);
        assert_eq!(RiskLevel::classify(9.000_001, 10.0), RiskLevel::Medium);
    }

    #[test]
    fn test_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn test_serializes_as_name() {
        assert_eq!(serde_json::to_value(RiskLevel::High).unwrap(), "High");
        assert_eq!(RiskLevel::Medium.to_string(), "Medium");
    }
}
