//! Configuration types for footprint-tools.
//!
//! Provides structured configuration for input handling, reference data
//! overrides, output, and the historical dataset.

use crate::engine::RiskLevel;
use crate::model::RangePolicy;
use crate::reports::ReportFormat;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// It can be constructed from CLI arguments, config files, or both
/// (with CLI overriding file settings).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Input normalization
    pub input: InputConfig,
    /// Extra or overriding reference table entries
    pub reference: ReferenceConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
    /// Historical dataset for country trends
    pub history: HistoryConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set how out-of-range percentages are handled.
    pub const fn range_policy(mut self, policy: RangePolicy) -> Self {
        self.config.input.range_policy = policy;
        self
    }

    /// Add or replace a carbon price entry.
    pub fn carbon_price(mut self, country: impl Into<String>, price: f64) -> Self {
        self.config
            .reference
            .carbon_prices
            .insert(country.into(), price);
        self
    }

    /// Add or replace a country average entry.
    pub fn country_average(mut self, country: impl Into<String>, average: f64) -> Self {
        self.config
            .reference
            .country_averages
            .insert(country.into(), average);
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Fail when the assessed risk exceeds this level.
    pub const fn max_risk(mut self, level: Option<RiskLevel>) -> Self {
        self.config.behavior.max_risk = level;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Set the historical dataset path.
    pub fn history_dataset(mut self, path: Option<PathBuf>) -> Self {
        self.config.history.dataset = path;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section types
// ============================================================================

/// Input normalization settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct InputConfig {
    /// What to do with renewable/reduction percentages outside 0-100
    pub range_policy: RangePolicy,
}

/// Reference table overrides.
///
/// Entries are layered over the built-in tables at startup; keys are
/// matched case-insensitively.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Country -> USD per tonne CO2
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub carbon_prices: IndexMap<String, f64>,
    /// Country -> tonnes CO2 per capita per year
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub country_averages: IndexMap<String, f64>,
}

impl ReferenceConfig {
    /// Whether any override is configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.carbon_prices.is_empty() && self.country_averages.is_empty()
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Behavior flags
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 when the assessed risk is above this level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_risk: Option<RiskLevel>,
    /// Suppress non-essential output
    pub quiet: bool,
}

/// Historical dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HistoryConfig {
    /// CSV file with `country`, `year` and `co2_per_capita` columns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<PathBuf>,
    /// Forecast horizon in years
    #[schemars(range(min = 1))]
    pub horizon: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            horizon: crate::forecast::DEFAULT_HORIZON,
        }
    }
}
