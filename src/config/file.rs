//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".footprint-tools.yaml",
    ".footprint-tools.yml",
    "footprint-tools.yaml",
    "footprint-tools.yml",
];

/// Directory under the user config dir that may hold a config file
const CONFIG_DIR_NAME: &str = "footprint-tools";

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/footprint-tools/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    // 1. Use explicit path if provided
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    // 2. Search current directory
    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    // 3. Search user config directory
    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join(CONFIG_DIR_NAME)) {
            return Some(path);
        }
    }

    // 4. Search home directory
    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// This is useful for layering CLI args over file config.
    pub fn merge(&mut self, other: &Self) {
        // Input config
        if other.input.range_policy != crate::model::RangePolicy::default() {
            self.input.range_policy = other.input.range_policy;
        }

        // Reference overrides - entries from `other` replace same-named ones
        for (country, price) in &other.reference.carbon_prices {
            self.reference
                .carbon_prices
                .insert(country.clone(), *price);
        }
        for (country, average) in &other.reference.country_averages {
            self.reference
                .country_averages
                .insert(country.clone(), *average);
        }

        // Output config - only override if explicitly set
        if other.output.format != crate::reports::ReportFormat::default() {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        // Behavior config
        if other.behavior.max_risk.is_some() {
            self.behavior.max_risk = other.behavior.max_risk;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }

        // History config
        if other.history.dataset.is_some() {
            self.history.dataset.clone_from(&other.history.dataset);
        }
        if other.history.horizon != crate::forecast::DEFAULT_HORIZON {
            self.history.horizon = other.history.horizon;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# footprint-tools configuration
# Place this file at .footprint-tools.yaml in your working directory or ~/.config/footprint-tools/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# footprint-tools configuration file
# ==================================
#
# Place it at:
#   - .footprint-tools.yaml in your working directory
#   - ~/.config/footprint-tools/footprint-tools.yaml for global config
#
# CLI arguments always override file settings.

# Input normalization
input:
  # Renewable/reduction percentages outside 0-100: reject or clamp
  range_policy: reject

# Reference table overrides (country names are case-insensitive)
reference:
  # USD per tonne CO2, e.g. freedonia: 75
  carbon_prices: {}
  # Tonnes CO2 per capita per year, e.g. freedonia: 6.2
  country_averages: {}

# Output configuration
output:
  # Format: summary, json, markdown, csv
  format: summary
  # Output file path (omit for stdout)
  # file: assessment.json
  # Disable colored output
  no_color: false

# Behavior flags
behavior:
  # Exit with code 1 when the risk is above this level: low, medium, high
  # max_risk: medium
  # Suppress non-essential output
  quiet: false

# Historical dataset used by the trend command
history:
  # dataset: ./co2-data.csv
  horizon: 10
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
