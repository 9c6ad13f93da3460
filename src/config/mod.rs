//! Configuration module for footprint-tools.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use footprint_tools::config::AppConfig;
//!
//! // Use defaults
//! let config = AppConfig::default();
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .range_policy(RangePolicy::Clamp)
//!     .carbon_price("freedonia", 75.0)
//!     .build();
//!
//! // Load from file
//! use footprint_tools::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.footprint-tools.yaml` file in your working directory or
//! `~/.config/footprint-tools/`:
//!
//! ```yaml
//! input:
//!   range_policy: clamp
//! reference:
//!   carbon_prices:
//!     freedonia: 75
//! behavior:
//!   max_risk: medium
//! ```

pub mod file;
mod types;
mod validation;

// Re-export main types
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, HistoryConfig, InputConfig, OutputConfig,
    ReferenceConfig,
};
pub use validation::{ConfigError, Validatable};

// Re-export file utilities
pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.footprint-tools.yaml` config files. It can be used by editors for
/// validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
