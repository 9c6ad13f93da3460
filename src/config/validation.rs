//! Configuration validation for footprint-tools.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BehaviorConfig, HistoryConfig, OutputConfig, ReferenceConfig};
use indexmap::IndexMap;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.reference.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors.extend(self.history.validate());
        errors
    }
}

impl Validatable for ReferenceConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        validate_table("reference.carbon_prices", &self.carbon_prices, &mut errors);
        validate_table("reference.country_averages", &self.country_averages, &mut errors);
        errors
    }
}

fn validate_table(field: &str, table: &IndexMap<String, f64>, errors: &mut Vec<ConfigError>) {
    for (country, value) in table {
        if country.trim().is_empty() {
            errors.push(ConfigError {
                field: field.to_string(),
                message: "Country name must not be empty".to_string(),
            });
        }
        if !value.is_finite() || *value <= 0.0 {
            errors.push(ConfigError {
                field: format!("{field}.{country}"),
                message: format!("Value must be a positive number, got {value}"),
            });
        }
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError {
                        field: "output.file".to_string(),
                        message: format!(
                            "Parent directory does not exist: {}",
                            parent.display()
                        ),
                    });
                }
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        // Flags and an enum; nothing to check
        Vec::new()
    }
}

impl Validatable for HistoryConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.horizon == 0 {
            errors.push(ConfigError {
                field: "history.horizon".to_string(),
                message: "Horizon must be at least 1 year".to_string(),
            });
        }
        if let Some(ref dataset) = self.dataset {
            if !dataset.exists() {
                errors.push(ConfigError {
                    field: "history.dataset".to_string(),
                    message: format!("Dataset file does not exist: {}", dataset.display()),
                });
            }
        }
        errors
    }
}
