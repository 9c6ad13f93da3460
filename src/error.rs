//! Unified error types for footprint-tools.
//!
//! This module provides the error hierarchy for the library, with enough
//! context attached to each variant to tell the user which field, table or
//! file was at fault.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for footprint-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FootprintError {
    /// A provided input field could not be turned into the required value.
    ///
    /// No computation proceeds and no partial result is returned.
    #[error("Invalid input for '{field}': {reason} (got {value:?})")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A reference-table entry violates its invariant.
    ///
    /// Reference tables are build-time assets (optionally extended by
    /// configuration at startup), so this is never recoverable per request.
    #[error("Invalid reference data in {table} table for '{key}': {reason}")]
    InvalidReferenceData {
        table: String,
        key: String,
        reason: String,
    },

    /// Errors while loading the historical emissions dataset
    #[error("Historical dataset error: {context}")]
    History {
        context: String,
        #[source]
        source: HistoryErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific historical dataset error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HistoryErrorKind {
    #[error("Dataset is empty")]
    Empty,

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Malformed row {line}: {message}")]
    MalformedRow { line: usize, message: String },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for footprint-tools operations
pub type Result<T> = std::result::Result<T, FootprintError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl FootprintError {
    /// Create an invalid input error for a field
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a reference data error for a table entry
    pub fn invalid_reference(
        table: impl Into<String>,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidReferenceData {
            table: table.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a historical dataset error with context
    pub fn history(context: impl Into<String>, source: HistoryErrorKind) -> Self {
        Self::History {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error was caused by user-supplied input.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for FootprintError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for FootprintError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation(format!("JSON deserialization: {err}"))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// # Example
///
/// ```ignore
/// use footprint_tools::error::ErrorContext;
///
/// fn load_profile(path: &Path) -> Result<RawInput> {
///     let content = std::fs::read_to_string(path)
///         .context("reading input profile")?;
///
///     parse_raw_input(&content)
///         .with_context(|| format!("parsing input profile {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    ///
    /// The context string is prepended to the error's existing context,
    /// creating a chain that shows the path through the code.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<FootprintError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: FootprintError, new_ctx: &str) -> FootprintError {
    match err {
        FootprintError::InvalidInput {
            field,
            value,
            reason,
        } => FootprintError::InvalidInput {
            field,
            value,
            reason: chain_context(new_ctx, &reason),
        },
        FootprintError::InvalidReferenceData { table, key, reason } => {
            FootprintError::InvalidReferenceData {
                table,
                key,
                reason: chain_context(new_ctx, &reason),
            }
        }
        FootprintError::History {
            context: existing,
            source,
        } => FootprintError::History {
            context: chain_context(new_ctx, &existing),
            source,
        },
        FootprintError::Io {
            path,
            message,
            source,
        } => FootprintError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        FootprintError::Config(msg) => FootprintError::Config(chain_context(new_ctx, &msg)),
        FootprintError::Validation(msg) => {
            FootprintError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
