//! **A library for estimating, projecting and reducing personal carbon footprints.**
//!
//! `footprint-tools` turns a handful of lifestyle answers (commute distance,
//! electricity use, meals, household waste, renewable share and a reduction
//! target) into a complete assessment: per-category annual emissions, a risk
//! level against the country baseline, a ten-year trajectory with and
//! without the reduction target, the carbon cost of the footprint at the
//! country's carbon price, and a ranked list of interventions.
//!
//! It powers both a command-line interface (CLI) for direct use and a Rust
//! library for programmatic integration.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`RawInput`], the flat string-keyed record a front end
//!   collects, and [`InputProfile`], its normalized form.
//! - **[`reference`]**: Country carbon prices and per-capita baselines, with
//!   a `"default"` fallback in every table.
//! - **[`engine`]**: The [`Assessor`], which runs every stage and produces
//!   an [`Assessment`].
//! - **[`forecast`]**: The historical dataset, country trend statistics and
//!   the [`Forecaster`] boundary for external time-series models.
//! - **[`reports`]**: Generators for summary, JSON, Markdown and CSV output.
//! - **[`config`]**: YAML configuration, discovery and validation.
//!
//! ## Getting Started
//!
//! ```
//! use footprint_tools::{assess, RawInput, RiskLevel};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let input = RawInput::new()
//!         .with("country", "sweden")
//!         .with("distance", "20")
//!         .with("electricity", "300")
//!         .with("waste", "10");
//!
//!     let assessment = assess(&input)?;
//!     assert_eq!(assessment.personal_current, 5.31);
//!     assert_eq!(assessment.risk, RiskLevel::High);
//!
//!     for rec in &assessment.recommendations {
//!         println!("{} (ROI {}%)", rec.title, rec.roi);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Custom reference data
//!
//! ```
//! use footprint_tools::{Assessor, RawInput, ReferenceData};
//! use indexmap::IndexMap;
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut prices = IndexMap::new();
//!     prices.insert("freedonia".to_string(), 75.0);
//!     let reference = ReferenceData::builtin().with_overrides(&prices, &IndexMap::new())?;
//!
//!     let assessor = Assessor::new().with_reference(Arc::new(reference));
//!     let assessment = assessor.assess(&RawInput::new().with("country", "Freedonia"))?;
//!     assert_eq!(assessment.cost_analysis.carbon_price, 75.0);
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the `footprint-tools` library crate. The binary of
//! the same name exposes `assess`, `batch`, `countries` and `trend` commands.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Currency and trajectory math moves between f64 and integer types; values are bounded
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod model;
pub mod pipeline;
pub mod reference;
pub mod reports;
pub mod utils;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use engine::{
    assess, Assessment, Assessor, CostAnalysis, EmissionBreakdown, Intervention, Recommendation,
    RiskLevel, Trajectory,
};
pub use error::{ErrorContext, FootprintError, HistoryErrorKind, Result};
pub use forecast::{
    CountryTrend, ForecastOutcome, ForecastPoint, Forecaster, HistoricalDataset, HistoryGate,
    HistoryRecord,
};
pub use model::{EmissionCategory, InputProfile, RangePolicy, RawInput};
pub use reference::ReferenceData;
pub use reports::{create_reporter, ReportFormat, ReportGenerator};
