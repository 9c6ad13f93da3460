//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable terminal summary
    #[default]
    Summary,
    /// Structured JSON output
    Json,
    /// Markdown document
    Markdown,
    /// CSV for spreadsheet import
    Csv,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Sections a report can contain
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportSection {
    /// Every section
    #[default]
    All,
    /// Per-category emissions
    Breakdown,
    /// Ten-year projection
    Trajectory,
    /// Carbon cost and savings
    Costs,
    /// Ranked recommendations
    Recommendations,
}

/// Configuration for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Which sections to include
    pub sections: Vec<ReportSection>,
    /// Title for the report
    pub title: Option<String>,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sections: vec![ReportSection::All],
            title: None,
            metadata: ReportMetadata::new(),
        }
    }
}

impl ReportConfig {
    /// Create a config for all sections
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a config for specific sections
    #[must_use]
    pub fn with_sections(sections: Vec<ReportSection>) -> Self {
        Self {
            sections,
            ..Default::default()
        }
    }

    /// Check if a section should be included
    #[must_use]
    pub fn includes(&self, section: ReportSection) -> bool {
        self.sections.contains(&ReportSection::All) || self.sections.contains(&section)
    }

    pub(crate) fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(fallback)
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Input file the profile was read from
    pub input_path: Option<String>,
    /// Tool version
    pub tool_version: String,
    /// Custom properties
    pub custom: std::collections::HashMap<String, String>,
}

impl ReportMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }
}
