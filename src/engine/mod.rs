//! Assessment engine.
//!
//! The engine turns a raw input record into an [`Assessment`]:
//!
//! ```text
//! RawInput -> InputProfile -> EmissionBreakdown -> { risk, trajectory, cost, recommendations }
//! ```
//!
//! Every stage is a pure function of the normalized profile plus the shared
//! [`ReferenceData`]. An [`Assessor`] holds no mutable state and can be
//! shared across threads.

pub mod cost;
pub mod emissions;
pub mod recommendations;
pub mod risk;
pub mod trajectory;

pub use cost::{CostAnalysis, RoiScenarios};
pub use emissions::EmissionBreakdown;
pub use recommendations::{
    Intervention, Recommendation, RecommendationContext, MAX_RECOMMENDATIONS,
};
pub use risk::RiskLevel;
pub use trajectory::Trajectory;

use crate::error::Result;
use crate::model::{InputProfile, RangePolicy, RawInput};
use crate::reference::ReferenceData;
use crate::utils::round_to;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Complete result of assessing one profile.
///
/// Field names are stable and independently addressable by consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Normalized country key
    pub country: String,
    /// Whether the country has its own baseline entry
    pub country_matched: bool,
    /// Total annual emissions, tonnes CO2, two decimal places
    pub personal_current: f64,
    /// Country per-capita baseline, tonnes CO2
    pub country_avg: f64,
    pub risk: RiskLevel,
    pub years: Vec<i32>,
    /// Business-as-usual trajectory, two decimal places
    pub original: Vec<f64>,
    /// Reduction-scenario trajectory, two decimal places
    pub adjusted: Vec<f64>,
    /// Category emissions, two decimal places
    pub breakdown: EmissionBreakdown,
    /// Target reduction, percent
    pub reduction_scenario: f64,
    pub cost_analysis: CostAnalysis,
    pub recommendations: Vec<Recommendation>,
}

impl Assessment {
    /// Difference between the footprint and the country baseline, tonnes CO2
    #[must_use]
    pub fn gap_to_average(&self) -> f64 {
        round_to(self.personal_current - self.country_avg, 2)
    }

    /// Footprint as a percentage of the country baseline
    #[must_use]
    pub fn percent_of_average(&self) -> f64 {
        round_to(self.personal_current / self.country_avg * 100.0, 1)
    }
}

/// Runs assessments against a set of reference data.
#[derive(Debug, Clone)]
pub struct Assessor {
    reference: Arc<ReferenceData>,
    range_policy: RangePolicy,
}

impl Assessor {
    /// Create an assessor over the built-in reference tables
    #[must_use]
    pub fn new() -> Self {
        Self {
            reference: ReferenceData::builtin(),
            range_policy: RangePolicy::default(),
        }
    }

    /// Use different reference data
    #[must_use]
    pub fn with_reference(mut self, reference: Arc<ReferenceData>) -> Self {
        self.reference = reference;
        self
    }

    /// Set how out-of-range percentages are handled
    #[must_use]
    pub const fn with_range_policy(mut self, policy: RangePolicy) -> Self {
        self.range_policy = policy;
        self
    }

    /// Reference data in use
    #[must_use]
    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    #[must_use]
    pub const fn range_policy(&self) -> RangePolicy {
        self.range_policy
    }

    /// Normalize a raw record and assess it.
    ///
    /// Fails with [`FootprintError::InvalidInput`](crate::FootprintError::InvalidInput)
    /// on the first field that cannot be normalized; no partial result is
    /// produced.
    pub fn assess(&self, raw: &RawInput) -> Result<Assessment> {
        let profile = InputProfile::from_raw(raw, self.range_policy)?;
        self.assess_profile(&profile)
    }

    /// Assess an already-normalized profile.
    pub fn assess_profile(&self, profile: &InputProfile) -> Result<Assessment> {
        let average = self.reference.country_average(&profile.country);
        let price = self.reference.carbon_price(&profile.country);
        if !average.matched {
            self.report_unmatched_country(&profile.country);
        }

        let breakdown = EmissionBreakdown::from_profile(profile);
        let personal_current = breakdown.total();
        let risk = RiskLevel::classify(personal_current, average.value);
        let trajectory = Trajectory::project(personal_current, profile.reduction).rounded();
        let cost_analysis = CostAnalysis::analyze(&breakdown, price.value)?;
        let recommendations = recommendations::recommend(&RecommendationContext::from_profile(
            profile, breakdown,
        ));

        tracing::debug!(
            country = %profile.country,
            personal_current,
            country_avg = average.value,
            %risk,
            top_category = %breakdown.top_category(),
            "Assessed profile"
        );

        Ok(Assessment {
            country: profile.country.clone(),
            country_matched: average.matched,
            personal_current: round_to(personal_current, 2),
            country_avg: average.value,
            risk,
            years: trajectory.years,
            original: trajectory.original,
            adjusted: trajectory.adjusted,
            breakdown: breakdown.rounded(),
            reduction_scenario: profile.reduction,
            cost_analysis,
            recommendations,
        })
    }

    fn report_unmatched_country(&self, country: &str) {
        if country.is_empty() {
            tracing::debug!("No country given, using default reference values");
            return;
        }
        match self.reference.suggest(country) {
            Some(suggestion) => tracing::warn!(
                "Unknown country '{country}', using default reference values (did you mean '{suggestion}'?)"
            ),
            None => tracing::warn!("Unknown country '{country}', using default reference values"),
        }
    }
}

impl Default for Assessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Assess a raw record against the built-in reference tables.
pub fn assess(raw: &RawInput) -> Result<Assessment> {
    Assessor::new().assess(raw)
}
