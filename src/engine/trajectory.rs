//! Ten-year emission trajectories.
//!
//! Deterministic scenario modeling: an unmitigated sequence growing 2% a
//! year, and a reduction scenario that applies the target cut immediately
//! and then declines 2% a year.

use crate::utils::round_all;
use serde::{Deserialize, Serialize};

/// First projected year
pub const START_YEAR: i32 = 2025;
/// Number of projected years
pub const HORIZON_YEARS: usize = 10;
/// Year-on-year multiplier without mitigation
pub const GROWTH_FACTOR: f64 = 1.02;
/// Year-on-year multiplier in the reduction scenario
pub const DECLINE_FACTOR: f64 = 0.98;

/// Two parallel projected sequences, tonnes CO2 per year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub years: Vec<i32>,
    /// Business as usual
    pub original: Vec<f64>,
    /// Reduction scenario
    pub adjusted: Vec<f64>,
}

impl Trajectory {
    /// Project both scenarios from the current footprint.
    #[must_use]
    pub fn project(personal_current: f64, reduction_pct: f64) -> Self {
        let reduced_start = personal_current * (1.0 - reduction_pct / 100.0);

        let mut years = Vec::with_capacity(HORIZON_YEARS);
        let mut original = Vec::with_capacity(HORIZON_YEARS);
        let mut adjusted = Vec::with_capacity(HORIZON_YEARS);
        for (offset, year) in (START_YEAR..).take(HORIZON_YEARS).enumerate() {
            let exponent = offset as i32;
            years.push(year);
            original.push(personal_current * GROWTH_FACTOR.powi(exponent));
            adjusted.push(reduced_start * DECLINE_FACTOR.powi(exponent));
        }

        Self {
            years,
            original,
            adjusted,
        }
    }

    /// Copy with every value rounded to two decimal places
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            years: self.years.clone(),
            original: round_all(&self.original, 2),
            adjusted: round_all(&self.adjusted, 2),
        }
    }
}
