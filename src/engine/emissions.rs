//! Emission calculator.
//!
//! Converts lifestyle inputs into annual emissions per category, in tonnes
//! CO2 per year. The factors and annualization multipliers are fixed domain
//! constants.

use crate::model::{EmissionCategory, InputProfile};
use crate::utils::round_to;
use serde::{Deserialize, Serialize};

/// Car-average emissions, kg CO2 per km
pub const TRANSPORT_FACTOR: f64 = 0.12;
/// Grid-average emissions, kg CO2 per kWh
pub const ELECTRICITY_FACTOR: f64 = 0.4;
/// Average-diet emissions, kg CO2 per meal
pub const MEAL_FACTOR: f64 = 2.5;
/// Landfill emissions, kg CO2 per kg of waste
pub const WASTE_FACTOR: f64 = 0.5;

const DAYS_PER_YEAR: f64 = 365.0;
const MONTHS_PER_YEAR: f64 = 12.0;
const WEEKS_PER_YEAR: f64 = 52.0;
const KG_PER_TONNE: f64 = 1000.0;

/// Annual emissions per category, tonnes CO2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionBreakdown {
    #[serde(rename = "Transport")]
    pub transport: f64,
    #[serde(rename = "Electricity")]
    pub electricity: f64,
    #[serde(rename = "Food")]
    pub food: f64,
    #[serde(rename = "Waste")]
    pub waste: f64,
}

impl EmissionBreakdown {
    /// Compute the breakdown for a profile.
    #[must_use]
    pub fn from_profile(profile: &InputProfile) -> Self {
        let transport = profile.distance * TRANSPORT_FACTOR * DAYS_PER_YEAR / KG_PER_TONNE;

        let electricity_factor = ELECTRICITY_FACTOR * (1.0 - profile.renewable / 100.0);
        let electricity =
            profile.electricity * electricity_factor * MONTHS_PER_YEAR / KG_PER_TONNE;

        let food = profile.meals * MEAL_FACTOR * DAYS_PER_YEAR / KG_PER_TONNE;
        let waste = profile.waste * WASTE_FACTOR * WEEKS_PER_YEAR / KG_PER_TONNE;

        Self {
            transport,
            electricity,
            food,
            waste,
        }
    }

    /// Emissions for one category
    #[must_use]
    pub const fn get(&self, category: EmissionCategory) -> f64 {
        match category {
            EmissionCategory::Transport => self.transport,
            EmissionCategory::Electricity => self.electricity,
            EmissionCategory::Food => self.food,
            EmissionCategory::Waste => self.waste,
        }
    }

    /// Total personal emissions
    #[must_use]
    pub fn total(&self) -> f64 {
        self.transport + self.electricity + self.food + self.waste
    }

    /// Category with the highest emissions.
    ///
    /// Ties go to the category that comes first in enumeration order.
    #[must_use]
    pub fn top_category(&self) -> EmissionCategory {
        let mut top = EmissionCategory::Transport;
        for category in EmissionCategory::ALL {
            if self.get(category) > self.get(top) {
                top = category;
            }
        }
        top
    }

    /// Copy with every category rounded to two decimal places
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            transport: round_to(self.transport, 2),
            electricity: round_to(self.electricity, 2),
            food: round_to(self.food, 2),
            waste: round_to(self.waste, 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> InputProfile {
        InputProfile {
            country: "sweden".to_string(),
            distance: 20.0,
            electricity: 300.0,
            meals: 3.0,
            waste: 10.0,
            renewable: 0.0,
            reduction: 10.0,
        }
    }

    #[test]
    fn test_reference_profile_breakdown() {
        let b = EmissionBreakdown::from_profile(&profile());
        assert!((b.transport - 0.876).abs() < 1e-9);
        assert!((b.electricity - 1.44).abs() < 1e-9);
        assert!((b.food - 2.7375).abs() < 1e-9);
        assert!((b.waste - 0.26).abs() < 1e-9);
        assert!((b.total() - 5.3135).abs() < 1e-9);
    }

    #[test]
    fn test_rounded_breakdown() {
        let b = EmissionBreakdown::from_profile(&profile()).rounded();
        assert_eq!(b.transport, 0.88);
        assert_eq!(b.electricity, 1.44);
        assert_eq!(b.food, 2.74);
        assert_eq!(b.waste, 0.26);
    }

    #[test]
    fn test_full_renewable_zeroes_electricity() {
        let mut p = profile();
        p.renewable = 100.0;
        p.electricity = 5000.0;
        assert_eq!(EmissionBreakdown::from_profile(&p).electricity, 0.0);
    }

    #[test]
    fn test_partial_renewable_scales_electricity() {
        let mut p = profile();
        p.renewable = 25.0;
        let b = EmissionBreakdown::from_profile(&p);
        assert!((b.electricity - 1.08).abs() < 1e-9);
    }

    #[test]
    fn test_top_category() {
        let b = EmissionBreakdown::from_profile(&profile());
        assert_eq!(b.top_category(), EmissionCategory::Food);

        let b = EmissionBreakdown {
            transport: 3.0,
            electricity: 1.0,
            food: 2.0,
            waste: 0.1,
        };
        assert_eq!(b.top_category(), EmissionCategory::Transport);
    }

    #[test]
    fn test_top_category_tie_break_uses_enumeration_order() {
        let b = EmissionBreakdown {
            transport: 0.0,
            electricity: 2.0,
            food: 2.0,
            waste: 2.0,
        };
        assert_eq!(b.top_category(), EmissionCategory::Electricity);

        assert_eq!(
            EmissionBreakdown::default().top_category(),
            EmissionCategory::Transport
        );
    }

    #[test]
    fn test_breakdown_serializes_with_category_names() {
        let b = EmissionBreakdown {
            transport: 1.0,
            electricity: 2.0,
            food: 3.0,
            waste: 4.0,
        };
        let json = serde_json::to_value(b).unwrap();
        assert_eq!(json["Transport"], 1.0);
        assert_eq!(json["Waste"], 4.0);
    }
}
