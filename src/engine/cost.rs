//! Cost analyzer.
//!
//! Monetizes category emissions with the country carbon price, models the
//! savings of three interventions (rooftop solar, EV/public transit, home
//! efficiency) and builds the five-point scenario curves used for charting.
//!
//! Solar and efficiency savings are both taken from the same electricity
//! cost base, so their sum can exceed what a combined install would save.
//! The figures are kept that way for continuity with published reports.

use super::emissions::EmissionBreakdown;
use crate::error::{FootprintError, Result};
use crate::utils::{round_currency, round_to};
use serde::{Deserialize, Serialize};

/// Effective price multiplier for food emissions
pub const FOOD_PRICE_MULTIPLIER: f64 = 0.3;
/// Effective price multiplier for waste emissions
pub const WASTE_PRICE_MULTIPLIER: f64 = 0.5;

/// Share of electricity cost saved by rooftop solar
pub const SOLAR_SAVINGS_RATE: f64 = 0.6;
/// Share of transport cost saved by EV/public transit
pub const TRANSPORT_SAVINGS_RATE: f64 = 0.35;
/// Share of electricity cost saved by efficiency upgrades
pub const EFFICIENCY_SAVINGS_RATE: f64 = 0.25;

/// Years covered by the long-run projection
const PROJECTION_YEARS: i64 = 10;

/// Scenario curves: baseline, each intervention alone, all combined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiScenarios {
    /// Annual cost after each scenario, from the rounded category costs
    pub costs: Vec<i64>,
    /// Annual cost after each scenario, recomputed from total emissions
    pub carbon_costs: Vec<i64>,
    /// Annual savings of each scenario
    pub savings: Vec<i64>,
}

/// Monetary view of a footprint, in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostAnalysis {
    pub current_annual_cost: i64,
    pub transport_cost: i64,
    pub electricity_cost: i64,
    pub food_cost: i64,
    pub waste_cost: i64,
    pub potential_savings: i64,
    pub solar_savings: i64,
    pub transport_savings: i64,
    pub efficiency_savings: i64,
    pub ten_year_savings: i64,
    /// Tonnes CO2 avoided over ten years, one decimal place
    pub ten_year_reduction: f64,
    pub roi_scenarios: RoiScenarios,
    /// USD per tonne CO2
    pub carbon_price: f64,
}

impl CostAnalysis {
    /// Analyze costs for a breakdown at the given carbon price.
    ///
    /// `breakdown` must carry unrounded values; its total is the personal
    /// footprint used for the emissions-based scenario curve. A carbon price
    /// that is not a positive number is a reference data fault.
    pub fn analyze(breakdown: &EmissionBreakdown, carbon_price: f64) -> Result<Self> {
        if !carbon_price.is_finite() || carbon_price <= 0.0 {
            return Err(FootprintError::invalid_reference(
                "carbon price",
                carbon_price.to_string(),
                "carbon price must be positive",
            ));
        }

        let transport_cost = currency("transport cost", breakdown.transport * carbon_price)?;
        let electricity_cost =
            currency("electricity cost", breakdown.electricity * carbon_price)?;
        let food_cost = currency(
            "food cost",
            breakdown.food * carbon_price * FOOD_PRICE_MULTIPLIER,
        )?;
        let waste_cost = currency(
            "waste cost",
            breakdown.waste * carbon_price * WASTE_PRICE_MULTIPLIER,
        )?;
        let current_annual_cost = transport_cost + electricity_cost + food_cost + waste_cost;

        let solar_savings = currency(
            "solar savings",
            electricity_cost as f64 * SOLAR_SAVINGS_RATE,
        )?;
        let transport_savings = currency(
            "transport savings",
            transport_cost as f64 * TRANSPORT_SAVINGS_RATE,
        )?;
        let efficiency_savings = currency(
            "efficiency savings",
            electricity_cost as f64 * EFFICIENCY_SAVINGS_RATE,
        )?;
        let potential_savings = solar_savings + transport_savings + efficiency_savings;

        let ten_year_savings = potential_savings * PROJECTION_YEARS;
        let ten_year_reduction = round_to(
            potential_savings as f64 / carbon_price * PROJECTION_YEARS as f64,
            1,
        );

        let total = breakdown.total();
        let solar_tonnes = breakdown.electricity * SOLAR_SAVINGS_RATE;
        let transport_tonnes = breakdown.transport * TRANSPORT_SAVINGS_RATE;
        let efficiency_tonnes = breakdown.electricity * EFFICIENCY_SAVINGS_RATE;
        let combined_tonnes = solar_tonnes + transport_tonnes + efficiency_tonnes;

        let roi_scenarios = RoiScenarios {
            costs: vec![
                current_annual_cost,
                current_annual_cost - solar_savings,
                current_annual_cost - transport_savings,
                current_annual_cost - efficiency_savings,
                current_annual_cost - potential_savings,
            ],
            // The baseline point is the category-priced cost so both curves
            // start from the same figure.
            carbon_costs: vec![
                current_annual_cost,
                currency("solar scenario", (total - solar_tonnes) * carbon_price)?,
                currency("transport scenario", (total - transport_tonnes) * carbon_price)?,
                currency("efficiency scenario", (total - efficiency_tonnes) * carbon_price)?,
                currency("combined scenario", (total - combined_tonnes) * carbon_price)?,
            ],
            savings: vec![
                0,
                solar_savings,
                transport_savings,
                efficiency_savings,
                potential_savings,
            ],
        };

        tracing::debug!(
            carbon_price,
            current_annual_cost,
            potential_savings,
            "Cost analysis complete"
        );

        Ok(Self {
            current_annual_cost,
            transport_cost,
            electricity_cost,
            food_cost,
            waste_cost,
            potential_savings,
            solar_savings,
            transport_savings,
            efficiency_savings,
            ten_year_savings,
            ten_year_reduction,
            roi_scenarios,
            carbon_price,
        })
    }
}

/// Round an amount to whole USD, failing when it is out of range.
///
/// Each amount is bounded by [`MAX_CURRENCY`](crate::utils::MAX_CURRENCY),
/// so the sums and differences above cannot overflow `i64`.
fn currency(label: &str, amount: f64) -> Result<i64> {
    round_currency(amount).ok_or_else(|| {
        FootprintError::validation(format!(
            "{label} of {amount} USD is outside the supported range"
        ))
    })
}
