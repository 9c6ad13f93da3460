//! Recommendation engine.
//!
//! Each [`Intervention`] has a trigger over the emission profile and a set of
//! fixed economics (savings, investment, payback, ROI). The carbon reduction
//! is the only figure derived from the profile: a fixed share of the
//! emissions of the category the intervention targets.
//!
//! Triggered candidates are ranked by ROI, with zero-ROI ("no investment")
//! candidates placed after every candidate that has a positive ROI, and the
//! list is truncated to [`MAX_RECOMMENDATIONS`].

use super::emissions::EmissionBreakdown;
use crate::model::{EmissionCategory, InputProfile};
use crate::utils::round_to;
use serde::{Deserialize, Serialize};

/// Maximum number of recommendations returned
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Transport emissions above which a top-emitting commute triggers EV/transit
const CLEAN_TRANSPORT_THRESHOLD: f64 = 1.0;
/// Electricity emissions above which a top-emitting household triggers solar and efficiency
const HOME_ENERGY_THRESHOLD: f64 = 1.5;
const DIET_THRESHOLD: f64 = 2.0;
const WASTE_THRESHOLD: f64 = 0.5;
/// Renewable share (%) below which a green provider is suggested
const GREEN_PROVIDER_RENEWABLE_LIMIT: f64 = 20.0;
const REMOTE_WORK_THRESHOLD: f64 = 0.8;

/// Kind of intervention a recommendation proposes.
///
/// Declaration order is the candidate generation order, which decides the
/// final order among candidates with equal ROI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intervention {
    CleanTransport,
    RooftopSolar,
    EfficiencyUpgrade,
    PlantBasedDiet,
    ZeroWaste,
    GreenEnergyProvider,
    RemoteWork,
}

impl Intervention {
    /// All interventions in generation order.
    pub const ALL: [Self; 7] = [
        Self::CleanTransport,
        Self::RooftopSolar,
        Self::EfficiencyUpgrade,
        Self::PlantBasedDiet,
        Self::ZeroWaste,
        Self::GreenEnergyProvider,
        Self::RemoteWork,
    ];

    /// Category whose emissions the intervention reduces
    #[must_use]
    pub const fn category(&self) -> EmissionCategory {
        match self {
            Self::CleanTransport | Self::RemoteWork => EmissionCategory::Transport,
            Self::RooftopSolar | Self::EfficiencyUpgrade | Self::GreenEnergyProvider => {
                EmissionCategory::Electricity
            }
            Self::PlantBasedDiet => EmissionCategory::Food,
            Self::ZeroWaste => EmissionCategory::Waste,
        }
    }

    /// Share of the category's emissions removed
    #[must_use]
    pub const fn reduction_rate(&self) -> f64 {
        match self {
            Self::CleanTransport => 0.35,
            Self::RooftopSolar => 0.6,
            Self::EfficiencyUpgrade => 0.25,
            Self::PlantBasedDiet => 0.2,
            Self::ZeroWaste => 0.4,
            Self::GreenEnergyProvider => 0.5,
            Self::RemoteWork => 0.4,
        }
    }

    /// Font Awesome icon tag used by front ends
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::CleanTransport => "fa-bicycle",
            Self::RooftopSolar => "fa-solar-panel",
            Self::EfficiencyUpgrade => "fa-home",
            Self::PlantBasedDiet => "fa-carrot",
            Self::ZeroWaste => "fa-recycle",
            Self::GreenEnergyProvider => "fa-wind",
            Self::RemoteWork => "fa-laptop-house",
        }
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::CleanTransport => "Switch to Electric Vehicle or Public Transit",
            Self::RooftopSolar => "Install Rooftop Solar Panels",
            Self::EfficiencyUpgrade => "Home Energy Efficiency Upgrade",
            Self::PlantBasedDiet => "Adopt Plant-Based Diet 3 Days/Week",
            Self::ZeroWaste => "Zero Waste Lifestyle Program",
            Self::GreenEnergyProvider => "Switch to Green Energy Provider",
            Self::RemoteWork => "Negotiate Remote Work 2 Days/Week",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::CleanTransport => {
                "Replace your gasoline vehicle with an EV or use public transit for your daily \
                 commute. This can eliminate tailpipe emissions and reduce fuel costs significantly."
            }
            Self::RooftopSolar => {
                "Generate your own clean electricity with a 5kW solar system. Excess power can be \
                 sold back to the grid in many regions."
            }
            Self::EfficiencyUpgrade => {
                "Install smart thermostats, LED lighting, and improve insulation. Low-cost changes \
                 with immediate impact."
            }
            Self::PlantBasedDiet => {
                "Reducing meat consumption, especially beef, significantly lowers your food-related \
                 carbon footprint while improving health."
            }
            Self::ZeroWaste => {
                "Implement composting, recycling, and buy-in-bulk strategies to minimize landfill \
                 waste and associated methane emissions."
            }
            Self::GreenEnergyProvider => {
                "Choose a utility company that offers 100% renewable energy plans. Often costs the \
                 same or less than fossil fuel power."
            }
            Self::RemoteWork => {
                "Working from home just 2 days per week reduces commuting emissions by 40% with no \
                 upfront investment."
            }
        }
    }

    /// Estimated annual savings, USD
    #[must_use]
    pub const fn annual_savings(&self) -> u32 {
        match self {
            Self::CleanTransport => 420,
            Self::RooftopSolar => 580,
            Self::EfficiencyUpgrade => 240,
            Self::PlantBasedDiet => 180,
            Self::ZeroWaste => 120,
            Self::GreenEnergyProvider => 200,
            Self::RemoteWork => 340,
        }
    }

    /// Upfront investment, USD
    #[must_use]
    pub const fn investment(&self) -> u32 {
        match self {
            Self::CleanTransport => 35_000,
            Self::RooftopSolar => 12_000,
            Self::EfficiencyUpgrade => 2_500,
            Self::PlantBasedDiet | Self::GreenEnergyProvider => 0,
            Self::ZeroWaste => 150,
            Self::RemoteWork => 200,
        }
    }

    #[must_use]
    pub const fn payback_period(&self) -> &'static str {
        match self {
            Self::CleanTransport => "7 years (with incentives)",
            Self::RooftopSolar => "5-7 years",
            Self::EfficiencyUpgrade => "10 months",
            Self::PlantBasedDiet | Self::GreenEnergyProvider => "Immediate",
            Self::ZeroWaste => "15 months",
            Self::RemoteWork => "3 weeks",
        }
    }

    /// Return on investment, percent. Zero means no investment is needed.
    #[must_use]
    pub const fn roi(&self) -> u32 {
        match self {
            Self::CleanTransport => 14,
            Self::RooftopSolar => 18,
            Self::EfficiencyUpgrade => 96,
            Self::PlantBasedDiet | Self::GreenEnergyProvider => 0,
            Self::ZeroWaste => 80,
            Self::RemoteWork => 1700,
        }
    }

    /// Whether the profile triggers this intervention
    #[must_use]
    pub fn applies(&self, context: &RecommendationContext) -> bool {
        let b = &context.breakdown;
        let top = context.top_category;
        match self {
            Self::CleanTransport => {
                top == EmissionCategory::Transport && b.transport > CLEAN_TRANSPORT_THRESHOLD
            }
            Self::RooftopSolar | Self::EfficiencyUpgrade => {
                top == EmissionCategory::Electricity && b.electricity > HOME_ENERGY_THRESHOLD
            }
            Self::PlantBasedDiet => b.food > DIET_THRESHOLD,
            Self::ZeroWaste => b.waste > WASTE_THRESHOLD,
            Self::GreenEnergyProvider => context.renewable < GREEN_PROVIDER_RENEWABLE_LIMIT,
            Self::RemoteWork => b.transport > REMOTE_WORK_THRESHOLD,
        }
    }

    /// Build the recommendation for a breakdown
    #[must_use]
    pub fn recommend(&self, breakdown: &EmissionBreakdown) -> Recommendation {
        Recommendation {
            intervention: *self,
            category: self.category(),
            icon: self.icon().to_string(),
            title: self.title().to_string(),
            description: self.description().to_string(),
            annual_savings: self.annual_savings(),
            carbon_reduction: round_to(breakdown.get(self.category()) * self.reduction_rate(), 1),
            investment: self.investment(),
            payback_period: self.payback_period().to_string(),
            roi: self.roi(),
        }
    }
}

impl std::fmt::Display for Intervention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// A ranked, actionable suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub intervention: Intervention,
    pub category: EmissionCategory,
    pub icon: String,
    pub title: String,
    pub description: String,
    /// USD per year
    pub annual_savings: u32,
    /// Tonnes CO2 per year, one decimal place
    pub carbon_reduction: f64,
    /// USD
    pub investment: u32,
    pub payback_period: String,
    /// Percent; 0 means no investment / not comparable
    pub roi: u32,
}

impl Recommendation {
    /// Whether the recommendation needs no upfront investment
    #[must_use]
    pub const fn is_no_investment(&self) -> bool {
        self.roi == 0
    }
}

/// Inputs the recommendation engine works from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationContext {
    /// Unrounded category emissions
    pub breakdown: EmissionBreakdown,
    pub top_category: EmissionCategory,
    /// Renewable share of electricity, percent
    pub renewable: f64,
    /// Target reduction, percent. Reported with the list; it does not gate candidates.
    pub reduction_target: f64,
}

impl RecommendationContext {
    #[must_use]
    pub fn new(breakdown: EmissionBreakdown, renewable: f64, reduction_target: f64) -> Self {
        Self {
            top_category: breakdown.top_category(),
            breakdown,
            renewable,
            reduction_target,
        }
    }

    #[must_use]
    pub fn from_profile(profile: &InputProfile, breakdown: EmissionBreakdown) -> Self {
        Self::new(breakdown, profile.renewable, profile.reduction)
    }
}

/// Every triggered candidate, in generation order.
#[must_use]
pub fn candidates(context: &RecommendationContext) -> Vec<Recommendation> {
    Intervention::ALL
        .iter()
        .filter(|i| i.applies(context))
        .map(|i| i.recommend(&context.breakdown))
        .collect()
}

/// Order candidates by ROI and keep the top [`MAX_RECOMMENDATIONS`].
///
/// The sort is stable: candidates with equal keys keep their input order.
#[must_use]
pub fn rank(mut candidates: Vec<Recommendation>) -> Vec<Recommendation> {
    candidates.sort_by_key(|r| (r.is_no_investment(), std::cmp::Reverse(r.roi)));
    candidates.truncate(MAX_RECOMMENDATIONS);
    candidates
}

/// Generate the ranked recommendation list for a context.
#[must_use]
pub fn recommend(context: &RecommendationContext) -> Vec<Recommendation> {
    let ranked = rank(candidates(context));
    tracing::debug!(
        top_category = %context.top_category,
        count = ranked.len(),
        "Generated recommendations"
    );
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_breakdown() -> EmissionBreakdown {
        EmissionBreakdown {
            transport: 20.0 * 0.12 * 365.0 / 1000.0,
            electricity: 300.0 * 0.4 * 12.0 / 1000.0,
            food: 3.0 * 2.5 * 365.0 / 1000.0,
            waste: 10.0 * 0.5 * 52.0 / 1000.0,
        }
    }

    fn kinds(recs: &[Recommendation]) -> Vec<Intervention> {
        recs.iter().map(|r| r.intervention).collect()
    }

    #[test]
    fn test_reference_profile() {
        let ctx = RecommendationContext::new(reference_breakdown(), 0.0, 10.0);
        let recs = recommend(&ctx);
        assert_eq!(
            kinds(&recs),
            vec![
                Intervention::RemoteWork,
                Intervention::PlantBasedDiet,
                Intervention::GreenEnergyProvider,
            ]
        );

        let summary: Vec<_> = recs
            .iter()
            .map(|r| {
                serde_json::json!({
                    "intervention": r.intervention,
                    "category": r.category,
                    "carbon_reduction": r.carbon_reduction,
                    "payback_period": r.payback_period,
                    "roi": r.roi,
                })
            })
            .collect();
        insta::assert_json_snapshot!(summary, @r###"
        [
          {
            "carbon_reduction": 0.4,
            "category": "Transport",
            "intervention": "remote_work",
            "payback_period": "3 weeks",
            "roi": 1700
          },
          {
            "carbon_reduction": 0.5,
            "category": "Food",
            "intervention": "plant_based_diet",
            "payback_period": "Immediate",
            "roi": 0
          },
          {
            "carbon_reduction": 0.7,
            "category": "Electricity",
            "intervention": "green_energy_provider",
            "payback_period": "Immediate",
            "roi": 0
          }
        ]
        "###);
    }

    #[test]
    fn test_electricity_top_emitter_gets_solar_and_efficiency() {
        let b = EmissionBreakdown {
            transport: 0.5,
            electricity: 4.8,
            food: 1.0,
            waste: 0.1,
        };
        let recs = recommend(&RecommendationContext::new(b, 50.0, 10.0));
        assert_eq!(
            kinds(&recs),
            vec![Intervention::EfficiencyUpgrade, Intervention::RooftopSolar]
        );
        assert_eq!(recs[1].carbon_reduction, 2.9);
        assert_eq!(recs[0].carbon_reduction, 1.2);
    }

    #[test]
    fn test_clean_transport_requires_transport_on_top() {
        let b = EmissionBreakdown {
            transport: 1.5,
            electricity: 2.0,
            food: 1.0,
            waste: 0.1,
        };
        let recs = recommend(&RecommendationContext::new(b, 50.0, 10.0));
        assert!(!kinds(&recs).contains(&Intervention::CleanTransport));
        assert!(kinds(&recs).contains(&Intervention::RemoteWork));

        let b = EmissionBreakdown {
            transport: 3.2,
            ..b
        };
        let recs = recommend(&RecommendationContext::new(b, 50.0, 10.0));
        assert_eq!(
            kinds(&recs),
            vec![Intervention::RemoteWork, Intervention::CleanTransport]
        );
        assert_eq!(recs[1].carbon_reduction, 1.1);
    }

    #[test]
    fn test_zero_candidates_is_valid() {
        let recs = recommend(&RecommendationContext::new(
            EmissionBreakdown::default(),
            100.0,
            0.0,
        ));
        assert!(recs.is_empty());
    }

    #[test]
    fn test_thresholds_are_strict() {
        let b = EmissionBreakdown {
            transport: 0.8,
            electricity: 0.0,
            food: 2.0,
            waste: 0.5,
        };
        let recs = recommend(&RecommendationContext::new(b, 20.0, 10.0));
        assert!(recs.is_empty());
    }

    #[test]
    fn test_rank_truncates_and_orders_zero_roi_last() {
        let b = reference_breakdown();
        let all: Vec<_> = Intervention::ALL.iter().map(|i| i.recommend(&b)).collect();
        let ranked = rank(all);
        assert_eq!(ranked.len(), MAX_RECOMMENDATIONS);
        assert_eq!(
            kinds(&ranked),
            vec![
                Intervention::RemoteWork,
                Intervention::EfficiencyUpgrade,
                Intervention::ZeroWaste,
                Intervention::RooftopSolar,
                Intervention::CleanTransport,
            ]
        );
    }

    #[test]
    fn test_rank_keeps_generation_order_for_ties() {
        let b = reference_breakdown();
        let ranked = rank(vec![
            Intervention::PlantBasedDiet.recommend(&b),
            Intervention::GreenEnergyProvider.recommend(&b),
            Intervention::ZeroWaste.recommend(&b),
        ]);
        assert_eq!(
            kinds(&ranked),
            vec![
                Intervention::ZeroWaste,
                Intervention::PlantBasedDiet,
                Intervention::GreenEnergyProvider,
            ]
        );
    }

    #[test]
    fn test_reduction_target_does_not_gate() {
        let b = reference_breakdown();
        let low = recommend(&RecommendationContext::new(b, 0.0, 0.0));
        let high = recommend(&RecommendationContext::new(b, 0.0, 100.0));
        assert_eq!(low, high);
    }
}
