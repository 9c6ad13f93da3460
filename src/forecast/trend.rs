//! Country-level emissions trend statistics.

use super::history::HistoryRecord;
use crate::engine::RiskLevel;
use crate::utils::round_to;
use serde::{Deserialize, Serialize};

/// Records needed to compute recent growth
pub const MIN_TREND_RECORDS: usize = 5;
/// Window for the volatility figure
const VOLATILITY_WINDOW: usize = 10;
/// Recent growth (%) above which a country's trend is high risk
const HIGH_GROWTH_PERCENT: f64 = 10.0;
/// Recent growth (%) above which a country's trend is medium risk
const MEDIUM_GROWTH_PERCENT: f64 = 3.0;

/// Recent direction and stability of a country's emissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryTrend {
    pub country: String,
    pub first_year: i32,
    pub latest_year: i32,
    /// Most recent per-capita value, tonnes CO2
    pub latest: f64,
    /// Change between the fifth-from-last and last value, percent
    pub recent_growth: f64,
    /// Population standard deviation of the last ten values
    pub volatility: f64,
    pub risk: RiskLevel,
}

impl CountryTrend {
    /// Analyze one country's records, which must be in year order.
    ///
    /// Returns `None` with fewer than [`MIN_TREND_RECORDS`] records or when
    /// the growth base is zero.
    #[must_use]
    pub fn analyze(records: &[HistoryRecord]) -> Option<Self> {
        if records.len() < MIN_TREND_RECORDS {
            return None;
        }
        let first = records.first()?;
        let last = records.last()?;
        let base = records[records.len() - MIN_TREND_RECORDS].co2_per_capita;
        if base == 0.0 {
            return None;
        }

        let recent_growth = (last.co2_per_capita - base) / base * 100.0;

        let window: Vec<f64> = records
            .iter()
            .rev()
            .take(VOLATILITY_WINDOW)
            .map(|r| r.co2_per_capita)
            .collect();
        let volatility = population_std_dev(&window);

        let risk = if recent_growth > HIGH_GROWTH_PERCENT {
            RiskLevel::High
        } else if recent_growth > MEDIUM_GROWTH_PERCENT {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        Some(Self {
            country: last.country.clone(),
            first_year: first.year,
            latest_year: last.year,
            latest: round_to(last.co2_per_capita, 2),
            recent_growth: round_to(recent_growth, 2),
            volatility: round_to(volatility, 2),
            risk,
        })
    }
}

fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
