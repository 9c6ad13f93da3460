//! Country-level forecasting boundary.
//!
//! Statistical forecasting of national emissions is delegated to an external
//! model behind the [`Forecaster`] trait. This module owns the historical
//! dataset, the minimum-history gate in front of the model, and simple trend
//! statistics that need no model at all.
//!
//! A country with too little history is not an error: [`HistoryGate`]
//! answers [`ForecastOutcome::InsufficientHistory`] without invoking the
//! model.

mod history;
mod trend;

pub use history::{HistoricalDataset, HistoryRecord};
pub use trend::{CountryTrend, MIN_TREND_RECORDS};

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Records a country needs before a model is asked to forecast it
pub const MIN_FORECAST_RECORDS: usize = 20;
/// Forecast horizon used when none is given, in yearly periods
pub const DEFAULT_HORIZON: usize = 10;

/// Whether a series is long enough to be handed to a model
#[must_use]
pub fn has_sufficient_history(records: &[HistoryRecord]) -> bool {
    records.len() >= MIN_FORECAST_RECORDS
}

/// One forecast period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub year: i32,
    /// Predicted tonnes CO2 per capita
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
}

/// A country-level time-series model.
///
/// Implementations receive at least [`MIN_FORECAST_RECORDS`] records, in
/// year order, and return `periods` points following the last record.
pub trait Forecaster: Send + Sync {
    /// Model name, for logging
    fn name(&self) -> &str;

    fn forecast(
        &self,
        country: &str,
        history: &[HistoryRecord],
        periods: usize,
    ) -> Result<Vec<ForecastPoint>>;
}

/// Result of a gated forecast request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastOutcome {
    Forecast { points: Vec<ForecastPoint> },
    InsufficientHistory { available: usize, required: usize },
}

impl ForecastOutcome {
    /// Forecast points, if a forecast was produced
    #[must_use]
    pub fn points(&self) -> Option<&[ForecastPoint]> {
        match self {
            Self::Forecast { points } => Some(points),
            Self::InsufficientHistory { .. } => None,
        }
    }
}

/// Checks history sufficiency before handing a country to a model.
pub struct HistoryGate<F> {
    dataset: HistoricalDataset,
    forecaster: F,
}

impl<F: Forecaster> HistoryGate<F> {
    pub fn new(dataset: HistoricalDataset, forecaster: F) -> Self {
        Self {
            dataset,
            forecaster,
        }
    }

    #[must_use]
    pub fn dataset(&self) -> &HistoricalDataset {
        &self.dataset
    }

    /// Whether a country has enough history to be forecast
    #[must_use]
    pub fn has_sufficient_history(&self, country: &str) -> bool {
        has_sufficient_history(self.dataset.country(country))
    }

    /// Forecast a country over `periods` years.
    pub fn forecast(&self, country: &str, periods: usize) -> Result<ForecastOutcome> {
        let history = self.dataset.country(country);
        if !has_sufficient_history(history) {
            tracing::info!(
                "Not enough history to forecast '{country}' ({} of {MIN_FORECAST_RECORDS} records)",
                history.len()
            );
            return Ok(ForecastOutcome::InsufficientHistory {
                available: history.len(),
                required: MIN_FORECAST_RECORDS,
            });
        }

        tracing::debug!(
            model = self.forecaster.name(),
            records = history.len(),
            periods,
            "Forecasting {country}"
        );
        let points = self.forecaster.forecast(country, history, periods)?;
        Ok(ForecastOutcome::Forecast { points })
    }

    /// Forecast a country over [`DEFAULT_HORIZON`] years.
    pub fn forecast_default(&self, country: &str) -> Result<ForecastOutcome> {
        self.forecast(country, DEFAULT_HORIZON)
    }
}
