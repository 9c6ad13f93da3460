//! Shared utilities.

mod rounding;

pub use rounding::{round_all, round_currency, round_to, MAX_CURRENCY};
