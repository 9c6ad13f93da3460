//! Display rounding helpers.
//!
//! Values are rounded only at the edges of the engine (the assessment
//! envelope and currency amounts); intermediate quantities stay unrounded.

/// Largest whole currency amount accepted by [`round_currency`] (2^53).
///
/// Every integer up to this bound is exact as `f64`, and sums of a handful
/// of such amounts, or ten times one, stay well inside `i64`.
pub const MAX_CURRENCY: f64 = 9_007_199_254_740_992.0;

/// Round a value to a fixed number of decimal places.
///
/// Rounds the exact binary value of `value`, so a decimal that is stored
/// slightly below a half rounds down. Exact halves go to the even digit.
#[must_use]
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.places$}")
        .parse::<f64>()
        .map_or(value, |rounded| rounded + 0.0)
}

/// Round every value in a sequence to a fixed number of decimal places.
#[must_use]
pub fn round_all(values: &[f64], places: usize) -> Vec<f64> {
    values.iter().map(|v| round_to(*v, places)).collect()
}

/// Round a monetary amount to the nearest whole currency unit.
///
/// Exact halves go to the nearest even unit. Returns `None` for amounts
/// that are not finite or whose magnitude exceeds [`MAX_CURRENCY`].
#[must_use]
pub fn round_currency(value: f64) -> Option<i64> {
    let rounded = value.round_ties_even();
    if !rounded.is_finite() || rounded.abs() > MAX_CURRENCY {
        return None;
    }
    Some(rounded as i64)
}
