//! Money and rounding helpers
//!
//! Currency is accumulated as `Decimal` and only rounded when a report is
//! emitted. Minutes and percentages are `f64` rounded at emission too.

use rust_decimal::prelude::*;

/// Rounding strategy for emitted values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert Decimal to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_else(|| {
            tracing::error!(value = %value, "Decimal not representable as f64, defaulting to zero");
            0.0
        })
}

/// Round an f64 to 2 decimal places
#[inline]
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}

/// `part / whole * 100`, rounded to 2 decimals; 0 when `whole` is 0
pub fn percentage(part: Decimal, whole: Decimal) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    to_f64(part * Decimal::ONE_HUNDRED / whole)
}

/// Arithmetic mean of `values`, rounded; 0 when empty
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    round2(values.iter().sum::<f64>() / values.len() as f64)
}
