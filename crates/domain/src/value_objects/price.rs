use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds `value` to `decimals` fractional digits, half away from zero.
///
/// Values `Decimal` cannot represent (NaN, infinities, huge magnitudes) are
/// returned unchanged.
pub fn round_price(value: f64, decimals: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Non-positive and non-finite prices mark a line as inactive.
pub fn is_active_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

/// `|a - b| < threshold`, strictly.
pub fn distance_within(a: f64, b: f64, threshold: f64) -> bool {
    (a - b).abs() < threshold
}
