//! Rate snapshot representation and rounding helpers.

use std::collections::BTreeMap;

/// Reference currency every stored quote is expressed against.
pub const BASE_CURRENCY: &str = "USD";

/// Decimal digits kept when no precision is configured.
pub const DEFAULT_PRECISION: u32 = 6;

/// One complete set of quotes keyed by pair code, e.g. `"USDEUR" -> 0.9`.
///
/// Ordered so the cache file is written in a stable order.
pub type RateSnapshot = BTreeMap<String, f64>;

/// Builds the snapshot key for the quote of `currency` against the base.
pub fn pair_key(currency: &str) -> String {
    format!("{BASE_CURRENCY}{currency}")
}

/// Rounds `value` to `precision` decimal digits, half away from zero.
///
/// When scaling by `10^precision` leaves the finite range the value is
/// returned unchanged, since an `f64` cannot carry that many digits anyway.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let Ok(exp) = i32::try_from(precision) else {
        return value;
    };
    let factor = 10f64.powi(exp);
    let scaled = value * factor;
    if !factor.is_finite() || !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}
