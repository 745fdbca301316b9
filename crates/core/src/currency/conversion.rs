//! Conversion arithmetic.
//!
//! Only conversion OUTPUT is rounded: stored balances and rates keep their
//! full precision. Output rounds to 4 decimal places, half to even.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Scale of a converted amount, in decimal places.
pub const CONVERSION_SCALE: u32 = 4;

/// Multiplies an amount by an exchange rate and rounds the result.
///
/// Banker's rounding keeps cumulative error from drifting in one direction.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal) -> Decimal {
    (amount * rate).round_dp_with_strategy(CONVERSION_SCALE, RoundingStrategy::MidpointNearestEven)
}
