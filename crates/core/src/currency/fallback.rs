//! Hard-coded fallback rate table.
//!
//! Seed rates for a handful of common pairs, used only when the online
//! provider cannot be reached. Pairs absent from this table are silently
//! omitted during fallback substitution.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;

/// One fallback seed rate.
#[derive(Debug, Clone, Copy)]
struct FallbackRate {
    base: &'static str,
    target: &'static str,
    /// Mantissa and scale for `Decimal::new`.
    mantissa: i64,
    scale: u32,
}

const SEED_RATES: &[FallbackRate] = &[
    FallbackRate { base: "USD", target: "EUR", mantissa: 9200, scale: 4 },
    FallbackRate { base: "USD", target: "GBP", mantissa: 7900, scale: 4 },
    FallbackRate { base: "USD", target: "JPY", mantissa: 1_480_000, scale: 4 },
    FallbackRate { base: "USD", target: "IDR", mantissa: 158_000_000, scale: 4 },
    FallbackRate { base: "USD", target: "SGD", mantissa: 13_500, scale: 4 },
    FallbackRate { base: "USD", target: "AUD", mantissa: 15_200, scale: 4 },
    FallbackRate { base: "EUR", target: "USD", mantissa: 10_900, scale: 4 },
    FallbackRate { base: "EUR", target: "GBP", mantissa: 8_600, scale: 4 },
    FallbackRate { base: "GBP", target: "USD", mantissa: 12_700, scale: 4 },
];

static TABLE: Lazy<Vec<(&'static str, &'static str, Decimal)>> = Lazy::new(|| {
    SEED_RATES
        .iter()
        .map(|seed| (seed.base, seed.target, Decimal::new(seed.mantissa, seed.scale)))
        .collect()
});

/// Looks up a fallback seed rate for a currency pair.
///
/// Returns `None` when the table has no entry for the pair; fallback
/// substitution skips such pairs rather than failing.
#[must_use]
pub fn fallback_rate(base: &str, target: &str) -> Option<Decimal> {
    TABLE
        .iter()
        .find(|(b, t, _)| *b == base && *t == target)
        .map(|(_, _, rate)| *rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_known_pair() {
        assert_eq!(fallback_rate("USD", "EUR"), Some(dec!(0.9200)));
        assert_eq!(fallback_rate("USD", "IDR"), Some(dec!(15800.0000)));
    }

    #[test]
    fn test_unknown_pair_is_none() {
        assert_eq!(fallback_rate("CHF", "NOK"), None);
        // Table is directional; no implicit reciprocal entries
        assert_eq!(fallback_rate("IDR", "USD"), None);
    }

    #[test]
    fn test_all_seed_rates_positive() {
        for (base, target, rate) in TABLE.iter() {
            assert!(
                *rate > Decimal::ZERO,
                "seed rate {base}->{target} must be positive"
            );
        }
    }
}
