//! Property-based tests for rate resolution and conversion.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use vantra_shared::types::{CurrencyCode, EntityId, RateId};

use super::conversion::convert_amount;
use super::rate::{ExchangeRate, RateProvenance, RateSource, resolve_rate};

/// Strategy to generate positive decimal amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn stored(base: &str, target: &str, rate: Decimal, source: RateSource) -> ExchangeRate {
    ExchangeRate {
        id: RateId::new(),
        entity_id: EntityId::new(),
        base: CurrencyCode::new(base).unwrap(),
        target: CurrencyCode::new(target).unwrap(),
        rate,
        source,
        updated_at: Utc::now(),
        active: true,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Conversion result always has at most 4 decimal places.
    #[test]
    fn prop_convert_rounds_to_4_decimals(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let result = convert_amount(amount, rate);
        let scaled = result * Decimal::from(10000);
        prop_assert_eq!(scaled.round(), scaled);
    }

    /// Conversion is deterministic.
    #[test]
    fn prop_convert_is_deterministic(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        prop_assert_eq!(convert_amount(amount, rate), convert_amount(amount, rate));
    }

    /// Same-currency resolution is the identity regardless of stored records.
    #[test]
    fn prop_same_currency_is_identity(
        amount in positive_amount(),
        bogus_rate in positive_rate(),
    ) {
        let code = CurrencyCode::new("USD").unwrap();
        let record = stored("USD", "USD", bogus_rate, RateSource::Manual);
        let lookup = resolve_rate(&code, &code, Some(&record), Some(&record)).unwrap();
        prop_assert_eq!(lookup.rate, Decimal::ONE);
        prop_assert_eq!(lookup.provenance, RateProvenance::SameCurrency);
        prop_assert_eq!(lookup.apply(amount).amount, convert_amount(amount, Decimal::ONE));
    }

    /// Direct rate applies multiplicatively.
    #[test]
    fn prop_direct_rate_applies(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let from = CurrencyCode::new("USD").unwrap();
        let to = CurrencyCode::new("EUR").unwrap();
        let record = stored("USD", "EUR", rate, RateSource::Online);
        let lookup = resolve_rate(&from, &to, Some(&record), None).unwrap();
        prop_assert_eq!(lookup.apply(amount).amount, convert_amount(amount, rate));
    }

    /// Reverse-only resolution uses the reciprocal and is tagged as derived.
    #[test]
    fn prop_reverse_rate_is_reciprocal(rate in positive_rate()) {
        let from = CurrencyCode::new("EUR").unwrap();
        let to = CurrencyCode::new("USD").unwrap();
        let record = stored("USD", "EUR", rate, RateSource::Online);
        let lookup = resolve_rate(&from, &to, None, Some(&record)).unwrap();
        prop_assert_eq!(lookup.rate, Decimal::ONE / rate);
        prop_assert!(lookup.provenance.is_derived());
    }
}
