//! Exchange rate records and the rate resolution ordering.
//!
//! Resolution order for a conversion request is fixed:
//! 1. Same currency: identity, rate 1, no storage touched
//! 2. Active direct record (base -> target)
//! 3. Active reverse record (target -> base), applied as its reciprocal
//! 4. Otherwise the pair is unresolvable and the caller gets `RateNotFound`
//!
//! Forward and reverse records are independent and may drift; storage never
//! reconciles them. `rates_diverge` lets callers log when both exist with
//! inconsistent values.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vantra_shared::types::{CurrencyCode, EntityId, RateId};

use super::conversion::convert_amount;

/// Where a stored exchange rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    /// Fetched from the online rate-quote provider.
    Online,
    /// Entered by a user.
    Manual,
    /// Substituted from the hard-coded fallback table.
    Fallback,
}

impl RateSource {
    /// Returns the canonical tag for this source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Manual => "manual",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for RateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored exchange rate, keyed by (entity, base, target).
///
/// At most one active record exists per key; writes upsert in place.
/// Records are soft-deactivated, never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Record identifier.
    pub id: RateId,
    /// Owning entity.
    pub entity_id: EntityId,
    /// Base currency (1 unit of this...).
    pub base: CurrencyCode,
    /// Target currency (...buys `rate` of this).
    pub target: CurrencyCode,
    /// Exchange rate; invariant: strictly positive.
    pub rate: Decimal,
    /// Where the rate came from.
    pub source: RateSource,
    /// Last time the rate was written.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete flag.
    pub active: bool,
}

/// How a resolved rate was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateProvenance {
    /// From and to currency were identical; no storage was consulted.
    SameCurrency,
    /// An active direct record matched the requested direction.
    Stored(RateSource),
    /// Derived as the reciprocal of the reverse record; not authoritative.
    Reversed(RateSource),
}

impl RateProvenance {
    /// Returns true for reciprocal-derived rates.
    #[must_use]
    pub const fn is_derived(self) -> bool {
        matches!(self, Self::Reversed(_))
    }
}

impl std::fmt::Display for RateProvenance {
    /// Renders the caller-visible source tag: `same_currency`, `manual`,
    /// `online_reversed`, ...
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SameCurrency => write!(f, "same_currency"),
            Self::Stored(source) => write!(f, "{source}"),
            Self::Reversed(source) => write!(f, "{source}_reversed"),
        }
    }
}

/// Outcome of resolving a rate for a currency pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLookup {
    /// The effective rate to multiply the amount by.
    pub rate: Decimal,
    /// How the rate was derived.
    pub provenance: RateProvenance,
    /// Timestamp of the underlying record; `None` for same-currency.
    pub updated_at: Option<DateTime<Utc>>,
}

/// A completed conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    /// Converted amount, banker's-rounded to 4 decimal places.
    pub amount: Decimal,
    /// The effective rate applied.
    pub rate: Decimal,
    /// How the rate was derived; serialized as the source tag.
    pub provenance: RateProvenance,
    /// Timestamp of the underlying rate record, when one was used.
    pub updated_at: Option<DateTime<Utc>>,
}

impl RateLookup {
    /// Applies this rate to an amount, producing a conversion result.
    #[must_use]
    pub fn apply(&self, amount: Decimal) -> ConversionResult {
        ConversionResult {
            amount: convert_amount(amount, self.rate),
            rate: self.rate,
            provenance: self.provenance,
            updated_at: self.updated_at,
        }
    }
}

/// Resolves a rate from the candidate records for a pair.
///
/// `direct` and `reverse` are the at-most-one active records for
/// (base -> target) and (target -> base) respectively. Returns `None` when
/// the pair is unresolvable; the caller surfaces that as `RateNotFound`.
#[must_use]
pub fn resolve_rate(
    from: &CurrencyCode,
    to: &CurrencyCode,
    direct: Option<&ExchangeRate>,
    reverse: Option<&ExchangeRate>,
) -> Option<RateLookup> {
    if from == to {
        return Some(RateLookup {
            rate: Decimal::ONE,
            provenance: RateProvenance::SameCurrency,
            updated_at: None,
        });
    }

    if let Some(record) = direct {
        return Some(RateLookup {
            rate: record.rate,
            provenance: RateProvenance::Stored(record.source),
            updated_at: Some(record.updated_at),
        });
    }

    reverse.map(|record| RateLookup {
        rate: Decimal::ONE / record.rate,
        provenance: RateProvenance::Reversed(record.source),
        updated_at: Some(record.updated_at),
    })
}

/// Relative tolerance before a forward/reverse pair counts as divergent.
const DIVERGENCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 4); // 0.0001

/// Checks whether a direct record and the reciprocal of its reverse record
/// disagree beyond tolerance.
///
/// Storage never reconciles the two directions; callers use this to log
/// drift when both records exist.
#[must_use]
pub fn rates_diverge(direct: &ExchangeRate, reverse: &ExchangeRate) -> bool {
    if direct.rate <= Decimal::ZERO || reverse.rate <= Decimal::ZERO {
        return true;
    }
    let implied = Decimal::ONE / reverse.rate;
    let delta = (implied - direct.rate).abs();
    delta / direct.rate > DIVERGENCE_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rate(base: &str, target: &str, value: Decimal, source: RateSource) -> ExchangeRate {
        ExchangeRate {
            id: RateId::new(),
            entity_id: EntityId::new(),
            base: CurrencyCode::new(base).unwrap(),
            target: CurrencyCode::new(target).unwrap(),
            rate: value,
            source,
            updated_at: Utc::now(),
            active: true,
        }
    }

    #[test]
    fn test_same_currency_short_circuits() {
        let usd = CurrencyCode::new("USD").unwrap();
        // Stored records must be ignored entirely for identity conversions
        let bogus = rate("USD", "USD", dec!(2), RateSource::Manual);
        let lookup = resolve_rate(&usd, &usd, Some(&bogus), None).unwrap();
        assert_eq!(lookup.rate, Decimal::ONE);
        assert_eq!(lookup.provenance, RateProvenance::SameCurrency);
        assert!(lookup.updated_at.is_none());
    }

    #[test]
    fn test_direct_rate_wins_over_reverse() {
        let from = CurrencyCode::new("USD").unwrap();
        let to = CurrencyCode::new("EUR").unwrap();
        let direct = rate("USD", "EUR", dec!(0.92), RateSource::Online);
        let reverse = rate("EUR", "USD", dec!(2), RateSource::Manual);
        let lookup = resolve_rate(&from, &to, Some(&direct), Some(&reverse)).unwrap();
        assert_eq!(lookup.rate, dec!(0.92));
        assert_eq!(lookup.provenance, RateProvenance::Stored(RateSource::Online));
    }

    #[test]
    fn test_reverse_rate_is_reciprocal() {
        let from = CurrencyCode::new("EUR").unwrap();
        let to = CurrencyCode::new("USD").unwrap();
        let reverse = rate("USD", "EUR", dec!(0.8), RateSource::Manual);
        let lookup = resolve_rate(&from, &to, None, Some(&reverse)).unwrap();
        assert_eq!(lookup.rate, dec!(1.25));
        assert_eq!(
            lookup.provenance,
            RateProvenance::Reversed(RateSource::Manual)
        );
        assert_eq!(lookup.provenance.to_string(), "manual_reversed");
        assert!(lookup.provenance.is_derived());
    }

    #[test]
    fn test_no_records_is_unresolvable() {
        let from = CurrencyCode::new("GBP").unwrap();
        let to = CurrencyCode::new("JPY").unwrap();
        assert!(resolve_rate(&from, &to, None, None).is_none());
    }

    #[test]
    fn test_apply_rounds_converted_amount() {
        let lookup = RateLookup {
            rate: dec!(1.23456789),
            provenance: RateProvenance::Stored(RateSource::Online),
            updated_at: None,
        };
        let result = lookup.apply(dec!(100));
        assert_eq!(result.amount, dec!(123.4568));
        assert_eq!(result.rate, dec!(1.23456789));
    }

    #[test]
    fn test_provenance_tags() {
        assert_eq!(RateProvenance::SameCurrency.to_string(), "same_currency");
        assert_eq!(
            RateProvenance::Stored(RateSource::Fallback).to_string(),
            "fallback"
        );
        assert_eq!(
            RateProvenance::Reversed(RateSource::Online).to_string(),
            "online_reversed"
        );
    }

    #[test]
    fn test_rates_diverge() {
        let direct = rate("USD", "EUR", dec!(0.92), RateSource::Online);
        let consistent = rate("EUR", "USD", Decimal::ONE / dec!(0.92), RateSource::Online);
        assert!(!rates_diverge(&direct, &consistent));

        let drifted = rate("EUR", "USD", dec!(1.20), RateSource::Manual);
        assert!(rates_diverge(&direct, &drifted));
    }

    #[test]
    fn test_divergence_tolerance_constant() {
        assert_eq!(DIVERGENCE_TOLERANCE, dec!(0.0001));
    }
}
