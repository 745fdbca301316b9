//! Exchange rate repository: conversion, refresh, and manual rate writes.
//!
//! The resolution ordering itself is pure logic in `vantra_core`; this
//! repository loads the candidate records and applies it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::json;

use vantra_core::currency::{
    ConversionResult, ExchangeRate, RateFetcher, RateSource, fallback_rate, rates_diverge,
    resolve_rate,
};
use vantra_shared::types::{CurrencyCode, EntityId, RateId};

use crate::document::{Collection, Filter};
use crate::error::StoreError;
use crate::partition::PartitionHandle;

/// Errors from exchange rate operations.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    /// No direct or reverse rate exists for the requested pair. Never
    /// silently defaulted to 1.0.
    #[error("no exchange rate found for {from}/{to}")]
    NotFound {
        /// Requested source currency.
        from: CurrencyCode,
        /// Requested target currency.
        to: CurrencyCode,
    },

    /// Rate must be strictly positive.
    #[error("exchange rate must be positive")]
    NonPositiveRate,

    /// Base and target currencies must differ for a stored rate.
    #[error("base and target currencies must be different")]
    SameCurrencyPair,

    /// Storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<RateError> for vantra_shared::AppError {
    fn from(err: RateError) -> Self {
        match err {
            RateError::NotFound { .. } => Self::NotFound(err.to_string()),
            RateError::NonPositiveRate | RateError::SameCurrencyPair => {
                Self::Validation(err.to_string())
            }
            RateError::Store(e) => e.into(),
        }
    }
}

/// Result of a rate refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Number of rate records upserted.
    pub updated_count: usize,
    /// The target currencies actually updated, in request order.
    pub updated_targets: Vec<CurrencyCode>,
    /// When the refresh ran.
    pub refreshed_at: DateTime<Utc>,
    /// True when the fallback table substituted for the provider.
    pub used_fallback: bool,
}

/// Exchange rate repository, bound to one partition.
#[derive(Debug, Clone)]
pub struct RateRepository {
    handle: PartitionHandle,
}

impl RateRepository {
    /// Creates a repository over a partition handle.
    #[must_use]
    pub fn new(handle: PartitionHandle) -> Self {
        Self { handle }
    }

    fn key(entity_id: EntityId, base: &CurrencyCode, target: &CurrencyCode) -> String {
        format!("{entity_id}:{base}:{target}")
    }

    fn pair_filter(entity_id: EntityId, base: &CurrencyCode, target: &CurrencyCode) -> Filter {
        Filter::new()
            .eq("entity_id", json!(entity_id))
            .eq("base", json!(base))
            .eq("target", json!(target))
            .active_only()
    }

    /// Finds the active rate record for a pair, if any.
    pub async fn find_active(
        &self,
        entity_id: EntityId,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<Option<ExchangeRate>, StoreError> {
        self.handle
            .find_one(
                Collection::ExchangeRates,
                &Self::pair_filter(entity_id, base, target),
            )
            .await
    }

    /// Converts an amount between currencies for an owning entity.
    ///
    /// Strict ordering: identity, stored direct rate, stored reverse rate
    /// (reciprocal), then `RateNotFound`. The identity case short-circuits
    /// before touching storage.
    ///
    /// # Errors
    ///
    /// `RateError::NotFound` when neither direction is stored.
    pub async fn convert(
        &self,
        entity_id: EntityId,
        amount: Decimal,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<ConversionResult, RateError> {
        let (direct, reverse) = if from == to {
            (None, None)
        } else {
            let direct = self.find_active(entity_id, from, to).await?;
            let reverse = self.find_active(entity_id, to, from).await?;
            if let (Some(d), Some(r)) = (&direct, &reverse)
                && rates_diverge(d, r)
            {
                tracing::warn!(
                    entity = %entity_id,
                    pair = %format!("{from}/{to}"),
                    direct = %d.rate,
                    reverse = %r.rate,
                    "direct and reverse rates diverge; using direct"
                );
            }
            (direct, reverse)
        };

        let lookup = resolve_rate(from, to, direct.as_ref(), reverse.as_ref()).ok_or_else(|| {
            RateError::NotFound {
                from: from.clone(),
                to: to.clone(),
            }
        })?;

        tracing::debug!(
            entity = %entity_id,
            pair = %format!("{from}/{to}"),
            rate = %lookup.rate,
            provenance = %lookup.provenance,
            "resolved exchange rate"
        );
        Ok(lookup.apply(amount))
    }

    /// Creates or replaces the rate record for (entity, base, target).
    ///
    /// Replaces rate/source/timestamp in place and reactivates the record;
    /// no version history is kept.
    ///
    /// # Errors
    ///
    /// Rejects non-positive rates and identical currency pairs.
    pub async fn upsert_rate(
        &self,
        entity_id: EntityId,
        base: &CurrencyCode,
        target: &CurrencyCode,
        rate: Decimal,
        source: RateSource,
    ) -> Result<ExchangeRate, RateError> {
        if rate <= Decimal::ZERO {
            return Err(RateError::NonPositiveRate);
        }
        if base == target {
            return Err(RateError::SameCurrencyPair);
        }

        // Reuse the existing record id (active or not) so the key stays stable.
        let existing: Option<ExchangeRate> = self
            .handle
            .find_one(
                Collection::ExchangeRates,
                &Filter::new()
                    .eq("entity_id", json!(entity_id))
                    .eq("base", json!(base))
                    .eq("target", json!(target)),
            )
            .await?;

        let record = ExchangeRate {
            id: existing.map_or_else(RateId::new, |r| r.id),
            entity_id,
            base: base.clone(),
            target: target.clone(),
            rate,
            source,
            updated_at: Utc::now(),
            active: true,
        };

        self.handle
            .upsert(
                Collection::ExchangeRates,
                &Self::key(entity_id, base, target),
                &record,
            )
            .await?;
        Ok(record)
    }

    /// Sets a rate manually, bypassing any fetch.
    pub async fn set_manual(
        &self,
        entity_id: EntityId,
        base: &CurrencyCode,
        target: &CurrencyCode,
        rate: Decimal,
    ) -> Result<ExchangeRate, RateError> {
        self.upsert_rate(entity_id, base, target, rate, RateSource::Manual)
            .await
    }

    /// Refreshes rates for `base` against `targets` from the online provider.
    ///
    /// On total fetch failure the fallback table substitutes for the same
    /// pairs; pairs absent there are omitted, not errors. An empty target
    /// list is success with zero updates. Each upsert commits independently,
    /// so a cancelled refresh leaves prior upserts in place.
    pub async fn refresh(
        &self,
        entity_id: EntityId,
        base: &CurrencyCode,
        targets: &[CurrencyCode],
        fetcher: &dyn RateFetcher,
    ) -> Result<RefreshOutcome, RateError> {
        if targets.is_empty() {
            return Ok(RefreshOutcome {
                updated_count: 0,
                updated_targets: Vec::new(),
                refreshed_at: Utc::now(),
                used_fallback: false,
            });
        }

        let (quotes, source) = match fetcher.fetch(base).await {
            Ok(quotes) => (quotes, RateSource::Online),
            Err(err) => {
                tracing::warn!(
                    base = %base,
                    error = %err,
                    "rate provider unavailable; substituting fallback table"
                );
                (fallback_quotes(base, targets), RateSource::Fallback)
            }
        };

        let mut updated_targets = Vec::new();
        for target in targets {
            if target == base {
                continue;
            }
            let Some(rate) = quotes.get(target).copied() else {
                continue;
            };
            self.upsert_rate(entity_id, base, target, rate, source)
                .await?;
            updated_targets.push(target.clone());
        }

        Ok(RefreshOutcome {
            updated_count: updated_targets.len(),
            updated_targets,
            refreshed_at: Utc::now(),
            used_fallback: source == RateSource::Fallback,
        })
    }

    /// Lists all active rates for an entity.
    pub async fn list_active(&self, entity_id: EntityId) -> Result<Vec<ExchangeRate>, StoreError> {
        self.handle
            .find_many(
                Collection::ExchangeRates,
                &Filter::new().eq("entity_id", json!(entity_id)).active_only(),
            )
            .await
    }

    /// Soft-deactivates the rate record for a pair.
    pub async fn deactivate(
        &self,
        entity_id: EntityId,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<bool, StoreError> {
        self.handle
            .deactivate(
                Collection::ExchangeRates,
                &Self::key(entity_id, base, target),
            )
            .await
    }
}

/// Builds a quote map from the fallback table for the requested pairs.
fn fallback_quotes(
    base: &CurrencyCode,
    targets: &[CurrencyCode],
) -> std::collections::HashMap<CurrencyCode, Decimal> {
    targets
        .iter()
        .filter_map(|target| {
            fallback_rate(base.as_str(), target.as_str()).map(|rate| (target.clone(), rate))
        })
        .collect()
}
