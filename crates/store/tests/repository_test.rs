//! Integration tests for the partition-bound repositories over the
//! in-memory store.

use std::sync::Arc;

use rust_decimal_macros::dec;

use vantra_core::currency::{RateProvenance, RateSource};
use vantra_core::entity::EntityClassification;
use vantra_shared::types::{CurrencyCode, EntityId};
use vantra_store::repositories::{
    AccountError, AccountRepository, CreateAccountInput, EntityRepository, NewParentInput,
    NewSisterInput, RateError, RateRepository,
};
use vantra_store::{MemoryStore, PartitionHandle, PartitionId};

fn handle(partition: &str) -> PartitionHandle {
    PartitionHandle::new(Arc::new(MemoryStore::new()), PartitionId::named(partition))
}

fn currency(code: &str) -> CurrencyCode {
    CurrencyCode::new(code).unwrap()
}

// ============================================================================
// Exchange rates
// ============================================================================

#[tokio::test]
async fn test_convert_same_currency_skips_storage() {
    let rates = RateRepository::new(handle("t1"));
    let usd = currency("USD");

    let result = rates
        .convert(EntityId::new(), dec!(250.50), &usd, &usd)
        .await
        .unwrap();
    assert_eq!(result.amount, dec!(250.5000));
    assert_eq!(result.rate, dec!(1));
    assert_eq!(result.provenance.to_string(), "same_currency");
}

#[tokio::test]
async fn test_convert_prefers_direct_rate() {
    let rates = RateRepository::new(handle("t1"));
    let entity = EntityId::new();
    let (usd, eur) = (currency("USD"), currency("EUR"));

    rates
        .upsert_rate(entity, &usd, &eur, dec!(0.92), RateSource::Online)
        .await
        .unwrap();
    rates
        .upsert_rate(entity, &eur, &usd, dec!(1.05), RateSource::Manual)
        .await
        .unwrap();

    let result = rates.convert(entity, dec!(100), &usd, &eur).await.unwrap();
    assert_eq!(result.amount, dec!(92.0000));
    assert_eq!(result.provenance, RateProvenance::Stored(RateSource::Online));
}

#[tokio::test]
async fn test_convert_falls_back_to_reverse_rate() {
    let rates = RateRepository::new(handle("t1"));
    let entity = EntityId::new();
    let (usd, eur) = (currency("USD"), currency("EUR"));

    rates
        .upsert_rate(entity, &usd, &eur, dec!(0.8), RateSource::Manual)
        .await
        .unwrap();

    // No EUR->USD record stored; reciprocal of USD->EUR applies
    let result = rates.convert(entity, dec!(100), &eur, &usd).await.unwrap();
    assert_eq!(result.amount, dec!(125.0000));
    assert_eq!(result.provenance.to_string(), "manual_reversed");
}

#[tokio::test]
async fn test_convert_unknown_pair_is_rejected() {
    let rates = RateRepository::new(handle("t1"));
    let err = rates
        .convert(EntityId::new(), dec!(100), &currency("GBP"), &currency("JPY"))
        .await
        .unwrap_err();
    assert!(matches!(err, RateError::NotFound { .. }));
}

#[tokio::test]
async fn test_manual_rate_upsert_is_idempotent() {
    let rates = RateRepository::new(handle("t1"));
    let entity = EntityId::new();
    let (usd, idr) = (currency("USD"), currency("IDR"));

    let first = rates
        .set_manual(entity, &usd, &idr, dec!(15750))
        .await
        .unwrap();
    let second = rates
        .set_manual(entity, &usd, &idr, dec!(15750))
        .await
        .unwrap();

    // Exactly one active record, same identity, source manual
    assert_eq!(first.id, second.id);
    let all = rates.list_active(entity).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].rate, dec!(15750));
    assert_eq!(all[0].source, RateSource::Manual);
}

#[tokio::test]
async fn test_rate_validation() {
    let rates = RateRepository::new(handle("t1"));
    let entity = EntityId::new();

    let err = rates
        .set_manual(entity, &currency("USD"), &currency("EUR"), dec!(0))
        .await
        .unwrap_err();
    assert!(matches!(err, RateError::NonPositiveRate));

    let err = rates
        .set_manual(entity, &currency("USD"), &currency("USD"), dec!(1))
        .await
        .unwrap_err();
    assert!(matches!(err, RateError::SameCurrencyPair));
}

#[tokio::test]
async fn test_deactivated_rate_is_not_resolved() {
    let rates = RateRepository::new(handle("t1"));
    let entity = EntityId::new();
    let (usd, eur) = (currency("USD"), currency("EUR"));

    rates
        .set_manual(entity, &usd, &eur, dec!(0.9))
        .await
        .unwrap();
    assert!(rates.deactivate(entity, &usd, &eur).await.unwrap());

    let err = rates.convert(entity, dec!(10), &usd, &eur).await.unwrap_err();
    assert!(matches!(err, RateError::NotFound { .. }));
}

// ============================================================================
// Entities and accounts
// ============================================================================

#[tokio::test]
async fn test_only_groups_may_own_sisters() {
    let entities = EntityRepository::new(handle("t1"));
    let standalone = entities
        .create_parent(EntityId::new(), NewParentInput {
            name: "Solo Corp".to_string(),
            country: "US".to_string(),
            base_currency: currency("USD"),
            classification: EntityClassification::Standard,
        })
        .await
        .unwrap();

    let err = entities
        .add_sister(
            standalone.id,
            NewSisterInput {
                name: "Branch".to_string(),
                country: "US".to_string(),
                base_currency: currency("USD"),
                ownership_pct: dec!(50),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        vantra_store::repositories::EntityError::NotAGroup(_)
    ));
}

#[tokio::test]
async fn test_sister_lifecycle_soft_delete() {
    let entities = EntityRepository::new(handle("t1"));
    let parent = entities
        .create_parent(EntityId::new(), NewParentInput {
            name: "Group Corp".to_string(),
            country: "ID".to_string(),
            base_currency: currency("IDR"),
            classification: EntityClassification::Group,
        })
        .await
        .unwrap();

    let sister = entities
        .add_sister(
            parent.id,
            NewSisterInput {
                name: "Sister One".to_string(),
                country: "SG".to_string(),
                base_currency: currency("SGD"),
                ownership_pct: dec!(60),
            },
        )
        .await
        .unwrap();
    assert_eq!(sister.parent_id, Some(parent.id));
    assert_eq!(entities.list_active_sisters(parent.id).await.unwrap().len(), 1);

    assert!(entities.deactivate(sister.id).await.unwrap());
    assert!(entities.list_active_sisters(parent.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_account_code_rejected() {
    let accounts = AccountRepository::new(handle("t1"));
    let entity = EntityId::new();
    let input = CreateAccountInput {
        code: "1000".to_string(),
        name: "Cash".to_string(),
        classification: vantra_core::accounts::AccountClassification::Asset,
        category: "current_asset".to_string(),
        opening_balance: dec!(0),
    };

    accounts.create(entity, input.clone()).await.unwrap();
    let err = accounts.create(entity, input.clone()).await.unwrap_err();
    assert!(matches!(err, AccountError::DuplicateCode { .. }));

    // Same code under a different entity is legitimate
    accounts.create(EntityId::new(), input).await.unwrap();
}

#[tokio::test]
async fn test_account_list_preserves_chart_order() {
    let accounts = AccountRepository::new(handle("t1"));
    let entity = EntityId::new();
    for code in ["3000", "1000", "2000"] {
        accounts
            .create(
                entity,
                CreateAccountInput {
                    code: code.to_string(),
                    name: code.to_string(),
                    classification: vantra_core::accounts::AccountClassification::Asset,
                    category: "current_asset".to_string(),
                    opening_balance: dec!(0),
                },
            )
            .await
            .unwrap();
    }

    let codes: Vec<_> = accounts
        .list_active(entity)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.code)
        .collect();
    assert_eq!(codes, vec!["3000", "1000", "2000"]);
}

// ============================================================================
// Tenant isolation
// ============================================================================

#[tokio::test]
async fn test_partitions_never_leak_records() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let h1 = PartitionHandle::new(store.clone(), PartitionId::named("tenant-a"));
    let h2 = PartitionHandle::new(store, PartitionId::named("tenant-b"));
    let entity = EntityId::new();
    let (usd, eur) = (currency("USD"), currency("EUR"));

    RateRepository::new(h1)
        .set_manual(entity, &usd, &eur, dec!(0.9))
        .await
        .unwrap();

    // Identical keys queried through the other partition resolve nothing
    let err = RateRepository::new(h2)
        .convert(entity, dec!(100), &usd, &eur)
        .await
        .unwrap_err();
    assert!(matches!(err, RateError::NotFound { .. }));
}
