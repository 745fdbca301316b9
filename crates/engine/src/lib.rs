//! Engine facade for the Vantra financial resolution core.
//!
//! The engine wires the record store, tenant resolver, rate fetcher, and
//! reference templates together and exposes the operations the (out of
//! scope) request-handling layer calls:
//!
//! - `resolve_partition` - user identity to partition handle
//! - `convert` / `refresh_rates` / `set_manual_rate` / `list_rates`
//! - `consolidate`
//! - onboarding and sister-company lifecycle
//!
//! Every operation takes one partition handle and performs all reads and
//! writes through it; handles are never mixed within an operation.

pub mod error;
pub mod onboarding;

use std::sync::Arc;

use rust_decimal::Decimal;

use vantra_core::accounts::{AccountRecord, ReferenceDataProvider, StaticTemplates};
use vantra_core::consolidation::ConsolidatedLine;
use vantra_core::currency::{
    ConversionResult, ExchangeRate, FetchError, HttpRateFetcher, RateFetcher,
};
use vantra_core::entity::CompanyEntity;
use vantra_shared::AppConfig;
use vantra_shared::types::{AccountId, CurrencyCode, EntityId};
use vantra_store::repositories::{
    AccountError, AccountRepository, ConsolidationError, ConsolidationService, CreateAccountInput,
    EntityError, EntityRepository, NewSisterInput, RateError, RateRepository, RefreshOutcome,
};
use vantra_store::{MemoryStore, PartitionHandle, RecordStore, StoreError, TenantResolver};

pub use onboarding::{OnboardingError, OnboardingInput};

/// Errors from engine construction.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The configured store backend is not known.
    #[error("unsupported store backend '{0}'")]
    UnsupportedBackend(String),

    /// The rate provider client could not be constructed.
    #[error(transparent)]
    Fetcher(#[from] FetchError),
}

/// The multi-entity financial resolution engine.
#[derive(Clone)]
pub struct Engine {
    tenants: TenantResolver,
    fetcher: Arc<dyn RateFetcher>,
    templates: Arc<dyn ReferenceDataProvider>,
}

impl Engine {
    /// Creates an engine over explicit collaborators.
    #[must_use]
    pub fn new(
        store: Arc<dyn RecordStore>,
        fetcher: Arc<dyn RateFetcher>,
        templates: Arc<dyn ReferenceDataProvider>,
    ) -> Self {
        Self {
            tenants: TenantResolver::new(store),
            fetcher,
            templates,
        }
    }

    /// Creates an engine from application configuration.
    ///
    /// # Errors
    ///
    /// Fails on an unknown store backend or a fetcher that cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, EngineError> {
        let store: Arc<dyn RecordStore> = match config.store.backend.as_str() {
            "memory" => Arc::new(MemoryStore::new()),
            other => return Err(EngineError::UnsupportedBackend(other.to_string())),
        };
        let fetcher = HttpRateFetcher::from_config(&config.rates)?;
        Ok(Self::new(store, Arc::new(fetcher), Arc::new(StaticTemplates)))
    }

    /// Resolves the partition handle for a user identity.
    ///
    /// A user without an assignment resolves to the shared partition; that
    /// is a valid, silent case, not an error.
    pub async fn resolve_partition(
        &self,
        user_identity: &str,
    ) -> Result<PartitionHandle, StoreError> {
        self.tenants.resolve(user_identity).await
    }

    // ------------------------------------------------------------------
    // Exchange rates
    // ------------------------------------------------------------------

    /// Converts an amount between currencies for an owning entity.
    pub async fn convert(
        &self,
        partition: &PartitionHandle,
        amount: Decimal,
        from: &CurrencyCode,
        to: &CurrencyCode,
        entity_id: EntityId,
    ) -> Result<ConversionResult, RateError> {
        RateRepository::new(partition.clone())
            .convert(entity_id, amount, from, to)
            .await
    }

    /// Refreshes stored rates for a base currency against target currencies.
    pub async fn refresh_rates(
        &self,
        partition: &PartitionHandle,
        entity_id: EntityId,
        base: &CurrencyCode,
        targets: &[CurrencyCode],
    ) -> Result<RefreshOutcome, RateError> {
        RateRepository::new(partition.clone())
            .refresh(entity_id, base, targets, self.fetcher.as_ref())
            .await
    }

    /// Sets one rate manually, bypassing any fetch.
    pub async fn set_manual_rate(
        &self,
        partition: &PartitionHandle,
        entity_id: EntityId,
        base: &CurrencyCode,
        target: &CurrencyCode,
        rate: Decimal,
    ) -> Result<ExchangeRate, RateError> {
        RateRepository::new(partition.clone())
            .set_manual(entity_id, base, target, rate)
            .await
    }

    /// Lists an entity's active stored rates.
    pub async fn list_rates(
        &self,
        partition: &PartitionHandle,
        entity_id: EntityId,
    ) -> Result<Vec<ExchangeRate>, StoreError> {
        RateRepository::new(partition.clone())
            .list_active(entity_id)
            .await
    }

    // ------------------------------------------------------------------
    // Consolidation
    // ------------------------------------------------------------------

    /// Consolidates a group parent's chart with its active sisters.
    pub async fn consolidate(
        &self,
        partition: &PartitionHandle,
        parent_entity_id: EntityId,
    ) -> Result<Vec<ConsolidatedLine>, ConsolidationError> {
        ConsolidationService::new(partition.clone())
            .consolidate(parent_entity_id)
            .await
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Completes onboarding for a user: creates the parent entity, seeds its
    /// chart of accounts, and binds the user to a fresh partition.
    ///
    /// Returns the new parent entity and its partition handle.
    ///
    /// # Errors
    ///
    /// A second onboarding for the same user is a conflict.
    pub async fn complete_onboarding(
        &self,
        user_identity: &str,
        input: OnboardingInput,
    ) -> Result<(CompanyEntity, PartitionHandle), OnboardingError> {
        onboarding::complete(
            &self.tenants,
            self.templates.as_ref(),
            user_identity,
            input,
        )
        .await
    }

    /// Adds a sister company under a group parent and seeds its chart.
    pub async fn add_sister_company(
        &self,
        partition: &PartitionHandle,
        parent_id: EntityId,
        input: NewSisterInput,
    ) -> Result<CompanyEntity, EntityError> {
        let country = input.country.clone();
        let sister = EntityRepository::new(partition.clone())
            .add_sister(parent_id, input)
            .await?;

        let seeds = self
            .templates
            .seed_accounts(self.templates.template_for_country(&country));
        AccountRepository::new(partition.clone())
            .seed_from_template(sister.id, &seeds)
            .await?;

        tracing::info!(parent = %parent_id, sister = %sister.id, "added sister company");
        Ok(sister)
    }

    /// Soft-deletes a sister company.
    pub async fn deactivate_sister(
        &self,
        partition: &PartitionHandle,
        sister_id: EntityId,
    ) -> Result<bool, StoreError> {
        EntityRepository::new(partition.clone())
            .deactivate(sister_id)
            .await
    }

    /// Creates a single account under an entity.
    pub async fn create_account(
        &self,
        partition: &PartitionHandle,
        entity_id: EntityId,
        input: CreateAccountInput,
    ) -> Result<AccountRecord, AccountError> {
        AccountRepository::new(partition.clone())
            .create(entity_id, input)
            .await
    }

    /// Soft-deactivates an account.
    pub async fn deactivate_account(
        &self,
        partition: &PartitionHandle,
        account_id: AccountId,
    ) -> Result<bool, StoreError> {
        AccountRepository::new(partition.clone())
            .deactivate(account_id)
            .await
    }
}
