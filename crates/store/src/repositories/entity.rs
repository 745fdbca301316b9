//! Company entity repository: parents, sisters, and the ownership tree.

use rust_decimal::Decimal;
use serde_json::json;

use vantra_core::entity::{CompanyEntity, EntityClassification, validate_ownership_pct};
use vantra_shared::types::{CurrencyCode, EntityId};

use crate::document::{Collection, Filter};
use crate::error::StoreError;
use crate::partition::PartitionHandle;

/// Errors from entity operations.
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    /// Entity does not exist (or is inactive).
    #[error("entity {0} not found")]
    NotFound(EntityId),

    /// Only group-classified entities may own sister companies.
    #[error("entity {0} is not a group and cannot own sister companies")]
    NotAGroup(EntityId),

    /// Ownership percentage must be in (0, 100].
    #[error("invalid ownership percentage: {0}")]
    InvalidOwnership(Decimal),

    /// Storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<EntityError> for vantra_shared::AppError {
    fn from(err: EntityError) -> Self {
        match err {
            EntityError::NotFound(_) => Self::NotFound(err.to_string()),
            EntityError::NotAGroup(_) => Self::BusinessRule(err.to_string()),
            EntityError::InvalidOwnership(_) => Self::Validation(err.to_string()),
            EntityError::Store(e) => e.into(),
        }
    }
}

/// Input for creating a parent entity at onboarding.
#[derive(Debug, Clone)]
pub struct NewParentInput {
    /// Display name.
    pub name: String,
    /// ISO country code.
    pub country: String,
    /// Functional currency.
    pub base_currency: CurrencyCode,
    /// Business classification; `Group` permits sisters and consolidation.
    pub classification: EntityClassification,
}

/// Input for adding a sister company under a group parent.
#[derive(Debug, Clone)]
pub struct NewSisterInput {
    /// Display name.
    pub name: String,
    /// ISO country code.
    pub country: String,
    /// Functional currency.
    pub base_currency: CurrencyCode,
    /// Ownership percentage held by the parent, in (0, 100].
    pub ownership_pct: Decimal,
}

/// Entity repository, bound to one partition.
#[derive(Debug, Clone)]
pub struct EntityRepository {
    handle: PartitionHandle,
}

impl EntityRepository {
    /// Creates a repository over a partition handle.
    #[must_use]
    pub fn new(handle: PartitionHandle) -> Self {
        Self { handle }
    }

    /// Creates a parent entity. Called once per tenant, at onboarding.
    ///
    /// The id is supplied by the caller because the tenant partition id is
    /// derived from it before the entity record exists.
    pub async fn create_parent(
        &self,
        id: EntityId,
        input: NewParentInput,
    ) -> Result<CompanyEntity, StoreError> {
        let entity = CompanyEntity {
            id,
            name: input.name,
            country: input.country,
            base_currency: input.base_currency,
            classification: input.classification,
            parent_id: None,
            ownership_pct: Decimal::ONE_HUNDRED,
            active: true,
        };
        self.insert(&entity).await?;
        Ok(entity)
    }

    /// Adds a sister company under `parent_id`.
    ///
    /// # Errors
    ///
    /// Fails when the parent is missing, is not a group, or the ownership
    /// percentage is out of range.
    pub async fn add_sister(
        &self,
        parent_id: EntityId,
        input: NewSisterInput,
    ) -> Result<CompanyEntity, EntityError> {
        let parent = self.require_group(parent_id).await?;
        if !validate_ownership_pct(input.ownership_pct) {
            return Err(EntityError::InvalidOwnership(input.ownership_pct));
        }

        let sister = CompanyEntity {
            id: EntityId::new(),
            name: input.name,
            country: input.country,
            base_currency: input.base_currency,
            classification: EntityClassification::Standard,
            parent_id: Some(parent.id),
            ownership_pct: input.ownership_pct,
            active: true,
        };
        self.insert(&sister).await?;
        Ok(sister)
    }

    async fn insert(&self, entity: &CompanyEntity) -> Result<(), StoreError> {
        self.handle
            .upsert(Collection::Entities, &entity.id.to_string(), entity)
            .await
    }

    /// Finds an active entity by id.
    pub async fn find_active(&self, id: EntityId) -> Result<Option<CompanyEntity>, StoreError> {
        self.handle
            .find_one(
                Collection::Entities,
                &Filter::new().eq("id", json!(id)).active_only(),
            )
            .await
    }

    /// Loads an entity and verifies it is group-classified.
    pub async fn require_group(&self, id: EntityId) -> Result<CompanyEntity, EntityError> {
        let entity = self
            .find_active(id)
            .await?
            .ok_or(EntityError::NotFound(id))?;
        if !entity.is_group() {
            return Err(EntityError::NotAGroup(id));
        }
        Ok(entity)
    }

    /// Lists the active sister companies of a parent, in creation order.
    pub async fn list_active_sisters(
        &self,
        parent_id: EntityId,
    ) -> Result<Vec<CompanyEntity>, StoreError> {
        self.handle
            .find_many(
                Collection::Entities,
                &Filter::new().eq("parent_id", json!(parent_id)).active_only(),
            )
            .await
    }

    /// Soft-deletes an entity; historical ledger references stay intact.
    pub async fn deactivate(&self, id: EntityId) -> Result<bool, StoreError> {
        self.handle
            .deactivate(Collection::Entities, &id.to_string())
            .await
    }
}
