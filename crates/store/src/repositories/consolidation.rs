//! Consolidation service: loads the group's charts and aggregates them.
//!
//! The aggregation itself is pure logic in `vantra_core::consolidation`;
//! this service is the partition-bound loader in front of it.

use vantra_core::consolidation::{ConsolidatedLine, SisterChart, consolidate};
use vantra_shared::types::EntityId;

use crate::error::StoreError;
use crate::partition::PartitionHandle;

use super::account::AccountRepository;
use super::entity::{EntityError, EntityRepository};

/// Errors from consolidation.
#[derive(Debug, thiserror::Error)]
pub enum ConsolidationError {
    /// Parent entity does not exist.
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    /// Parent entity is not group-classified; consolidation is refused
    /// before any aggregation work begins.
    #[error("entity {0} is not authorized for consolidation")]
    NotAuthorized(EntityId),

    /// Storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ConsolidationError> for vantra_shared::AppError {
    fn from(err: ConsolidationError) -> Self {
        match err {
            ConsolidationError::EntityNotFound(_) => Self::NotFound(err.to_string()),
            ConsolidationError::NotAuthorized(_) => Self::BusinessRule(err.to_string()),
            ConsolidationError::Store(e) => e.into(),
        }
    }
}

/// Consolidation service, bound to one partition.
#[derive(Debug, Clone)]
pub struct ConsolidationService {
    entities: EntityRepository,
    accounts: AccountRepository,
}

impl ConsolidationService {
    /// Creates a service over a partition handle.
    #[must_use]
    pub fn new(handle: PartitionHandle) -> Self {
        Self {
            entities: EntityRepository::new(handle.clone()),
            accounts: AccountRepository::new(handle),
        }
    }

    /// Produces one consolidated line per parent account code.
    ///
    /// # Errors
    ///
    /// Refused unless the parent exists and is group-classified.
    pub async fn consolidate(
        &self,
        parent_id: EntityId,
    ) -> Result<Vec<ConsolidatedLine>, ConsolidationError> {
        let parent = self
            .entities
            .require_group(parent_id)
            .await
            .map_err(|err| match err {
                EntityError::NotFound(id) => ConsolidationError::EntityNotFound(id),
                EntityError::Store(e) => ConsolidationError::Store(e),
                _ => ConsolidationError::NotAuthorized(parent_id),
            })?;
        let parent_accounts = self.accounts.list_active(parent_id).await?;
        let sisters = self.entities.list_active_sisters(parent_id).await?;

        let mut charts = Vec::with_capacity(sisters.len());
        for sister in sisters {
            let accounts = self.accounts.list_active(sister.id).await?;
            charts.push(SisterChart {
                entity: sister,
                accounts,
            });
        }

        tracing::debug!(
            parent = %parent_id,
            lines = parent_accounts.len(),
            sisters = charts.len(),
            "consolidating group"
        );
        Ok(consolidate(&parent, &parent_accounts, &charts))
    }
}
