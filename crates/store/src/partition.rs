//! Partition handles and tenant resolution.
//!
//! A partition is an isolated storage scope holding one group's entities,
//! accounts, and rates. Every engine operation first resolves a
//! [`PartitionHandle`] and performs all reads and writes through that handle
//! exclusively; handles are never mixed within one logical operation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use vantra_shared::types::EntityId;

use crate::backend::RecordStore;
use crate::document::{Collection, Filter};
use crate::error::StoreError;

/// Identifier of a storage partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionId(String);

const SHARED_PARTITION: &str = "shared";

impl PartitionId {
    /// The shared/default partition used before onboarding completes.
    #[must_use]
    pub fn shared() -> Self {
        Self(SHARED_PARTITION.to_string())
    }

    /// Derives the partition id for a parent entity, deterministically.
    #[must_use]
    pub fn for_entity(entity_id: EntityId) -> Self {
        Self(format!("tenant-{}", entity_id.into_inner()))
    }

    /// Creates a partition id from an arbitrary name.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Returns the partition id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the shared/default partition.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.0 == SHARED_PARTITION
    }
}

impl std::fmt::Display for PartitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps a user identity to its partition. Created once at onboarding
/// completion and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionAssignment {
    /// The user identity (case-sensitive as stored).
    pub user_identity: String,
    /// The assigned partition.
    pub partition_id: PartitionId,
    /// When the assignment was created.
    pub created_at: DateTime<Utc>,
}

/// A storage handle bound to exactly one partition.
///
/// All typed reads and writes go through this; the partition cannot change
/// after construction, which is the isolation invariant the engine protects.
#[derive(Clone)]
pub struct PartitionHandle {
    store: Arc<dyn RecordStore>,
    partition: PartitionId,
}

impl PartitionHandle {
    /// Binds a store to a partition.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, partition: PartitionId) -> Self {
        Self { store, partition }
    }

    /// Returns the bound partition id.
    #[must_use]
    pub fn partition(&self) -> &PartitionId {
        &self.partition
    }

    /// Upserts a typed record under `key`.
    pub async fn upsert<T: Serialize + Sync>(
        &self,
        collection: Collection,
        key: &str,
        record: &T,
    ) -> Result<(), StoreError> {
        let doc = serde_json::to_value(record)?;
        self.store
            .upsert(&self.partition, collection, key, doc)
            .await
    }

    /// Finds the first record matching `filter`.
    pub async fn find_one<T: DeserializeOwned>(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<T>, StoreError> {
        match self.store.find_one(&self.partition, collection, filter).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    /// Finds all records matching `filter`, in insertion order.
    pub async fn find_many<T: DeserializeOwned>(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<T>, StoreError> {
        self.store
            .find_many(&self.partition, collection, filter)
            .await?
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(StoreError::from))
            .collect()
    }

    /// Soft-deletes the record under `key`. Returns whether it existed.
    pub async fn deactivate(&self, collection: Collection, key: &str) -> Result<bool, StoreError> {
        self.store.deactivate(&self.partition, collection, key).await
    }
}

impl std::fmt::Debug for PartitionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartitionHandle")
            .field("partition", &self.partition)
            .finish_non_exhaustive()
    }
}

/// Errors from creating a partition assignment.
#[derive(Debug, thiserror::Error)]
pub enum AssignmentError {
    /// The user already has a partition; assignments are write-once.
    #[error("user '{0}' is already assigned to a partition")]
    AlreadyAssigned(String),

    /// Storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolves user identities to partition handles.
///
/// Assignments live in the shared partition (they are the map into the
/// tenants, so they cannot live inside one). A missing assignment is not an
/// error: the user resolves to the shared partition so pre-onboarding reads
/// still function.
#[derive(Clone)]
pub struct TenantResolver {
    store: Arc<dyn RecordStore>,
}

impl TenantResolver {
    /// Creates a resolver over a store.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Returns a handle bound to the shared/default partition.
    #[must_use]
    pub fn shared(&self) -> PartitionHandle {
        PartitionHandle::new(Arc::clone(&self.store), PartitionId::shared())
    }

    /// Resolves the partition handle for a user identity.
    ///
    /// Read-only; absence of an assignment is a valid, silent case that
    /// resolves to the shared partition.
    pub async fn resolve(&self, user_identity: &str) -> Result<PartitionHandle, StoreError> {
        let assignment: Option<PartitionAssignment> = self
            .shared()
            .find_one(
                Collection::PartitionAssignments,
                &Filter::new().eq("user_identity", serde_json::json!(user_identity)),
            )
            .await?;

        let partition = match assignment {
            Some(assignment) => {
                tracing::debug!(user = user_identity, partition = %assignment.partition_id, "resolved tenant partition");
                assignment.partition_id
            }
            None => PartitionId::shared(),
        };

        Ok(PartitionHandle::new(Arc::clone(&self.store), partition))
    }

    /// Creates the write-once assignment for a user at onboarding completion
    /// and returns the handle for the new partition.
    pub async fn assign(
        &self,
        user_identity: &str,
        parent_entity_id: EntityId,
    ) -> Result<PartitionHandle, AssignmentError> {
        let shared = self.shared();
        let existing: Option<PartitionAssignment> = shared
            .find_one(
                Collection::PartitionAssignments,
                &Filter::new().eq("user_identity", serde_json::json!(user_identity)),
            )
            .await?;
        if existing.is_some() {
            return Err(AssignmentError::AlreadyAssigned(user_identity.to_string()));
        }

        let assignment = PartitionAssignment {
            user_identity: user_identity.to_string(),
            partition_id: PartitionId::for_entity(parent_entity_id),
            created_at: Utc::now(),
        };
        shared
            .upsert(
                Collection::PartitionAssignments,
                user_identity,
                &assignment,
            )
            .await?;

        Ok(PartitionHandle::new(
            Arc::clone(&self.store),
            assignment.partition_id,
        ))
    }
}
