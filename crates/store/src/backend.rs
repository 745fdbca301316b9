//! The record-store contract.

use async_trait::async_trait;
use serde_json::Value;

use crate::document::{Collection, Filter};
use crate::error::StoreError;
use crate::partition::PartitionId;

/// Storage backend contract: upsert-by-key, find-by-filter, and soft delete
/// over logical collections, scoped by partition.
///
/// Backends must keep per-collection insertion order stable: `find_many`
/// returns matches in the order their keys were first written, which is what
/// makes a parent's chart order deterministic for consolidation.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts or replaces the document stored under `key`.
    ///
    /// Replacement happens in place; the key keeps its original position in
    /// the collection's insertion order. Each upsert commits independently.
    async fn upsert(
        &self,
        partition: &PartitionId,
        collection: Collection,
        key: &str,
        doc: Value,
    ) -> Result<(), StoreError>;

    /// Returns the first document matching `filter`, if any.
    async fn find_one(
        &self,
        partition: &PartitionId,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Value>, StoreError>;

    /// Returns all documents matching `filter`, in insertion order.
    async fn find_many(
        &self,
        partition: &PartitionId,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Value>, StoreError>;

    /// Flips the document's active flag to false. Returns whether the key
    /// existed.
    async fn deactivate(
        &self,
        partition: &PartitionId,
        collection: Collection,
        key: &str,
    ) -> Result<bool, StoreError>;
}
