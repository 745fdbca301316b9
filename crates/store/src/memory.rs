//! In-memory record store backend.
//!
//! Used for development and tests. Collections preserve insertion order;
//! upserts replace documents in place so keys keep their original position.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use crate::backend::RecordStore;
use crate::document::{Collection, Filter};
use crate::error::StoreError;
use crate::partition::PartitionId;

type CollectionKey = (String, &'static str);

/// In-memory implementation of [`RecordStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<CollectionKey, Vec<(String, Value)>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn collection_key(partition: &PartitionId, collection: Collection) -> CollectionKey {
        (partition.as_str().to_string(), collection.as_str())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn upsert(
        &self,
        partition: &PartitionId,
        collection: Collection,
        key: &str,
        doc: Value,
    ) -> Result<(), StoreError> {
        let mut entry = self
            .collections
            .entry(Self::collection_key(partition, collection))
            .or_default();

        if let Some(slot) = entry.iter_mut().find(|(k, _)| k == key) {
            slot.1 = doc;
        } else {
            entry.push((key.to_string(), doc));
        }
        Ok(())
    }

    async fn find_one(
        &self,
        partition: &PartitionId,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Value>, StoreError> {
        Ok(self
            .collections
            .get(&Self::collection_key(partition, collection))
            .and_then(|entry| {
                entry
                    .iter()
                    .find(|(_, doc)| filter.matches(doc))
                    .map(|(_, doc)| doc.clone())
            }))
    }

    async fn find_many(
        &self,
        partition: &PartitionId,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Value>, StoreError> {
        Ok(self
            .collections
            .get(&Self::collection_key(partition, collection))
            .map(|entry| {
                entry
                    .iter()
                    .filter(|(_, doc)| filter.matches(doc))
                    .map(|(_, doc)| doc.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn deactivate(
        &self,
        partition: &PartitionId,
        collection: Collection,
        key: &str,
    ) -> Result<bool, StoreError> {
        let Some(mut entry) = self
            .collections
            .get_mut(&Self::collection_key(partition, collection))
        else {
            return Ok(false);
        };

        match entry.iter_mut().find(|(k, _)| k == key) {
            Some((_, doc)) => {
                if let Some(obj) = doc.as_object_mut() {
                    obj.insert("active".to_string(), Value::Bool(false));
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn partition(name: &str) -> PartitionId {
        PartitionId::named(name)
    }

    #[tokio::test]
    async fn test_upsert_replaces_in_place() {
        let store = MemoryStore::new();
        let p = partition("p1");

        store
            .upsert(&p, Collection::Accounts, "a", json!({"code": "1000", "v": 1}))
            .await
            .unwrap();
        store
            .upsert(&p, Collection::Accounts, "b", json!({"code": "2000", "v": 1}))
            .await
            .unwrap();
        store
            .upsert(&p, Collection::Accounts, "a", json!({"code": "1000", "v": 2}))
            .await
            .unwrap();

        let all = store
            .find_many(&p, Collection::Accounts, &Filter::new())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        // Replaced document keeps its original position
        assert_eq!(all[0]["code"], "1000");
        assert_eq!(all[0]["v"], 2);
    }

    #[tokio::test]
    async fn test_find_many_preserves_insertion_order() {
        let store = MemoryStore::new();
        let p = partition("p1");
        for code in ["4000", "1000", "2000"] {
            store
                .upsert(&p, Collection::Accounts, code, json!({"code": code}))
                .await
                .unwrap();
        }

        let codes: Vec<_> = store
            .find_many(&p, Collection::Accounts, &Filter::new())
            .await
            .unwrap()
            .into_iter()
            .map(|doc| doc["code"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(codes, vec!["4000", "1000", "2000"]);
    }

    #[tokio::test]
    async fn test_partitions_are_isolated() {
        let store = MemoryStore::new();
        store
            .upsert(&partition("p1"), Collection::Entities, "e", json!({"n": 1}))
            .await
            .unwrap();

        let other = store
            .find_many(&partition("p2"), Collection::Entities, &Filter::new())
            .await
            .unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_deactivate_flips_flag() {
        let store = MemoryStore::new();
        let p = partition("p1");
        store
            .upsert(&p, Collection::Accounts, "a", json!({"active": true}))
            .await
            .unwrap();

        assert!(store.deactivate(&p, Collection::Accounts, "a").await.unwrap());
        assert!(!store.deactivate(&p, Collection::Accounts, "missing").await.unwrap());

        let active = store
            .find_many(&p, Collection::Accounts, &Filter::new().active_only())
            .await
            .unwrap();
        assert!(active.is_empty());
    }
}
