//! MemoryStore — an in-memory `DocumentStore`.
//!
//! Backs tests and local runs. All state lives in HashMaps behind a single
//! `parking_lot::Mutex`; each operation takes the lock exactly once, which
//! makes `delete_batch` atomic by construction.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::StoreError;

use super::traits::{Document, DocumentStore};

/// In-memory document store.
///
/// Iteration order is key order (`BTreeMap`) — a stable order, but
/// deliberately *not* insertion order; callers must not depend on it, matching
/// the no-ordering-guarantee contract of the trait.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, BTreeMap<String, Value>>>,
}

/// Merge the top-level fields of `patch` into `base`. Non-object bodies or
/// patches are replaced wholesale.
fn merge_fields(base: Value, patch: Value) -> Value {
    match (base, patch) {
        (Value::Object(mut target), Value::Object(fields)) => {
            for (field, value) in fields {
                target.insert(field, value);
            }
            Value::Object(target)
        }
        (_, patch) => patch,
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.lock();
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(key, body)| Document::new(key.clone(), body.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.lock();
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(key))
            .map(|body| Document::new(key, body.clone())))
    }

    async fn insert(&self, collection: &str, key: &str, body: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.lock();
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), body);
        Ok(())
    }

    async fn update(&self, collection: &str, key: &str, patch: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.lock();
        let body = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(key))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                key: key.to_string(),
            })?;

        *body = merge_fields(body.take(), patch);
        Ok(())
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.lock();
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|(_, body)| body.get(field) == Some(value))
                .map(|(key, body)| Document::new(key.clone(), body.clone()))
        }))
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.lock();
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(key);
        }
        Ok(())
    }

    async fn delete_batch(&self, collection: &str, keys: &[String]) -> Result<(), StoreError> {
        // Single lock acquisition: the whole batch lands or none of it does.
        let mut collections = self.collections.lock();
        if let Some(docs) = collections.get_mut(collection) {
            for key in keys {
                docs.remove(key);
            }
        }
        Ok(())
    }
}
