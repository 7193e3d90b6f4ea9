//! The remote document store seam.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// One stored document: its key plus its JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub key: String,
    pub body: Value,
}

impl Document {
    pub fn new(key: impl Into<String>, body: Value) -> Self {
        Self {
            key: key.into(),
            body,
        }
    }
}

/// Collection-scoped document store.
///
/// Implementations handle the actual backend — a hosted document database in
/// production, [`super::MemoryStore`] in tests. Every call may fail
/// asynchronously; callers decide what a failure means for them.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in `collection`, in backend iteration order (no ordering
    /// guarantee).
    async fn get_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// The document stored under `key`, if any.
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError>;

    /// Store `body` under `key`. Key collisions follow backend semantics;
    /// no existence check is performed first.
    async fn insert(&self, collection: &str, key: &str, body: Value) -> Result<(), StoreError>;

    /// Merge the top-level fields of `patch` into the document under `key`.
    /// Fails with [`StoreError::NotFound`] if the document does not exist.
    async fn update(&self, collection: &str, key: &str, patch: Value) -> Result<(), StoreError>;

    /// The first document whose top-level `field` equals `value`, if any
    /// (equality match, limit 1).
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Option<Document>, StoreError>;

    /// Delete the document under `key`. Deleting an absent key is a no-op.
    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError>;

    /// Delete every listed key in one batch, atomic as a unit: either all
    /// listed keys are gone afterwards or none are.
    async fn delete_batch(&self, collection: &str, keys: &[String]) -> Result<(), StoreError>;
}
