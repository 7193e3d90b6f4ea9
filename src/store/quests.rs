//! QuestStore — CRUD accessor for the remote quest collection.
//!
//! Public methods never return `Err`. Every remote operation is wrapped
//! individually; failures are logged and mapped to outcome values the caller
//! can act on without unwinding, so the UI stays responsive when persistence
//! fails.

use std::sync::Arc;

use serde_json::json;

use crate::types::{LatLng, Quest, Timestamp};

use super::traits::DocumentStore;

/// Document field used for equality lookups when deleting by timestamp.
const FIELD_TIMESTAMP: &str = "timestamp";

/// Outcome of [`QuestStore::delete_one`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// No document carries that timestamp — a soft no-op, not an error.
    NotFound,
    /// The lookup or the delete itself failed.
    Failed,
}

/// Outcome of [`QuestStore::update_location`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    /// The document vanished between the optimistic local change and this
    /// call. The operation is aborted; local state keeps its new value until
    /// the next wholesale load.
    NotFound,
    Failed,
}

/// Accessor for one named collection of quest documents, keyed by
/// `timestamp.to_string()`.
pub struct QuestStore {
    backend: Arc<dyn DocumentStore>,
    collection: String,
}

impl QuestStore {
    pub fn new(backend: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            backend,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Fetch every quest in the collection, in backend iteration order.
    ///
    /// Transport failure yields an empty list. A document that does not
    /// decode as a quest is skipped; the rest still load.
    pub async fn load_all(&self) -> Vec<Quest> {
        let docs = match self.backend.get_all(&self.collection).await {
            Ok(docs) => docs,
            Err(e) => {
                tracing::error!(
                    collection = %self.collection,
                    error = %e,
                    "failed to load quests"
                );
                return Vec::new();
            }
        };

        let mut quests = Vec::with_capacity(docs.len());
        for doc in docs {
            match serde_json::from_value::<Quest>(doc.body) {
                Ok(quest) => quests.push(quest),
                Err(e) => {
                    tracing::warn!(
                        collection = %self.collection,
                        key = %doc.key,
                        error = %e,
                        "skipping quest document that failed to decode"
                    );
                }
            }
        }
        quests
    }

    /// Insert `quest` under its derived key. No server-side existence check —
    /// a same-millisecond key collision follows the backend's key semantics.
    ///
    /// Returns whether the write succeeded.
    pub async fn add(&self, quest: &Quest) -> bool {
        let body = match serde_json::to_value(quest) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(
                    collection = %self.collection,
                    timestamp = quest.timestamp,
                    error = %e,
                    "failed to encode quest"
                );
                return false;
            }
        };

        match self.backend.insert(&self.collection, &quest.key(), body).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    collection = %self.collection,
                    key = %quest.key(),
                    error = %e,
                    "failed to add quest"
                );
                false
            }
        }
    }

    /// Enumerate all documents and delete them in one batched operation,
    /// atomic as a unit.
    ///
    /// Returns the number of deleted documents, or `None` on failure.
    pub async fn delete_all(&self) -> Option<usize> {
        let docs = match self.backend.get_all(&self.collection).await {
            Ok(docs) => docs,
            Err(e) => {
                tracing::error!(
                    collection = %self.collection,
                    error = %e,
                    "failed to enumerate quests for clear-all"
                );
                return None;
            }
        };

        let keys: Vec<String> = docs.into_iter().map(|doc| doc.key).collect();
        match self.backend.delete_batch(&self.collection, &keys).await {
            Ok(()) => {
                tracing::info!(
                    collection = %self.collection,
                    deleted = keys.len(),
                    "cleared quest collection"
                );
                Some(keys.len())
            }
            Err(e) => {
                tracing::error!(
                    collection = %self.collection,
                    error = %e,
                    "failed to clear quest collection"
                );
                None
            }
        }
    }

    /// Delete the document whose `timestamp` field equals the given value
    /// (equality query, limit 1).
    pub async fn delete_one(&self, timestamp: Timestamp) -> DeleteOutcome {
        let found = match self
            .backend
            .find_by_field(&self.collection, FIELD_TIMESTAMP, &json!(timestamp))
            .await
        {
            Ok(found) => found,
            Err(e) => {
                tracing::error!(
                    collection = %self.collection,
                    timestamp,
                    error = %e,
                    "failed to look up quest for delete"
                );
                return DeleteOutcome::Failed;
            }
        };

        let Some(doc) = found else {
            tracing::warn!(
                collection = %self.collection,
                timestamp,
                "no quest found to delete"
            );
            return DeleteOutcome::NotFound;
        };

        match self.backend.delete(&self.collection, &doc.key).await {
            Ok(()) => DeleteOutcome::Deleted,
            Err(e) => {
                tracing::error!(
                    collection = %self.collection,
                    key = %doc.key,
                    error = %e,
                    "failed to delete quest"
                );
                DeleteOutcome::Failed
            }
        }
    }

    /// Update only the location field of the document under the derived key,
    /// after verifying the document still exists.
    pub async fn update_location(
        &self,
        timestamp: Timestamp,
        location: LatLng,
    ) -> UpdateOutcome {
        let key = timestamp.to_string();

        let existing = match self.backend.get(&self.collection, &key).await {
            Ok(existing) => existing,
            Err(e) => {
                tracing::error!(
                    collection = %self.collection,
                    key = %key,
                    error = %e,
                    "failed to check quest before location update"
                );
                return UpdateOutcome::Failed;
            }
        };

        if existing.is_none() {
            tracing::warn!(
                collection = %self.collection,
                key = %key,
                "quest missing in remote store, skipping location update"
            );
            return UpdateOutcome::NotFound;
        }

        let patch = json!({ "location": location });
        match self.backend.update(&self.collection, &key, patch).await {
            Ok(()) => UpdateOutcome::Updated,
            Err(e) => {
                tracing::error!(
                    collection = %self.collection,
                    key = %key,
                    error = %e,
                    "failed to update quest location"
                );
                UpdateOutcome::Failed
            }
        }
    }
}
