//! Core data types: coordinates, quest records, and per-entry sync state.

use serde::{Deserialize, Serialize};

/// Epoch milliseconds. Doubles as a quest's identity and, stringified, as its
/// remote document key.
pub type Timestamp = i64;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A user-placed point-of-interest record.
///
/// `timestamp` is assigned once at creation and is unique per record in
/// practice; two creations within the same millisecond collide and the store
/// applies its key semantics (no dedup here).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub location: LatLng,
    pub timestamp: Timestamp,
    /// Timestamp of the entry that was last in the board's list when this
    /// quest was appended. Set exactly when the list was non-empty at append
    /// time, never mutated afterward. The synchronizer itself does not read
    /// it back; consumers may use it to reconstruct insertion order.
    ///
    /// On the wire this is the string field `next` (the deployed collection
    /// schema stores it stringified).
    #[serde(
        rename = "next",
        default,
        skip_serializing_if = "Option::is_none",
        with = "predecessor_string"
    )]
    pub predecessor: Option<Timestamp>,
}

impl Quest {
    /// Remote document key for this quest.
    pub fn key(&self) -> String {
        self.timestamp.to_string()
    }
}

/// `Option<Timestamp>` as an optional decimal string — the `next` wire format.
mod predecessor_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::Timestamp;

    pub fn serialize<S: Serializer>(
        value: &Option<Timestamp>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Timestamp>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| {
            s.parse::<Timestamp>()
                .map_err(|_| de::Error::custom(format!("invalid timestamp string {s:?}")))
        })
        .transpose()
    }
}

/// Synchronization state of a board entry with respect to the remote store.
///
/// View-state only — never persisted. A `Failed` entry stays visible until
/// the next wholesale load; there is no rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Optimistic local write; the remote result is not yet known.
    Pending,
    /// The remote store acknowledged the write.
    Confirmed,
    /// The remote write failed.
    Failed,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
