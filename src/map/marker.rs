//! Marker descriptors and the clustering collaborator.

use crate::types::{LatLng, Timestamp};

/// The on-map visual representation of a quest.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Stable identity of the quest this marker represents. UI callbacks
    /// report this id — never a list position.
    pub timestamp: Timestamp,
    pub position: LatLng,
    /// 1-based list position, shown on the marker face.
    pub label: String,
    pub draggable: bool,
}

/// Visual grouping aggregator for markers.
///
/// Purely presentational — implementations group nearby markers at low zoom
/// levels and never touch the quest list. The board clears and repopulates it
/// wholesale on every render pass.
pub trait MarkerClusterer: Send + Sync {
    fn add_marker(&self, marker: &Marker);
    fn clear_markers(&self);
}
