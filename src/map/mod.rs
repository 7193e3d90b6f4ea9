//! Map-facing types: marker descriptors, the clustering collaborator, and the
//! map readiness state machine.

pub mod marker;
pub mod phase;

pub use marker::{Marker, MarkerClusterer};
pub use phase::MapPhase;
