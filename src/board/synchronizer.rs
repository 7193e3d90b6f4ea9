//! QuestBoard — mirrors the remote quest collection into local view state and
//! rendered markers.
//!
//! # Threading model
//!
//! Two independent locks: `state` (entry list + map phase) and `clusterer`
//! (the rendering handle). Neither lock is ever held across an `.await`, while
//! invoking the clusterer, or while the change feed fires — mutate, release,
//! then notify.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::clock::Clock;
use crate::map::{MapPhase, Marker, MarkerClusterer};
use crate::store::{QuestStore, UpdateOutcome};
use crate::types::{LatLng, Quest, SyncStatus, Timestamp};

use super::feed::{BoardEvent, ChangeFeed, Unsubscribe};

/// One quest plus its view-state sync status.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardEntry {
    pub quest: Quest,
    pub sync: SyncStatus,
}

struct BoardState {
    /// Insertion-ordered. The remote store is the source of truth; this list
    /// is a best-effort mirror, replaced wholesale by `load` and patched
    /// incrementally by the handlers.
    entries: Vec<BoardEntry>,
    phase: MapPhase,
}

/// The view-state synchronizer.
///
/// Handlers never return `Err` and never wait for a remote acknowledgement
/// before reflecting a change locally. Remote failures surface as logged
/// diagnostics plus [`SyncStatus::Failed`] on the affected entry; there is no
/// rollback, so a failed entry stays visible until the next wholesale
/// [`load`](Self::load).
pub struct QuestBoard {
    store: QuestStore,
    clock: Arc<dyn Clock>,
    state: Mutex<BoardState>,
    /// Present only once the map is ready.
    clusterer: Mutex<Option<Arc<dyn MarkerClusterer>>>,
    feed: Arc<ChangeFeed>,
}

impl QuestBoard {
    /// Construct a board over an explicitly injected accessor and clock — no
    /// globals, no hidden wiring.
    pub fn new(store: QuestStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            state: Mutex::new(BoardState {
                entries: Vec::new(),
                phase: MapPhase::Loading,
            }),
            clusterer: Mutex::new(None),
            feed: Arc::new(ChangeFeed::new()),
        }
    }

    // -----------------------------------------------------------------------
    // Observation
    // -----------------------------------------------------------------------

    /// Register a callback for every [`BoardEvent`].
    pub fn on_change(
        &self,
        callback: impl Fn(&BoardEvent) + Send + Sync + 'static,
    ) -> Unsubscribe {
        self.feed.subscribe(callback)
    }

    /// Snapshot of the current quest list, in insertion order.
    pub fn quests(&self) -> Vec<Quest> {
        self.state
            .lock()
            .entries
            .iter()
            .map(|entry| entry.quest.clone())
            .collect()
    }

    /// Snapshot of the current entries including sync status.
    pub fn entries(&self) -> Vec<BoardEntry> {
        self.state.lock().entries.clone()
    }

    /// Sync status of the entry with the given timestamp, if present.
    pub fn sync_status(&self, timestamp: Timestamp) -> Option<SyncStatus> {
        self.state
            .lock()
            .entries
            .iter()
            .find(|entry| entry.quest.timestamp == timestamp)
            .map(|entry| entry.sync)
    }

    pub fn phase(&self) -> MapPhase {
        self.state.lock().phase.clone()
    }

    // -----------------------------------------------------------------------
    // Map lifecycle
    // -----------------------------------------------------------------------

    /// The external map library finished loading and handed over a clusterer.
    ///
    /// Ignored (and logged) after a terminal load failure. Calling again while
    /// already ready replaces the clusterer and re-renders.
    pub fn map_ready(&self, clusterer: Arc<dyn MarkerClusterer>) {
        {
            let mut state = self.state.lock();
            if state.phase.is_failed() {
                tracing::warn!("map reported ready after a terminal load failure, ignoring");
                return;
            }
            state.phase = MapPhase::Ready;
        }
        *self.clusterer.lock() = Some(clusterer);
        self.render();
    }

    /// The external map library failed to load. Terminal: markers never
    /// render for the rest of the session and later `map_ready` calls are
    /// ignored. The first reason wins.
    pub fn map_failed(&self, reason: impl Into<String>) {
        let reason = reason.into();
        {
            let mut state = self.state.lock();
            if state.phase.is_failed() {
                return;
            }
            tracing::error!(error = %reason, "map library failed to load");
            state.phase = MapPhase::Failed(reason);
        }
        *self.clusterer.lock() = None;
    }

    // -----------------------------------------------------------------------
    // Event handlers
    // -----------------------------------------------------------------------

    /// Replace the local list wholesale from the remote store. Called once on
    /// mount; a remote failure leaves the list empty.
    pub async fn load(&self) {
        let quests = self.store.load_all().await;
        let count = quests.len();
        {
            let mut state = self.state.lock();
            state.entries = quests
                .into_iter()
                .map(|quest| BoardEntry {
                    quest,
                    sync: SyncStatus::Confirmed,
                })
                .collect();
        }
        self.render();
        self.feed.emit(&BoardEvent::Loaded { count });
    }

    /// Map click: append a quest at the click coordinate with the current
    /// clock time, then persist it. The new entry's `predecessor` is the
    /// timestamp of the entry that was last in the list, if any.
    pub async fn handle_map_click(&self, position: LatLng) {
        let quest = {
            let mut state = self.state.lock();
            let quest = Quest {
                location: position,
                timestamp: self.clock.now_ms(),
                predecessor: state.entries.last().map(|entry| entry.quest.timestamp),
            };
            state.entries.push(BoardEntry {
                quest: quest.clone(),
                sync: SyncStatus::Pending,
            });
            quest
        };
        self.render();
        self.feed.emit(&BoardEvent::Added {
            timestamp: quest.timestamp,
        });

        let status = if self.store.add(&quest).await {
            SyncStatus::Confirmed
        } else {
            SyncStatus::Failed
        };
        self.settle(quest.timestamp, status);
    }

    /// Marker drag end: move the entry with the given timestamp, then update
    /// the remote document keyed by that same timestamp.
    ///
    /// Entries are always resolved by their stable id, never by list
    /// position, so a reordered or filtered list can never route the update
    /// to the wrong record.
    pub async fn handle_marker_drag(&self, timestamp: Timestamp, new_position: LatLng) {
        let found = {
            let mut state = self.state.lock();
            match state
                .entries
                .iter_mut()
                .find(|entry| entry.quest.timestamp == timestamp)
            {
                Some(entry) => {
                    entry.quest.location = new_position;
                    true
                }
                None => false,
            }
        };
        if !found {
            tracing::warn!(timestamp, "drag reported for a quest no longer on the board");
            return;
        }
        self.render();
        self.feed.emit(&BoardEvent::Moved { timestamp });

        match self.store.update_location(timestamp, new_position).await {
            UpdateOutcome::Updated => self.settle(timestamp, SyncStatus::Confirmed),
            // Not-found is a soft no-op: the record was deleted while the
            // drag was in flight. The accessor already logged it.
            UpdateOutcome::NotFound => {}
            UpdateOutcome::Failed => self.settle(timestamp, SyncStatus::Failed),
        }
    }

    /// Marker click: remove the entry with the given timestamp locally, then
    /// delete the matching remote document. The remote delete is issued even
    /// if the entry was already gone locally — the store may still hold it.
    pub async fn handle_marker_click(&self, timestamp: Timestamp) {
        let removed = {
            let mut state = self.state.lock();
            let before = state.entries.len();
            state
                .entries
                .retain(|entry| entry.quest.timestamp != timestamp);
            before != state.entries.len()
        };
        if removed {
            self.render();
            self.feed.emit(&BoardEvent::Removed { timestamp });
        }

        // Outcome (including not-found) is logged by the accessor.
        let _ = self.store.delete_one(timestamp).await;
    }

    /// Clear-all: empty the local list, then delete the whole remote
    /// collection in one batch.
    pub async fn clear_all(&self) {
        self.state.lock().entries.clear();
        self.render();
        self.feed.emit(&BoardEvent::Cleared);

        let _ = self.store.delete_all().await;
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    /// Record the result of a settled remote write. The entry may have been
    /// deleted while the write was in flight — then there is nothing to mark.
    fn settle(&self, timestamp: Timestamp, status: SyncStatus) {
        let changed = {
            let mut state = self.state.lock();
            match state
                .entries
                .iter_mut()
                .find(|entry| entry.quest.timestamp == timestamp)
            {
                Some(entry) if entry.sync != status => {
                    entry.sync = status;
                    true
                }
                _ => false,
            }
        };
        if changed {
            self.feed
                .emit(&BoardEvent::SyncStatusChanged { timestamp, status });
        }
    }

    /// Re-create the rendered markers from the current list: clear the
    /// clusterer, then add one draggable marker per quest, labelled with its
    /// 1-based position. No-op until the map is ready.
    fn render(&self) {
        let markers: Vec<Marker> = {
            let state = self.state.lock();
            if !state.phase.is_ready() {
                return;
            }
            state
                .entries
                .iter()
                .enumerate()
                .map(|(i, entry)| Marker {
                    timestamp: entry.quest.timestamp,
                    position: entry.quest.location,
                    label: (i + 1).to_string(),
                    draggable: true,
                })
                .collect()
        };

        let clusterer = self.clusterer.lock().clone();
        let Some(clusterer) = clusterer else { return };
        clusterer.clear_markers();
        for marker in &markers {
            clusterer.add_marker(marker);
        }
    }
}
