//! BoardEvent + ChangeFeed — synchronous pub/sub for board mutations.
//!
//! A snapshot of the listener list is taken under the lock and the lock is
//! released before any callback runs, so listeners can subscribe or
//! unsubscribe reentrantly:
//!   - a listener removed *during* emission is still called in that round;
//!   - a listener added *during* emission is not called until the next emit.
//!
//! Listener panics are caught — one misbehaving subscriber must not break the
//! mutation that triggered the event.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::types::{SyncStatus, Timestamp};

/// A mutation of the board's quest list or of an entry's sync state.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    /// The list was replaced wholesale from the remote store.
    Loaded { count: usize },
    /// A quest was appended optimistically.
    Added { timestamp: Timestamp },
    /// A quest's location changed via drag.
    Moved { timestamp: Timestamp },
    /// A quest was removed via marker click.
    Removed { timestamp: Timestamp },
    /// The whole list was emptied.
    Cleared,
    /// A remote write settled (or failed) for one entry.
    SyncStatusChanged {
        timestamp: Timestamp,
        status: SyncStatus,
    },
}

impl BoardEvent {
    /// The timestamp of the affected entry, for single-entry events.
    pub fn timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::Added { timestamp }
            | Self::Moved { timestamp }
            | Self::Removed { timestamp }
            | Self::SyncStatusChanged { timestamp, .. } => Some(*timestamp),
            Self::Loaded { .. } | Self::Cleared => None,
        }
    }
}

/// An owned one-shot closure that removes a subscription when called.
pub type Unsubscribe = Box<dyn FnOnce() + Send + Sync>;

type ListenerFn = dyn Fn(&BoardEvent) + Send + Sync;

/// Synchronous pub/sub for [`BoardEvent`]s.
pub struct ChangeFeed {
    listeners: Mutex<Vec<(u64, Arc<ListenerFn>)>>,
    next_id: AtomicU64,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register `callback` and return the closure that removes it again.
    pub fn subscribe(
        self: &Arc<Self>,
        callback: impl Fn(&BoardEvent) + Send + Sync + 'static,
    ) -> Unsubscribe {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push((id, Arc::new(callback)));

        let feed = Arc::clone(self);
        Box::new(move || {
            feed.listeners.lock().retain(|(lid, _)| *lid != id);
        })
    }

    /// Deliver `event` to all currently registered listeners.
    pub fn emit(&self, event: &BoardEvent) {
        // Snapshot Arc references under the lock (cheap ref-count bumps),
        // then release it so callbacks can re-enter the feed.
        let snapshot: Vec<Arc<ListenerFn>> = {
            let guard = self.listeners.lock();
            guard.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for cb in snapshot {
            let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| cb(event)));
        }
    }

    /// Number of currently registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}
