//! ChangeFeed tests — subscription, snapshot-on-emit, and panic isolation.

use std::sync::{Arc, Mutex};

use waypost::board::{BoardEvent, ChangeFeed};
use waypost::types::SyncStatus;

/// Helper: a shared call-log that listeners append to.
fn make_log() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

fn added(timestamp: i64) -> BoardEvent {
    BoardEvent::Added { timestamp }
}

// ============================================================================
// Basic subscription
// ============================================================================

#[test]
fn subscribe_registers_listener_and_emit_calls_it() {
    let feed = Arc::new(ChangeFeed::new());
    let log = make_log();
    let log_clone = Arc::clone(&log);

    let _unsub = feed.subscribe(move |event| {
        log_clone.lock().unwrap().push(format!("{event:?}"));
    });

    feed.emit(&BoardEvent::Cleared);

    assert_eq!(*log.lock().unwrap(), vec!["Cleared".to_string()]);
}

#[test]
fn emit_calls_listeners_in_registration_order() {
    let feed = Arc::new(ChangeFeed::new());
    let log = make_log();

    let _unsubs: Vec<_> = ["a", "b", "c"]
        .into_iter()
        .map(|name| {
            let log = Arc::clone(&log);
            feed.subscribe(move |_| log.lock().unwrap().push(name.to_string()))
        })
        .collect();

    feed.emit(&added(1));

    assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn unsubscribe_removes_listener() {
    let feed = Arc::new(ChangeFeed::new());
    let log = make_log();
    let log_clone = Arc::clone(&log);

    let unsub = feed.subscribe(move |_| log_clone.lock().unwrap().push("hit".to_string()));
    assert_eq!(feed.len(), 1);

    unsub();
    assert!(feed.is_empty());

    feed.emit(&added(1));
    assert!(log.lock().unwrap().is_empty());
}

// ============================================================================
// Snapshot semantics during emit
// ============================================================================

#[test]
fn listener_added_during_emit_is_not_called_in_current_round() {
    let feed = Arc::new(ChangeFeed::new());
    let log = make_log();

    let feed_clone = Arc::clone(&feed);
    let log_clone = Arc::clone(&log);
    let _unsub = feed.subscribe(move |_| {
        log_clone.lock().unwrap().push("first".to_string());
        let log2 = Arc::clone(&log_clone);
        // Registered mid-emission: must only fire from the next emit on.
        let _ = feed_clone.subscribe(move |_| log2.lock().unwrap().push("second".to_string()));
    });

    feed.emit(&added(1));

    let entries = log.lock().unwrap().clone();
    assert_eq!(entries, vec!["first"]);
}

#[test]
fn listener_removed_during_emit_still_fires_in_that_round() {
    let feed = Arc::new(ChangeFeed::new());
    let log = make_log();

    let log_first = Arc::clone(&log);
    let unsub_first = feed.subscribe(move |_| log_first.lock().unwrap().push("first".to_string()));

    // Second listener removes the first mid-emission; the snapshot was taken
    // before callbacks ran, so "first" is still called for this event.
    let unsub_slot = Arc::new(Mutex::new(Some(unsub_first)));
    let unsub_clone = Arc::clone(&unsub_slot);
    let log_second = Arc::clone(&log);
    let _unsub_second = feed.subscribe(move |_| {
        log_second.lock().unwrap().push("second".to_string());
        if let Some(unsub) = unsub_clone.lock().unwrap().take() {
            unsub();
        }
    });

    feed.emit(&added(1));
    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);

    // The first listener is gone for the next round.
    feed.emit(&added(2));
    assert_eq!(
        *log.lock().unwrap(),
        vec!["first", "second", "second"]
    );
}

// ============================================================================
// Panic isolation
// ============================================================================

#[test]
fn panicking_listener_does_not_starve_the_rest() {
    let feed = Arc::new(ChangeFeed::new());
    let log = make_log();
    let log_clone = Arc::clone(&log);

    let _unsub_bad = feed.subscribe(|_| panic!("listener exploded"));
    let _unsub_good =
        feed.subscribe(move |_| log_clone.lock().unwrap().push("survived".to_string()));

    feed.emit(&added(1));

    assert_eq!(*log.lock().unwrap(), vec!["survived"]);
}

#[test]
fn emit_with_no_listeners_is_a_no_op() {
    let feed = ChangeFeed::new();
    feed.emit(&BoardEvent::Loaded { count: 3 });
}

// ============================================================================
// BoardEvent accessors
// ============================================================================

#[test]
fn timestamp_accessor_covers_single_entry_events() {
    assert_eq!(added(7).timestamp(), Some(7));
    assert_eq!(BoardEvent::Moved { timestamp: 8 }.timestamp(), Some(8));
    assert_eq!(BoardEvent::Removed { timestamp: 9 }.timestamp(), Some(9));
    assert_eq!(
        BoardEvent::SyncStatusChanged {
            timestamp: 10,
            status: SyncStatus::Confirmed
        }
        .timestamp(),
        Some(10)
    );
    assert_eq!(BoardEvent::Loaded { count: 1 }.timestamp(), None);
    assert_eq!(BoardEvent::Cleared.timestamp(), None);
}
