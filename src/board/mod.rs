//! Board layer — the view-state synchronizer and its change feed.
//!
//! # Overview
//!
//! [`QuestBoard`] owns the authoritative in-session quest list and reconciles
//! it with the remote collection and with rendered markers. Handlers are
//! optimistic: local state changes and markers re-render before the remote
//! write is issued, and a remote failure never undoes the local change.
//!
//! [`ChangeFeed`] delivers [`BoardEvent`]s synchronously to subscribers — the
//! hook a UI shell uses to repaint anything outside the clusterer.

pub mod feed;
pub mod synchronizer;

pub use feed::{BoardEvent, ChangeFeed, Unsubscribe};
pub use synchronizer::{BoardEntry, QuestBoard};
