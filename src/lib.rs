//! waypost — the synchronization layer between an interactive quest map and a
//! remote document collection.
//!
//! # Overview
//!
//! Users drop markers ("quests") on a map, drag them around, click them away,
//! or clear the whole collection. This crate owns everything between those UI
//! events and the remote store:
//!
//! - [`store::QuestStore`] — CRUD accessor for the remote quest collection,
//!   over an injected [`store::DocumentStore`] backend.
//! - [`board::QuestBoard`] — the view-state synchronizer: the authoritative
//!   in-session quest list, optimistic event handlers, per-entry sync status,
//!   and marker rendering through a [`map::MarkerClusterer`].
//!
//! Remote failures never unwind into a UI action that has already been applied
//! optimistically; they are logged and reflected in per-entry
//! [`types::SyncStatus`].

pub mod board;
pub mod clock;
pub mod config;
pub mod error;
pub mod map;
pub mod store;
pub mod types;
