//! # stash-store
//!
//! The goal state engine for Stash: per-user savings goal collections,
//! the last-interacted-goal pointer, and the operations that mutate and
//! query them.
//!
//! ## Key components
//!
//! - [`Goal`] / [`UserState`] — the per-user data model
//! - [`GoalStore`] — create / contribute / list / progress / delete,
//!   persisting the full snapshot after every mutation
//! - [`resolver`] — pure resolution of which goal an operation targets
//! - [`SnapshotStore`] — JSON file persistence for the full state document
//! - [`StashEvent`] / [`EventDispatcher`] — notifications at state changes

pub mod error;
pub mod events;
pub mod goal;
pub mod resolver;
pub mod snapshot;
pub mod store;

pub use error::StoreError;
pub use events::{EventDispatcher, LogSink, NotificationSink, StashEvent};
pub use goal::{normalize_name, Goal, UserState};
pub use snapshot::SnapshotStore;
pub use store::{Contribution, GoalStore};
