// events.rs — Domain events and notification dispatch.
//
// Stash emits an event whenever goal state changes. Notification sinks
// (the JSONL event log today, a webhook or chat transport later)
// subscribe to these. Sink failures are logged and never fail the
// operation that produced the event; events are advisory and are never
// read back to reconstruct state.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::goal::Goal;

/// Events emitted at goal state changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum StashEvent {
    /// A new goal was created.
    GoalCreated {
        user_id: String,
        name: String,
        target: f64,
        timestamp: DateTime<Utc>,
    },

    /// An amount was added to a goal.
    ContributionAdded {
        user_id: String,
        name: String,
        amount: f64,
        saved: f64,
        timestamp: DateTime<Utc>,
    },

    /// A contribution left the goal at or past its target.
    /// Emitted for every such contribution, not only the first.
    GoalReached {
        user_id: String,
        name: String,
        target: f64,
        timestamp: DateTime<Utc>,
    },

    /// A goal was deleted.
    GoalDeleted {
        user_id: String,
        name: String,
        saved: f64,
        timestamp: DateTime<Utc>,
    },
}

impl StashEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            StashEvent::GoalCreated { .. } => "goal_created",
            StashEvent::ContributionAdded { .. } => "contribution_added",
            StashEvent::GoalReached { .. } => "goal_reached",
            StashEvent::GoalDeleted { .. } => "goal_deleted",
        }
    }

    /// Helper to create a GoalCreated event.
    pub fn goal_created(user_id: &str, goal: &Goal) -> Self {
        StashEvent::GoalCreated {
            user_id: user_id.to_string(),
            name: goal.name.clone(),
            target: goal.target,
            timestamp: Utc::now(),
        }
    }

    /// Helper to create a ContributionAdded event.
    pub fn contribution_added(user_id: &str, goal: &Goal, amount: f64) -> Self {
        StashEvent::ContributionAdded {
            user_id: user_id.to_string(),
            name: goal.name.clone(),
            amount,
            saved: goal.saved,
            timestamp: Utc::now(),
        }
    }

    /// Helper to create a GoalReached event.
    pub fn goal_reached(user_id: &str, goal: &Goal) -> Self {
        StashEvent::GoalReached {
            user_id: user_id.to_string(),
            name: goal.name.clone(),
            target: goal.target,
            timestamp: Utc::now(),
        }
    }

    /// Helper to create a GoalDeleted event.
    pub fn goal_deleted(user_id: &str, goal: &Goal) -> Self {
        StashEvent::GoalDeleted {
            user_id: user_id.to_string(),
            name: goal.name.clone(),
            saved: goal.saved,
            timestamp: Utc::now(),
        }
    }
}

/// Trait for receiving Stash events.
///
/// Implementations decide what to do with each event: log to a file,
/// call a webhook, notify a chat transport, etc.
pub trait NotificationSink: Send {
    /// Handle an event. Errors are logged but don't stop the system.
    fn send(&self, event: &StashEvent) -> Result<(), StoreError>;
}

/// Logs events as JSONL to a file (always-on sink).
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl NotificationSink for LogSink {
    fn send(&self, event: &StashEvent) -> Result<(), StoreError> {
        // Ensure parent directory exists.
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        Ok(())
    }
}

/// Dispatches events to multiple sinks.
///
/// Errors from individual sinks are logged (via tracing) but don't
/// prevent other sinks from receiving the event.
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    /// Create a new dispatcher with no sinks.
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Add a notification sink.
    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    /// Dispatch an event to all sinks.
    pub fn dispatch(&self, event: &StashEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.send(event) {
                tracing::warn!("notification sink error: {}", e);
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
