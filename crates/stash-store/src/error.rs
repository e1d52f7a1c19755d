// error.rs — Error types for the goal state engine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during goal store operations.
///
/// Every variant is recoverable and user-facing; the chat dispatcher maps
/// each one to a reply. None of them are fatal to the process.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Goal creation with a name already in use (case-insensitive).
    #[error("a goal named '{name}' already exists")]
    DuplicateName { name: String },

    /// Goal creation with a non-positive target amount.
    #[error("invalid target amount: {target}")]
    InvalidTarget { target: f64 },

    /// Contribution with a non-positive amount.
    #[error("invalid contribution amount: {amount}")]
    InvalidAmount { amount: f64 },

    /// The operation requires at least one goal; the user has none.
    #[error("no goals exist for this user")]
    NoGoals,

    /// Explicit or resolved name does not match any current goal.
    #[error("no goal named '{name}'")]
    GoalNotFound { name: String },

    /// No explicit name given and no last-interacted goal to fall back to.
    #[error("no goal specified and no recent goal to default to")]
    NoGoalSpecified,

    /// The last-interacted-goal pointer refers to a goal no longer present.
    #[error("last-interacted goal '{name}' no longer exists")]
    StaleLastGoal { name: String },

    /// A snapshot or event-log file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize snapshot or event data.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
