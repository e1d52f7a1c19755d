// goal.rs — Goal and UserState: the per-user savings state.
//
// A Goal is one named savings target. Names are unique per user under
// case-insensitive comparison and immutable once created; the casing given
// at creation is what gets displayed. A UserState is one user's ordered
// goal collection plus the last-interacted-goal pointer that goal-less
// commands fall back to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical form of a goal name for comparison purposes.
///
/// Every name comparison in the store and the resolver goes through this
/// function, so the comparison sites cannot drift apart.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

/// One savings target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Display name, casing as given at creation.
    pub name: String,

    /// Target amount. Positive, fixed at creation.
    pub target: f64,

    /// Amount saved so far. Starts at 0 and only grows.
    pub saved: f64,

    /// When this goal was created. Snapshots written before this field
    /// existed load with the current time.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Create a goal with nothing saved yet.
    pub fn new(name: impl Into<String>, target: f64) -> Self {
        Self {
            name: name.into(),
            target,
            saved: 0.0,
            created_at: Utc::now(),
        }
    }

    /// Whether the saved amount has reached the target.
    pub fn reached(&self) -> bool {
        self.saved >= self.target
    }

    /// Completion ratio clamped to [0, 1] for display.
    pub fn completion(&self) -> f64 {
        (self.saved / self.target).clamp(0.0, 1.0)
    }
}

/// One user's goals plus the last-interacted-goal pointer.
///
/// Created lazily on a user's first goal creation; never destroyed, only
/// emptied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserState {
    /// Goals in creation order.
    pub goals: Vec<Goal>,

    /// Name of the goal most recently created, contributed to, or
    /// inspected. Cleared when that goal is deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_goal: Option<String>,
}

impl UserState {
    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&Goal> {
        let key = normalize_name(name);
        self.goals.iter().find(|g| normalize_name(&g.name) == key)
    }

    /// Case-insensitive mutable lookup by name.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Goal> {
        let key = normalize_name(name);
        self.goals.iter_mut().find(|g| normalize_name(&g.name) == key)
    }

    /// Index of a goal by case-insensitive name.
    pub fn position(&self, name: &str) -> Option<usize> {
        let key = normalize_name(name);
        self.goals.iter().position(|g| normalize_name(&g.name) == key)
    }
}
