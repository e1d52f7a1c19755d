// resolver.rs — Resolves which goal an operation targets.
//
// Contribution commands may omit the goal name; the store then falls back
// to the user's last-interacted goal. Resolution is a pure function with
// no side effects: the caller applies the last-goal update itself after
// the operation succeeds.

use crate::error::StoreError;
use crate::goal::{normalize_name, Goal};

/// Resolve the target goal for an operation.
///
/// Precedence:
/// 1. An explicit name, if given — `GoalNotFound` when it matches nothing.
/// 2. The last-interacted-goal pointer — `StaleLastGoal` when the pointer
///    no longer matches any goal. Distinct from `GoalNotFound`: a stale
///    pointer is an internal-consistency edge, not a user typo.
/// 3. Otherwise `NoGoalSpecified`.
pub fn resolve<'a>(
    goals: &'a [Goal],
    last_goal: Option<&str>,
    explicit: Option<&str>,
) -> Result<&'a Goal, StoreError> {
    let lookup = |name: &str| {
        let key = normalize_name(name);
        goals.iter().find(|g| normalize_name(&g.name) == key)
    };

    if let Some(name) = explicit {
        return lookup(name).ok_or_else(|| StoreError::GoalNotFound {
            name: name.to_string(),
        });
    }
    if let Some(name) = last_goal {
        return lookup(name).ok_or_else(|| StoreError::StaleLastGoal {
            name: name.to_string(),
        });
    }
    Err(StoreError::NoGoalSpecified)
}
