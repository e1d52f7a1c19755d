// store.rs — GoalStore: per-user goal collections and their operations.
//
// The store exclusively owns every UserState and persists the full
// snapshot after each mutation. Callers receive owned Goal clones;
// nothing retains references across calls. Processing is single-threaded
// and request-at-a-time, so each read-modify-write sequence here is
// atomic relative to other operations.
//
// A persistence failure after an in-memory mutation is returned to the
// caller with the mutation kept: the in-memory store stays the source of
// truth, and the next successful mutation re-persists everything.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::goal::{normalize_name, Goal, UserState};
use crate::resolver;
use crate::snapshot::SnapshotStore;

/// Result of a successful contribution.
#[derive(Debug, Clone)]
pub struct Contribution {
    /// The goal after the contribution was applied.
    pub goal: Goal,

    /// Whether `saved >= target` holds after this contribution.
    /// Reported on every qualifying contribution, not just the first.
    pub reached_target: bool,
}

/// In-memory goal state for all users, backed by a snapshot file.
pub struct GoalStore {
    users: HashMap<String, UserState>,
    snapshot: SnapshotStore,
}

impl GoalStore {
    /// Open the store, loading the full snapshot from disk.
    pub fn open(snapshot: SnapshotStore) -> Result<Self, StoreError> {
        let users = snapshot.load()?;
        tracing::debug!(
            users = users.len(),
            path = %snapshot.path().display(),
            "goal store loaded"
        );
        Ok(Self { users, snapshot })
    }

    /// Create a new goal with nothing saved and make it the user's
    /// last-interacted goal.
    pub fn create_goal(
        &mut self,
        user_id: &str,
        name: &str,
        target: f64,
    ) -> Result<Goal, StoreError> {
        if !target.is_finite() || target <= 0.0 {
            return Err(StoreError::InvalidTarget { target });
        }
        let state = self.users.entry(user_id.to_string()).or_default();
        if state.find(name).is_some() {
            return Err(StoreError::DuplicateName {
                name: name.to_string(),
            });
        }
        let goal = Goal::new(name, target);
        state.goals.push(goal.clone());
        state.last_goal = Some(goal.name.clone());
        self.persist()?;
        tracing::info!(user = user_id, goal = %goal.name, target_amount = target, "goal created");
        Ok(goal)
    }

    /// Add to a goal's saved amount. When `name` is omitted the
    /// contribution goes to the user's last-interacted goal.
    pub fn contribute(
        &mut self,
        user_id: &str,
        amount: f64,
        name: Option<&str>,
    ) -> Result<Contribution, StoreError> {
        let state = self
            .users
            .get_mut(user_id)
            .filter(|s| !s.goals.is_empty())
            .ok_or(StoreError::NoGoals)?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(StoreError::InvalidAmount { amount });
        }

        let target_name = resolver::resolve(&state.goals, state.last_goal.as_deref(), name)?
            .name
            .clone();
        // The resolver just matched this name against the same collection.
        let Some(goal) = state.find_mut(&target_name) else {
            return Err(StoreError::GoalNotFound { name: target_name });
        };

        goal.saved += amount;
        let goal = goal.clone();
        let reached_target = goal.reached();
        state.last_goal = Some(goal.name.clone());
        self.persist()?;
        tracing::info!(
            user = user_id,
            goal = %goal.name,
            amount,
            saved = goal.saved,
            "contribution added"
        );
        Ok(Contribution {
            goal,
            reached_target,
        })
    }

    /// All of a user's goals in creation order. Unknown users have none.
    pub fn list_goals(&self, user_id: &str) -> &[Goal] {
        self.users
            .get(user_id)
            .map(|s| s.goals.as_slice())
            .unwrap_or(&[])
    }

    /// Look up a single goal and mark it as the user's last-interacted goal.
    pub fn progress(&mut self, user_id: &str, name: &str) -> Result<Goal, StoreError> {
        let state = self
            .users
            .get_mut(user_id)
            .filter(|s| !s.goals.is_empty())
            .ok_or(StoreError::NoGoals)?;
        let goal = state
            .find(name)
            .cloned()
            .ok_or_else(|| StoreError::GoalNotFound {
                name: name.to_string(),
            })?;
        state.last_goal = Some(goal.name.clone());
        self.persist()?;
        Ok(goal)
    }

    /// Delete a goal. Clears the last-interacted pointer if it referenced
    /// the deleted goal.
    pub fn delete_goal(&mut self, user_id: &str, name: &str) -> Result<Goal, StoreError> {
        let state = self
            .users
            .get_mut(user_id)
            .filter(|s| !s.goals.is_empty())
            .ok_or(StoreError::NoGoals)?;
        let idx = state
            .position(name)
            .ok_or_else(|| StoreError::GoalNotFound {
                name: name.to_string(),
            })?;
        let removed = state.goals.remove(idx);

        let pointed_at_removed = state
            .last_goal
            .as_deref()
            .is_some_and(|last| normalize_name(last) == normalize_name(&removed.name));
        if pointed_at_removed {
            state.last_goal = None;
        }

        self.persist()?;
        tracing::info!(user = user_id, goal = %removed.name, "goal deleted");
        Ok(removed)
    }

    /// The user's last-interacted goal name, if set.
    pub fn last_goal(&self, user_id: &str) -> Option<&str> {
        self.users.get(user_id).and_then(|s| s.last_goal.as_deref())
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.snapshot.save(&self.users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_store(path: &std::path::Path) -> GoalStore {
        GoalStore::open(SnapshotStore::new(path)).unwrap()
    }

    #[test]
    fn create_goal_starts_at_zero_and_sets_pointer() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("goals.json"));

        let goal = store.create_goal("u", "Trip", 100.0).unwrap();
        assert_eq!(goal.name, "Trip");
        assert_eq!(goal.saved, 0.0);
        assert_eq!(store.last_goal("u"), Some("Trip"));
    }

    #[test]
    fn duplicate_name_is_case_insensitive() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("goals.json"));

        store.create_goal("u", "book", 50.0).unwrap();
        let err = store.create_goal("u", "Book", 80.0).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName { name } if name == "Book"));
        assert_eq!(store.list_goals("u").len(), 1);
    }

    #[test]
    fn non_positive_target_rejected_and_collection_unchanged() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("goals.json"));

        for target in [0.0, -10.0, f64::NAN] {
            let err = store.create_goal("u", "Trip", target).unwrap_err();
            assert!(matches!(err, StoreError::InvalidTarget { .. }));
        }
        assert!(store.list_goals("u").is_empty());
    }

    #[test]
    fn contribute_without_goals_never_creates_one() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("goals.json"));

        let err = store.contribute("nobody", 10.0, None).unwrap_err();
        assert!(matches!(err, StoreError::NoGoals));
        let err = store.contribute("nobody", 10.0, Some("Trip")).unwrap_err();
        assert!(matches!(err, StoreError::NoGoals));
        assert!(store.list_goals("nobody").is_empty());
    }

    #[test]
    fn contribute_falls_back_to_last_interacted_goal() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("goals.json"));

        store.create_goal("u", "Trip", 100.0).unwrap();
        let c = store.contribute("u", 40.0, None).unwrap();
        assert_eq!(c.goal.name, "Trip");
        assert_eq!(c.goal.saved, 40.0);
        assert!(!c.reached_target);
    }

    #[test]
    fn reaching_the_target_is_reported_every_time() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("goals.json"));

        store.create_goal("u", "Trip", 100.0).unwrap();
        store.contribute("u", 40.0, None).unwrap();

        let c = store.contribute("u", 60.0, Some("Trip")).unwrap();
        assert_eq!(c.goal.saved, 100.0);
        assert!(c.reached_target);

        // Already past the target — still reported, not re-suppressed.
        let c = store.contribute("u", 5.0, Some("Trip")).unwrap();
        assert_eq!(c.goal.saved, 105.0);
        assert!(c.reached_target);
    }

    #[test]
    fn contribute_by_name_is_case_insensitive() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("goals.json"));

        store.create_goal("u", "New Book", 50.0).unwrap();
        let c = store.contribute("u", 5.0, Some("new book")).unwrap();
        assert_eq!(c.goal.name, "New Book");
        assert_eq!(store.last_goal("u"), Some("New Book"));
    }

    #[test]
    fn contribute_unknown_name_is_goal_not_found() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("goals.json"));

        store.create_goal("u", "Trip", 100.0).unwrap();
        let err = store.contribute("u", 10.0, Some("Bicycle")).unwrap_err();
        assert!(matches!(err, StoreError::GoalNotFound { name } if name == "Bicycle"));
    }

    #[test]
    fn non_positive_contribution_rejected() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("goals.json"));

        store.create_goal("u", "Trip", 100.0).unwrap();
        for amount in [0.0, -5.0] {
            let err = store.contribute("u", amount, None).unwrap_err();
            assert!(matches!(err, StoreError::InvalidAmount { .. }));
        }
        assert_eq!(store.list_goals("u")[0].saved, 0.0);
    }

    #[test]
    fn delete_clears_pointer_when_it_referenced_the_goal() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("goals.json"));

        store.create_goal("u", "Trip", 100.0).unwrap();
        let removed = store.delete_goal("u", "trip").unwrap();
        assert_eq!(removed.name, "Trip");
        assert_eq!(store.last_goal("u"), None);

        // Pointer was cleared and no goals remain.
        let err = store.contribute("u", 10.0, None).unwrap_err();
        assert!(matches!(err, StoreError::NoGoals));
    }

    #[test]
    fn delete_keeps_pointer_to_other_goal() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("goals.json"));

        store.create_goal("u", "Trip", 100.0).unwrap();
        store.create_goal("u", "Book", 50.0).unwrap();
        // Book is the last-interacted goal; deleting Trip must not clear it.
        store.delete_goal("u", "Trip").unwrap();
        assert_eq!(store.last_goal("u"), Some("Book"));

        let c = store.contribute("u", 10.0, None).unwrap();
        assert_eq!(c.goal.name, "Book");
    }

    #[test]
    fn delete_last_remaining_goal_then_contribute_fails_no_goals() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("goals.json"));

        store.create_goal("u", "Trip", 100.0).unwrap();
        store.contribute("u", 40.0, None).unwrap();
        store.delete_goal("u", "Trip").unwrap();

        let err = store.contribute("u", 10.0, None).unwrap_err();
        assert!(matches!(err, StoreError::NoGoals));
    }

    #[test]
    fn delete_unknown_goal_is_not_found() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("goals.json"));

        store.create_goal("u", "Trip", 100.0).unwrap();
        let err = store.delete_goal("u", "Bicycle").unwrap_err();
        assert!(matches!(err, StoreError::GoalNotFound { .. }));
        let err = store.delete_goal("nobody", "Trip").unwrap_err();
        assert!(matches!(err, StoreError::NoGoals));
    }

    #[test]
    fn progress_updates_pointer() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("goals.json"));

        store.create_goal("u", "Trip", 100.0).unwrap();
        store.create_goal("u", "Book", 50.0).unwrap();
        assert_eq!(store.last_goal("u"), Some("Book"));

        let goal = store.progress("u", "TRIP").unwrap();
        assert_eq!(goal.name, "Trip");
        assert_eq!(store.last_goal("u"), Some("Trip"));

        // Goal-less contribution now lands on Trip.
        let c = store.contribute("u", 10.0, None).unwrap();
        assert_eq!(c.goal.name, "Trip");
    }

    #[test]
    fn list_goals_preserves_creation_order() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("goals.json"));

        store.create_goal("u", "Trip", 100.0).unwrap();
        store.create_goal("u", "Book", 50.0).unwrap();
        store.create_goal("u", "Bicycle", 300.0).unwrap();

        let names: Vec<&str> = store.list_goals("u").iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Trip", "Book", "Bicycle"]);
    }

    #[test]
    fn list_goals_unknown_user_is_empty_not_an_error() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir.path().join("goals.json"));
        assert!(store.list_goals("nobody").is_empty());
    }

    #[test]
    fn users_are_isolated() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("goals.json"));

        store.create_goal("alice", "Trip", 100.0).unwrap();
        store.create_goal("bob", "Trip", 200.0).unwrap();
        store.contribute("alice", 40.0, None).unwrap();

        assert_eq!(store.list_goals("alice")[0].saved, 40.0);
        assert_eq!(store.list_goals("bob")[0].saved, 0.0);
    }

    #[test]
    fn store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goals.json");

        {
            let mut store = open_store(&path);
            store.create_goal("u", "Trip", 100.0).unwrap();
            store.contribute("u", 40.0, None).unwrap();
        }

        {
            let store = open_store(&path);
            let goals = store.list_goals("u");
            assert_eq!(goals.len(), 1);
            assert_eq!(goals[0].name, "Trip");
            assert_eq!(goals[0].saved, 40.0);
            assert_eq!(store.last_goal("u"), Some("Trip"));
        }
    }

    #[cfg(unix)]
    #[test]
    fn persist_failure_is_reported_and_mutation_kept() {
        let dir = tempdir().unwrap();
        // Parent path is a file, so creating the snapshot's parent dir fails.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let mut store = GoalStore::open(SnapshotStore::new(blocker.join("goals.json"))).unwrap();
        let err = store.create_goal("u", "Trip", 100.0).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));

        // The in-memory mutation is kept; the store remains the source of truth.
        assert_eq!(store.list_goals("u").len(), 1);
    }
}
