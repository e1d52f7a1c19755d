// dispatcher.rs — Routes inbound chat events into the goal store.
//
// Two entry points, one for text commands and one for inline-button
// callbacks. Both call the same operation functions on the shared store;
// neither path fabricates the other's events. Every inbound event gets a
// Reply — store errors are rendered, never propagated.

use stash_store::{EventDispatcher, GoalStore, StashEvent};

use crate::callback::Callback;
use crate::command::{Command, ParseError};
use crate::config::DisplayConfig;
use crate::render;
use crate::reply::Reply;

/// Turns inbound chat events into store operations and replies.
///
/// Owns the store for the lifetime of the process; the transport layer
/// (REPL or a network chat surface) holds exactly one of these.
pub struct Dispatcher {
    store: GoalStore,
    events: EventDispatcher,
    display: DisplayConfig,
}

impl Dispatcher {
    pub fn new(store: GoalStore, events: EventDispatcher, display: DisplayConfig) -> Self {
        Self {
            store,
            events,
            display,
        }
    }

    /// Read access to the underlying store (used by offline listings).
    pub fn store(&self) -> &GoalStore {
        &self.store
    }

    /// Handle one line of chat text.
    pub fn handle_message(&mut self, user_id: &str, text: &str) -> Reply {
        match Command::parse(text) {
            Ok(Command::Start) => render::welcome(),
            Ok(Command::Help) => render::help(),
            Ok(Command::SetGoal { name, target }) => self.set_goal(user_id, &name, target),
            Ok(Command::Add { amount, goal }) => self.add(user_id, amount, goal.as_deref()),
            Ok(Command::Goals) => self.goals(user_id),
            Ok(Command::Progress { goal }) => self.show_progress(user_id, &goal),
            Ok(Command::Delete { goal }) => self.delete(user_id, &goal),
            Err(ParseError::Usage(usage)) => render::usage(usage),
            Err(ParseError::UnknownCommand(command)) => render::unknown_command(&command),
            Err(ParseError::NotACommand) => render::not_a_command(),
        }
    }

    /// Handle an inline-button callback payload.
    pub fn handle_callback(&mut self, user_id: &str, data: &str) -> Reply {
        match Callback::parse(data) {
            Some(Callback::Progress { goal }) => self.show_progress(user_id, &goal),
            Some(Callback::Delete { goal }) => self.delete(user_id, &goal),
            None => {
                tracing::warn!(user = user_id, data, "unrecognized callback payload");
                render::unknown_callback()
            }
        }
    }

    fn set_goal(&mut self, user_id: &str, name: &str, target: f64) -> Reply {
        match self.store.create_goal(user_id, name, target) {
            Ok(goal) => {
                self.events
                    .dispatch(&StashEvent::goal_created(user_id, &goal));
                render::goal_created(&goal, &self.display)
            }
            Err(err) => render::store_error(&err),
        }
    }

    fn add(&mut self, user_id: &str, amount: f64, goal: Option<&str>) -> Reply {
        match self.store.contribute(user_id, amount, goal) {
            Ok(c) => {
                self.events
                    .dispatch(&StashEvent::contribution_added(user_id, &c.goal, amount));
                if c.reached_target {
                    self.events
                        .dispatch(&StashEvent::goal_reached(user_id, &c.goal));
                }
                render::contribution(amount, &c, &self.display)
            }
            Err(err) => render::store_error(&err),
        }
    }

    fn goals(&self, user_id: &str) -> Reply {
        render::goal_list(self.store.list_goals(user_id), &self.display)
    }

    fn show_progress(&mut self, user_id: &str, goal: &str) -> Reply {
        match self.store.progress(user_id, goal) {
            Ok(goal) => render::goal_progress(&goal, &self.display),
            Err(err) => render::store_error(&err),
        }
    }

    fn delete(&mut self, user_id: &str, goal: &str) -> Reply {
        match self.store.delete_goal(user_id, goal) {
            Ok(goal) => {
                self.events
                    .dispatch(&StashEvent::goal_deleted(user_id, &goal));
                render::goal_deleted(&goal, &self.display)
            }
            Err(err) => render::store_error(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stash_store::SnapshotStore;
    use tempfile::tempdir;

    fn dispatcher(dir: &std::path::Path) -> Dispatcher {
        let store = GoalStore::open(SnapshotStore::new(dir.join("goals.json"))).unwrap();
        Dispatcher::new(store, EventDispatcher::new(), DisplayConfig::default())
    }

    #[test]
    fn setgoal_then_add_uses_last_interacted_goal() {
        let dir = tempdir().unwrap();
        let mut d = dispatcher(dir.path());

        let reply = d.handle_message("u", "/setgoal Trip 100");
        assert!(reply.text.contains("Goal \"Trip\" set for $100.00"));

        let reply = d.handle_message("u", "/add 40");
        assert!(reply.text.contains("Saved $40.00 / $100.00"));
        assert!(!reply.text.contains("Target reached"));
    }

    #[test]
    fn reaching_the_target_celebrates() {
        let dir = tempdir().unwrap();
        let mut d = dispatcher(dir.path());

        d.handle_message("u", "/setgoal Trip 100");
        d.handle_message("u", "/add 40");
        let reply = d.handle_message("u", "/add 60 Trip");
        assert!(reply.text.contains("Target reached for \"Trip\""));
    }

    #[test]
    fn usage_replies_for_bare_commands() {
        let dir = tempdir().unwrap();
        let mut d = dispatcher(dir.path());

        for (input, fragment) in [
            ("/setgoal", "/setgoal <name> <amount>"),
            ("/add", "/add <amount>"),
            ("/progress", "/progress <goal name>"),
            ("/delete", "/delete <goal name>"),
        ] {
            let reply = d.handle_message("u", input);
            assert!(reply.text.starts_with("Usage:"), "{input}");
            assert!(reply.text.contains(fragment), "{input}");
        }
    }

    #[test]
    fn unknown_command_and_plain_text_get_hints() {
        let dir = tempdir().unwrap();
        let mut d = dispatcher(dir.path());

        let reply = d.handle_message("u", "/withdraw 10");
        assert!(reply.text.contains("/withdraw"));
        let reply = d.handle_message("u", "hello");
        assert!(reply.text.contains("/help"));
    }

    #[test]
    fn callback_delete_matches_text_delete() {
        let dir = tempdir().unwrap();
        let mut d = dispatcher(dir.path());

        d.handle_message("u", "/setgoal Trip 100");
        let reply = d.handle_callback("u", "delete:Trip");
        assert!(reply.text.contains("Deleted \"Trip\""));
        assert!(d.store().list_goals("u").is_empty());
    }

    #[test]
    fn callback_progress_updates_last_interacted_goal() {
        let dir = tempdir().unwrap();
        let mut d = dispatcher(dir.path());

        d.handle_message("u", "/setgoal Trip 100");
        d.handle_message("u", "/setgoal Book 50");
        d.handle_callback("u", "progress:Trip");

        // Goal-less /add lands on Trip now.
        let reply = d.handle_message("u", "/add 10");
        assert!(reply.text.contains("\"Trip\""));
    }

    #[test]
    fn unknown_callback_payload_is_answered() {
        let dir = tempdir().unwrap();
        let mut d = dispatcher(dir.path());

        let reply = d.handle_callback("u", "rename:Trip");
        assert!(reply.text.contains("/goals"));
    }

    #[test]
    fn goals_reply_carries_the_keyboard() {
        let dir = tempdir().unwrap();
        let mut d = dispatcher(dir.path());

        d.handle_message("u", "/setgoal Trip 100");
        let reply = d.handle_message("u", "/goals");
        let keyboard = reply.keyboard.unwrap();
        assert_eq!(keyboard.rows.len(), 1);
    }

    #[test]
    fn store_errors_become_replies() {
        let dir = tempdir().unwrap();
        let mut d = dispatcher(dir.path());

        let reply = d.handle_message("u", "/add 10");
        assert!(reply.text.contains("no active goals"));

        d.handle_message("u", "/setgoal Book 50");
        let reply = d.handle_message("u", "/setgoal book 80");
        assert!(reply.text.contains("already have a goal named \"book\""));

        let reply = d.handle_message("u", "/add 10 Bicycle");
        assert!(reply.text.contains("No goal named \"Bicycle\""));
    }
}
