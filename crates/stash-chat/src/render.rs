// render.rs — User-facing message rendering.
//
// Everything the user reads is assembled here: command replies, error
// messages, the goal list with its inline keyboard, and the progress bar.
// The store returns data and typed errors; this module turns both into
// chat text.

use stash_store::{Contribution, Goal, StoreError};

use crate::callback::Callback;
use crate::command::SETGOAL_USAGE;
use crate::config::DisplayConfig;
use crate::reply::{Button, Keyboard, Reply};

pub fn welcome() -> Reply {
    Reply::text(
        "Welcome to Stash! I help you save toward small goals.\n\
         Set one with /setgoal <name> <amount>, or see /help for everything I can do.",
    )
}

pub fn help() -> Reply {
    Reply::text(
        "I can help you save for your small goals.\n\
         \n\
         Here's what you can do:\n\
         - /setgoal <name> <amount> (e.g., /setgoal New Book 50)\n\
         - /add <amount> [goal name] (e.g., /add 10 or /add 5 New Book)\n\
         - /goals (see all your active goals)\n\
         - /progress <goal name> (check a specific goal)\n\
         - /delete <goal name> (remove a goal)\n\
         \n\
         Let's start saving!",
    )
}

pub fn usage(usage: &str) -> Reply {
    Reply::text(format!("Usage: {usage}"))
}

pub fn unknown_command(command: &str) -> Reply {
    Reply::text(format!(
        "I don't know {command}. See /help for the commands I understand."
    ))
}

pub fn not_a_command() -> Reply {
    Reply::text("I only understand commands — try /help.")
}

pub fn unknown_callback() -> Reply {
    Reply::text("That button is no longer valid. Use /goals for a fresh list.")
}

pub fn goal_created(goal: &Goal, display: &DisplayConfig) -> Reply {
    Reply::text(format!(
        "Goal \"{}\" set for {}. Start saving with /add <amount>!",
        goal.name,
        amount(goal.target, display)
    ))
}

pub fn contribution(added: f64, c: &Contribution, display: &DisplayConfig) -> Reply {
    let mut text = format!(
        "Added {} to \"{}\". Saved {} / {}.",
        amount(added, display),
        c.goal.name,
        amount(c.goal.saved, display),
        amount(c.goal.target, display)
    );
    if c.reached_target {
        text.push_str(&format!("\n🎉 Target reached for \"{}\"!", c.goal.name));
    }
    Reply::text(text)
}

/// The goal list with one keyboard row per goal: a progress button and a
/// delete button.
pub fn goal_list(goals: &[Goal], display: &DisplayConfig) -> Reply {
    if goals.is_empty() {
        return Reply::text(format!(
            "You have no active goals. Set one with {SETGOAL_USAGE}."
        ));
    }

    let mut text = String::from("Your active goals:\n");
    for goal in goals {
        text.push_str(&format!("- {}\n", goal_line(goal, display)));
    }

    let rows = goals
        .iter()
        .map(|goal| {
            vec![
                Button {
                    label: format!("📊 {}", goal.name),
                    callback: Callback::Progress {
                        goal: goal.name.clone(),
                    }
                    .data(),
                },
                Button {
                    label: format!("🗑 {}", goal.name),
                    callback: Callback::Delete {
                        goal: goal.name.clone(),
                    }
                    .data(),
                },
            ]
        })
        .collect();

    Reply::with_keyboard(text, Keyboard { rows })
}

pub fn goal_progress(goal: &Goal, display: &DisplayConfig) -> Reply {
    Reply::text(goal_line(goal, display))
}

pub fn goal_deleted(goal: &Goal, display: &DisplayConfig) -> Reply {
    Reply::text(format!(
        "Deleted \"{}\" ({} saved toward {}).",
        goal.name,
        amount(goal.saved, display),
        amount(goal.target, display)
    ))
}

/// Map a store error to its user-facing reply.
pub fn store_error(err: &StoreError) -> Reply {
    let text = match err {
        StoreError::DuplicateName { name } => {
            format!("You already have a goal named \"{name}\". Please choose a different name.")
        }
        StoreError::InvalidTarget { .. } => {
            "The target amount must be greater than zero.".to_string()
        }
        StoreError::InvalidAmount { .. } => "The amount must be greater than zero.".to_string(),
        StoreError::NoGoals => {
            format!("You have no active goals. Set one with {SETGOAL_USAGE}.")
        }
        StoreError::GoalNotFound { name } => {
            format!("No goal named \"{name}\". Use /goals to see your goals.")
        }
        StoreError::NoGoalSpecified => {
            "Which goal? Name one, e.g. /add 10 New Book, or check /goals.".to_string()
        }
        StoreError::StaleLastGoal { name } => {
            format!("Your recent goal \"{name}\" no longer exists. Name one, e.g. /add 10 New Book.")
        }
        StoreError::Io { .. } | StoreError::Serialization(_) => {
            "Your change is in, but saving it to disk failed — it may be lost on restart."
                .to_string()
        }
    };
    Reply::text(text)
}

/// One formatted goal line: name, amounts, bar, and percentage.
fn goal_line(goal: &Goal, display: &DisplayConfig) -> String {
    format!(
        "{}: {} / {} [{}] {}%",
        goal.name,
        amount(goal.saved, display),
        amount(goal.target, display),
        progress_bar(goal, display.bar_width),
        (goal.completion() * 100.0).round() as u32
    )
}

/// Render a fixed-width progress bar, e.g. `████░░░░░░`.
pub fn progress_bar(goal: &Goal, width: usize) -> String {
    let filled = ((goal.completion() * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn amount(value: f64, display: &DisplayConfig) -> String {
    format!("{}{:.2}", display.currency, value)
}
