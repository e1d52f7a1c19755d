// command.rs — The chat command grammar.
//
// Amounts accept whole numbers with up to two decimal places; goal names
// may contain spaces. For /setgoal the amount is the last token, so the
// name match is non-greedy.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

pub const SETGOAL_USAGE: &str = "/setgoal <name> <amount> (e.g., /setgoal New Book 50)";
pub const ADD_USAGE: &str = "/add <amount> [goal name] (e.g., /add 10 or /add 5 New Book)";
pub const PROGRESS_USAGE: &str = "/progress <goal name> (e.g., /progress New Book)";
pub const DELETE_USAGE: &str = "/delete <goal name> (e.g., /delete New Book)";

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `/start` — first-contact greeting.
    Start,
    /// `/help` — command summary.
    Help,
    /// `/setgoal <name> <amount>` — create a goal.
    SetGoal { name: String, target: f64 },
    /// `/add <amount> [goal name]` — contribute; the goal name may be
    /// omitted to target the last-interacted goal.
    Add { amount: f64, goal: Option<String> },
    /// `/goals` — list all goals.
    Goals,
    /// `/progress <goal name>` — single-goal progress.
    Progress { goal: String },
    /// `/delete <goal name>` — delete a goal.
    Delete { goal: String },
}

/// Why a line of chat input didn't parse into a command.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A recognized command with missing or malformed arguments.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// A `/command` we don't know.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// Plain chat text, not a command at all.
    #[error("not a command")]
    NotACommand,
}

struct Patterns {
    set_goal: Regex,
    add: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        set_goal: Regex::new(r"^(.+?)\s+(\d+(?:\.\d{1,2})?)$").expect("valid regex"),
        add: Regex::new(r"^(\d+(?:\.\d{1,2})?)(?:\s+(.+))?$").expect("valid regex"),
    })
}

impl Command {
    /// Parse one line of chat input.
    pub fn parse(text: &str) -> Result<Command, ParseError> {
        let text = text.trim();
        let Some(rest) = text.strip_prefix('/') else {
            return Err(ParseError::NotACommand);
        };
        let (word, args) = match rest.split_once(char::is_whitespace) {
            Some((word, args)) => (word, args.trim()),
            None => (rest, ""),
        };

        match word.to_lowercase().as_str() {
            "start" => Ok(Command::Start),
            "help" => Ok(Command::Help),
            "goals" => Ok(Command::Goals),
            "setgoal" => {
                let caps = patterns()
                    .set_goal
                    .captures(args)
                    .ok_or(ParseError::Usage(SETGOAL_USAGE))?;
                let target = caps[2].parse().map_err(|_| ParseError::Usage(SETGOAL_USAGE))?;
                Ok(Command::SetGoal {
                    name: caps[1].trim().to_string(),
                    target,
                })
            }
            "add" => {
                let caps = patterns()
                    .add
                    .captures(args)
                    .ok_or(ParseError::Usage(ADD_USAGE))?;
                let amount = caps[1].parse().map_err(|_| ParseError::Usage(ADD_USAGE))?;
                let goal = caps.get(2).map(|m| m.as_str().trim().to_string());
                Ok(Command::Add { amount, goal })
            }
            "progress" => {
                if args.is_empty() {
                    Err(ParseError::Usage(PROGRESS_USAGE))
                } else {
                    Ok(Command::Progress {
                        goal: args.to_string(),
                    })
                }
            }
            "delete" => {
                if args.is_empty() {
                    Err(ParseError::Usage(DELETE_USAGE))
                } else {
                    Ok(Command::Delete {
                        goal: args.to_string(),
                    })
                }
            }
            other => Err(ParseError::UnknownCommand(format!("/{other}"))),
        }
    }
}
