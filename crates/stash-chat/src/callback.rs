// callback.rs — Inline-button callback payloads.
//
// A /goals reply carries an inline keyboard; tapping a button sends back
// a compact payload instead of a text command. Payload format:
// `<action>:<goal name>`. Parse and data() are inverses.

/// An inline-button action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    /// Show progress for a goal.
    Progress { goal: String },

    /// Delete a goal.
    Delete { goal: String },
}

impl Callback {
    /// Parse a callback payload. Unknown payloads yield `None`.
    pub fn parse(data: &str) -> Option<Callback> {
        let (action, goal) = data.split_once(':')?;
        if goal.is_empty() {
            return None;
        }
        match action {
            "progress" => Some(Callback::Progress {
                goal: goal.to_string(),
            }),
            "delete" => Some(Callback::Delete {
                goal: goal.to_string(),
            }),
            _ => None,
        }
    }

    /// The wire payload for this callback.
    pub fn data(&self) -> String {
        match self {
            Callback::Progress { goal } => format!("progress:{goal}"),
            Callback::Delete { goal } => format!("delete:{goal}"),
        }
    }
}
