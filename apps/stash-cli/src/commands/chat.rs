// chat.rs — Interactive chat REPL.
//
// Drives the dispatcher the way a network transport would: each line is a
// chat message, replies print to stdout, and inline keyboards render as
// numbered buttons. Entering a button's number fires its callback.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use stash_chat::{Dispatcher, Keyboard, StashConfig};
use stash_store::{EventDispatcher, GoalStore, LogSink, SnapshotStore};

pub fn execute(config: &StashConfig, user: &str) -> Result<()> {
    let store = GoalStore::open(SnapshotStore::new(config.goals_file()))?;
    let mut events = EventDispatcher::new();
    events.add_sink(Box::new(LogSink::new(config.events_log())));
    let mut dispatcher = Dispatcher::new(store, events, config.display.clone());

    println!("{}", dispatcher.handle_message(user, "/start").text);
    println!("(Ctrl-D or /quit to leave.)");

    let mut rl = DefaultEditor::new()?;
    let mut last_keyboard: Option<Keyboard> = None;

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                if line == "/quit" || line == "/exit" {
                    break;
                }
                let _ = rl.add_history_entry(&line);

                let reply = match tapped_button(last_keyboard.as_ref(), &line) {
                    Some(callback) => dispatcher.handle_callback(user, &callback),
                    None => dispatcher.handle_message(user, &line),
                };

                println!("{}", reply.text);
                if let Some(keyboard) = &reply.keyboard {
                    print_keyboard(keyboard);
                }
                last_keyboard = reply.keyboard;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Resolve numeric input against the most recent keyboard.
/// Buttons are numbered from 1 in row order.
fn tapped_button(keyboard: Option<&Keyboard>, input: &str) -> Option<String> {
    let index: usize = input.parse().ok()?;
    keyboard?
        .buttons()
        .nth(index.checked_sub(1)?)
        .map(|b| b.callback.clone())
}

fn print_keyboard(keyboard: &Keyboard) {
    for (i, button) in keyboard.buttons().enumerate() {
        println!("  [{}] {}", i + 1, button.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stash_chat::Button;

    fn keyboard() -> Keyboard {
        Keyboard {
            rows: vec![
                vec![
                    Button {
                        label: "📊 Trip".to_string(),
                        callback: "progress:Trip".to_string(),
                    },
                    Button {
                        label: "🗑 Trip".to_string(),
                        callback: "delete:Trip".to_string(),
                    },
                ],
                vec![Button {
                    label: "📊 Book".to_string(),
                    callback: "progress:Book".to_string(),
                }],
            ],
        }
    }

    #[test]
    fn numbers_resolve_in_row_order() {
        let kb = keyboard();
        assert_eq!(
            tapped_button(Some(&kb), "1"),
            Some("progress:Trip".to_string())
        );
        assert_eq!(
            tapped_button(Some(&kb), "2"),
            Some("delete:Trip".to_string())
        );
        assert_eq!(
            tapped_button(Some(&kb), "3"),
            Some("progress:Book".to_string())
        );
    }

    #[test]
    fn out_of_range_and_non_numeric_input_fall_through() {
        let kb = keyboard();
        assert_eq!(tapped_button(Some(&kb), "0"), None);
        assert_eq!(tapped_button(Some(&kb), "4"), None);
        assert_eq!(tapped_button(Some(&kb), "/goals"), None);
        assert_eq!(tapped_button(None, "1"), None);
    }
}
