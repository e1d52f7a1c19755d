// goals.rs — Offline goal table listing.

use anyhow::Result;
use stash_chat::{render, StashConfig};
use stash_store::{GoalStore, SnapshotStore};

pub fn execute(config: &StashConfig, user: &str) -> Result<()> {
    let store = GoalStore::open(SnapshotStore::new(config.goals_file()))?;
    let goals = store.list_goals(user);

    if goals.is_empty() {
        println!("No goals found for user '{}'.", user);
        return Ok(());
    }

    println!(
        "{:<24} {:>12} {:>12}  {:<12} {:>5}",
        "NAME", "SAVED", "TARGET", "PROGRESS", "%"
    );
    println!("{}", "-".repeat(70));

    for goal in goals {
        println!(
            "{:<24} {:>12} {:>12}  {:<12} {:>4}%",
            truncate(&goal.name, 22),
            format!("{}{:.2}", config.display.currency, goal.saved),
            format!("{}{:.2}", config.display.currency, goal.target),
            render::progress_bar(goal, config.display.bar_width),
            (goal.completion() * 100.0).round() as u32,
        );
    }
    println!("\n{} goal(s) total.", goals.len());

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max - 3).collect();
        format!("{cut}...")
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("Trip", 22), "Trip");
        assert_eq!(truncate("A very long goal name indeed", 10), "A very ...");
        assert_eq!(truncate("Äventyrsresa till Japan", 10), "Äventyr...");
    }
}
