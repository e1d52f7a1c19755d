//! # stash-cli
//!
//! Command-line front-end for Stash, the micro-savings chat assistant.
//!
//! - `stash chat` — interactive chat session, driving the same dispatcher
//!   a network chat transport would
//! - `stash goals` — offline table of a user's goals

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stash_chat::StashConfig;
use tracing_subscriber::EnvFilter;

/// Stash — save toward small goals, one chat message at a time.
#[derive(Parser)]
#[command(name = "stash", version, about)]
struct Cli {
    /// Data directory (defaults to the platform data dir).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// User identifier the session acts as.
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// List a user's goals as a table.
    Goals {
        /// User identifier to list.
        #[arg(long, default_value = "local")]
        user: String,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so they don't interleave with the chat on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("stash_store=info".parse()?)
                .add_directive("stash_chat=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(StashConfig::default_dir);
    let config = StashConfig::new(&data_dir);

    match &cli.command {
        Commands::Chat { user } => commands::chat::execute(&config, user),
        Commands::Goals { user } => commands::goals::execute(&config, user),
    }
}
