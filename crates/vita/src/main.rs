// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vita - an offline-first personal health companion.
//!
//! This is the binary entry point for the Vita chat client.

use clap::{Parser, Subcommand};

mod bootstrap;
mod send;
mod shell;
mod status;

/// Vita - an offline-first personal health companion.
#[derive(Parser, Debug)]
#[command(name = "vita", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch an interactive chat session.
    Shell,
    /// Send a single message and print the reply.
    Send {
        /// The message text.
        text: String,
        /// Compose offline: queue the message instead of delivering it.
        #[arg(long)]
        offline: bool,
    },
    /// Drain the unsent-message queue once.
    Sync,
    /// Print the conversation log.
    Log,
    /// Summarize the conversation log and print the summary.
    Summary,
    /// Show storage and queue status.
    Status,
    /// Manage the API credential.
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

/// Credential management actions.
#[derive(Subcommand, Debug)]
enum KeyAction {
    /// Store a new API key in the credential file.
    Set {
        /// The API key value.
        value: String,
    },
    /// Print the credential file location.
    Path,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match vita_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            vita_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(Commands::Shell) => shell::run_shell(config).await,
        Some(Commands::Send { text, offline }) => send::run_send(&config, &text, offline).await,
        Some(Commands::Sync) => send::run_sync(&config).await,
        Some(Commands::Log) => send::run_log(&config).await,
        Some(Commands::Summary) => send::run_summary(&config).await,
        Some(Commands::Status) => status::run_status(&config).await,
        Some(Commands::Key { action }) => match action {
            KeyAction::Set { value } => send::run_key_set(&config, &value),
            KeyAction::Path => send::run_key_path(&config),
        },
        None => {
            println!("vita: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vita={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
