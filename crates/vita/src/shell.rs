// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vita shell` command implementation.
//!
//! Launches an interactive chat REPL with colored prompt and readline
//! history. The persisted conversation log is replayed on start, a
//! background synchronizer drains the unsent queue on startup and on every
//! became-online transition, and the reminder runner posts periodic
//! motivational entries while the shell is open.

use std::sync::Arc;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use vita_agent::ReminderRunner;
use vita_config::{FileCredentialStore, VitaConfig};
use vita_core::{CredentialStore, VitaError};

use crate::bootstrap;
use crate::send::{print_entry, print_sync_outcome};

/// Runs the interactive REPL.
pub async fn run_shell(config: VitaConfig) -> Result<(), VitaError> {
    let session = Arc::new(bootstrap::build_session(&config, true).await?);

    // Replay the persisted conversation.
    let mut seen = 0usize;
    for entry in session.history().await? {
        print_entry(&entry.sender, &entry.text);
        seen += 1;
    }

    // Background tasks: queue synchronizer and reminder runner.
    let cancel = CancellationToken::new();
    let sync_task = tokio::spawn({
        let synchronizer = session.synchronizer();
        let cancel = cancel.clone();
        async move { synchronizer.run(cancel).await }
    });
    let reminder_task = tokio::spawn({
        let runner = ReminderRunner::new(config.reminder.clone(), session.storage());
        let cancel = cancel.clone();
        async move { runner.run(cancel).await }
    });

    let mut rl = DefaultEditor::new()
        .map_err(|e| VitaError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "vita shell".bold().green());
    println!(
        "Type a message, or {} for commands. {} to exit.\n",
        "/help".yellow(),
        "/quit".yellow()
    );

    let prompt = format!("{}> ", "you".cyan());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match trimmed {
                    "/quit" | "/exit" => break,
                    "/help" => print_help(),
                    "/offline" => {
                        session.connectivity().set_online(false);
                        println!("{}", "now composing offline".yellow());
                    }
                    "/online" => {
                        session.connectivity().set_online(true);
                        println!("{}", "back online".green());
                        // The background synchronizer picks up the
                        // transition; give its pass a moment to land.
                        tokio::task::yield_now().await;
                    }
                    "/sync" => match session.sync().await {
                        Ok(outcome) => print_sync_outcome(&outcome),
                        Err(e) => eprintln!("error: {e}"),
                    },
                    "/summary" => match session.summarize().await {
                        Ok(_) => {}
                        Err(e) => eprintln!("error: {e}"),
                    },
                    "/model" => {
                        let model = session.toggle_model().await;
                        println!("model switched to {model}");
                    }
                    _ if trimmed.starts_with("/key ") => {
                        let value = trimmed.trim_start_matches("/key ").trim();
                        let store = FileCredentialStore::new(&config.openai);
                        match store.set(value) {
                            Ok(()) => println!("{}", "API key updated".green()),
                            Err(e) => eprintln!("error: {e}"),
                        }
                    }
                    _ if trimmed.starts_with('/') => {
                        println!("unknown command; {} lists commands", "/help".yellow());
                    }
                    message => {
                        // Count the user's own entry before printing the rest.
                        seen += 1;
                        session.submit(message).await;
                    }
                }

                seen = print_new_entries(&session, seen).await;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("readline error: {e}");
                break;
            }
        }
    }

    debug!("shutting down shell");
    cancel.cancel();
    let _ = sync_task.await;
    let _ = reminder_task.await;
    session.close().await
}

/// Prints log entries appended since `seen`; returns the new high-water mark.
async fn print_new_entries(session: &vita_agent::ChatSession, seen: usize) -> usize {
    match session.history().await {
        Ok(history) => {
            for entry in history.iter().skip(seen) {
                print_entry(&entry.sender, &entry.text);
            }
            history.len()
        }
        Err(e) => {
            eprintln!("error: {e}");
            seen
        }
    }
}

fn print_help() {
    println!("  /offline   compose without delivering (messages queue up)");
    println!("  /online    restore connectivity (queued messages sync)");
    println!("  /sync      drain the unsent queue now");
    println!("  /summary   summarize the conversation log");
    println!("  /model     toggle between the configured models");
    println!("  /key K     store a new API key");
    println!("  /quit      exit");
}
