// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot CLI commands: send, sync, log, summary, and key management.

use colored::Colorize;
use vita_agent::SyncOutcome;
use vita_config::{FileCredentialStore, VitaConfig};
use vita_core::{CredentialStore, Sender, VitaError};

use crate::bootstrap;

/// `vita send`: submit one message and print what it produced.
pub async fn run_send(config: &VitaConfig, text: &str, offline: bool) -> Result<(), VitaError> {
    let session = bootstrap::build_session(config, !offline).await?;

    let before = session.history().await?.len();
    session.submit(text).await;

    // Print whatever the submission appended beyond the user's own entry.
    let history = session.history().await?;
    for entry in history.iter().skip(before + 1) {
        println!("{} {}", "vita>".green().bold(), entry.text);
    }

    let queued = session.queued().await?;
    if !queued.is_empty() {
        println!(
            "{}",
            format!("{} message(s) queued for the next sync", queued.len()).yellow()
        );
    }

    session.close().await
}

/// `vita sync`: drain the unsent queue once.
pub async fn run_sync(config: &VitaConfig) -> Result<(), VitaError> {
    let session = bootstrap::build_session(config, true).await?;
    let outcome = session.sync().await?;
    print_sync_outcome(&outcome);
    session.close().await
}

/// `vita log`: print the conversation log.
pub async fn run_log(config: &VitaConfig) -> Result<(), VitaError> {
    let session = bootstrap::build_session(config, true).await?;
    for entry in session.history().await? {
        print_entry(&entry.sender, &entry.text);
    }
    session.close().await
}

/// `vita summary`: summarize the log and print the result.
pub async fn run_summary(config: &VitaConfig) -> Result<(), VitaError> {
    let session = bootstrap::build_session(config, true).await?;
    let summary = session.summarize().await?;
    println!("{} {}", "vita>".green().bold(), summary);
    session.close().await
}

/// `vita key set`: store a new API key.
pub fn run_key_set(config: &VitaConfig, value: &str) -> Result<(), VitaError> {
    let store = FileCredentialStore::new(&config.openai);
    store.set(value)?;
    println!("API key updated ({})", store.path().display());
    Ok(())
}

/// `vita key path`: print the credential file location.
pub fn run_key_path(config: &VitaConfig) -> Result<(), VitaError> {
    let store = FileCredentialStore::new(&config.openai);
    println!("{}", store.path().display());
    Ok(())
}

/// Prints one log entry with a colored sender tag.
pub fn print_entry(sender: &Sender, text: &str) {
    let tag = match sender {
        Sender::User => "you>".cyan().bold(),
        Sender::Assistant => "vita>".green().bold(),
    };
    println!("{tag} {text}");
}

/// Prints a human-readable drain outcome.
pub fn print_sync_outcome(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::Offline => println!("{}", "offline, nothing attempted".yellow()),
        SyncOutcome::Empty => println!("queue empty, nothing to send"),
        SyncOutcome::Drained {
            queued,
            delivered,
            aborted,
        } => {
            if *aborted {
                println!(
                    "{}",
                    format!(
                        "delivered {delivered} of {queued}; a delivery failed and the rest of the queue was dropped"
                    )
                    .red()
                );
            } else {
                println!("delivered {delivered} of {queued} queued message(s)");
            }
        }
    }
}
