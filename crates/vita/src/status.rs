// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vita status` command implementation.

use colored::Colorize;
use vita_config::VitaConfig;
use vita_core::VitaError;

use crate::bootstrap;

/// Prints database location, active model, log size, and queue depth.
pub async fn run_status(config: &VitaConfig) -> Result<(), VitaError> {
    let session = bootstrap::build_session(config, true).await?;

    let history = session.history().await?;
    let queued = session.queued().await?;

    println!("{}", "vita status".bold());
    println!("  database:        {}", config.storage.database_path);
    println!("  active model:    {}", session.active_model().await);
    println!("  log entries:     {}", history.len());
    println!("  queued messages: {}", queued.len());
    if !queued.is_empty() {
        println!(
            "  {}",
            "run `vita sync` while online to deliver the queue".yellow()
        );
    }

    session.close().await
}
