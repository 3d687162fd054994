// ABOUTME: History commands for stride-cli
// ABOUTME: Handles list, show, delete, clear, and summary over the stored runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

use anyhow::{bail, Result};
use stride::errors::StoreOutcome;
use tracing::{info, warn};

use super::CliContext;
use crate::helpers::display::{display_run, display_run_row, display_summary};

fn warn_if_unconfirmed<T>(outcome: &StoreOutcome<T>, operation: &str) {
    if let Some(error) = &outcome.error {
        warn!("History {operation} may not have been persisted: {error}");
    }
}

/// List stored runs, newest first
pub async fn list(ctx: &CliContext) -> Result<()> {
    let outcome = ctx.history.load_all().await;
    warn_if_unconfirmed(&outcome, "load");

    if outcome.value.is_empty() {
        println!("No runs recorded yet.");
        return Ok(());
    }
    for session in &outcome.value {
        display_run_row(session);
    }
    Ok(())
}

/// Show one run
pub async fn show(ctx: &CliContext, id: &str) -> Result<()> {
    let Some(session) = ctx.history.get(id).await else {
        bail!("no run with id '{id}'");
    };
    display_run(&session);
    Ok(())
}

/// Delete one run; an unknown id is reported but not an error
pub async fn delete(ctx: &CliContext, id: &str) -> Result<()> {
    let before = ctx.history.len().await;
    let outcome = ctx.history.delete_run(id).await;
    warn_if_unconfirmed(&outcome, "delete");

    if outcome.value.len() == before {
        println!("No run with id '{id}'; nothing deleted.");
    } else {
        info!(run.id = %id, "Run deleted");
        println!("Deleted run {id}. {} runs remain.", outcome.value.len());
    }
    Ok(())
}

/// Delete every run
pub async fn clear(ctx: &CliContext, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!("clearing history is irreversible; pass --yes to confirm");
    }
    let outcome = ctx.history.clear_all().await;
    warn_if_unconfirmed(&outcome, "clear");
    println!("History cleared.");
    Ok(())
}

/// Totals across stored runs in the current units
pub async fn summary(ctx: &CliContext) -> Result<()> {
    let summary = ctx.history.summary().await;
    let units = ctx.settings.current().await.units_snapshot();
    display_summary(&summary, &units);
    Ok(())
}
