// ABOUTME: Replay command for stride-cli
// ABOUTME: Feeds a recorded fix/step stream through the tracking engine on a manual clock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use stride::models::{GpsAccuracy, LocationFix, RunSession, StepReporting, StepUpdate};
use stride::run::RunController;
use stride::sensors::{SensorSources, SyntheticSensors};
use stride::tracking::{FixDisposition, ManualClock, StartOutcome, TrackingEngine};
use tracing::{info, warn};

use super::CliContext;
use crate::helpers::display::display_run;

/// A recorded run: events in delivery order
#[derive(Debug, Deserialize)]
struct Recording {
    /// Convention of the recorded step events
    #[serde(default)]
    step_reporting: StepReporting,
    events: Vec<ReplayEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ReplayEvent {
    Fix(LocationFix),
    Steps { steps: u64, timestamp_ms: i64 },
}

impl ReplayEvent {
    const fn timestamp_ms(&self) -> i64 {
        match self {
            Self::Fix(fix) => fix.timestamp_ms,
            Self::Steps { timestamp_ms, .. } => *timestamp_ms,
        }
    }
}

#[derive(Debug, Default)]
struct ReplayTally {
    accepted: usize,
    jitter_or_teleport: usize,
}

impl ReplayTally {
    fn record(&mut self, disposition: FixDisposition) {
        match disposition {
            FixDisposition::Accepted(_) => self.accepted += 1,
            FixDisposition::Rejected(_) => self.jitter_or_teleport += 1,
            FixDisposition::FirstFix | FixDisposition::Ignored => {}
        }
    }
}

async fn read_recording(path: &Path) -> Result<Recording> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading recording {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing recording {}", path.display()))
}

/// Replay a recording and print (and unless `dry_run`, save) the resulting run
pub async fn run(
    ctx: &CliContext,
    path: &Path,
    accuracy: Option<GpsAccuracy>,
    dry_run: bool,
) -> Result<()> {
    let recording = read_recording(path).await?;
    let first_ms = recording
        .events
        .first()
        .map_or(0, ReplayEvent::timestamp_ms);

    let clock = Arc::new(ManualClock::new(first_ms));
    let sensors =
        Arc::new(SyntheticSensors::new().with_step_reporting(recording.step_reporting));
    let engine = TrackingEngine::with_clock(
        SensorSources::synthetic(&sensors),
        ctx.config.tracking,
        clock.clone(),
    )?;
    let controller = RunController::new(engine, ctx.settings.clone(), ctx.history.clone());

    let settings = ctx.settings.current().await;
    let accuracy = accuracy.unwrap_or(settings.gps_accuracy);
    match controller.engine().start(accuracy).await? {
        StartOutcome::Started => {}
        other => bail!("replay could not start tracking: {other:?}"),
    }

    let mut tally = ReplayTally::default();
    for event in &recording.events {
        clock.set(event.timestamp_ms());
        controller.engine().tick();
        match event {
            ReplayEvent::Fix(fix) => tally.record(controller.engine().on_position_fix(fix)),
            ReplayEvent::Steps { steps, .. } => {
                controller.engine().on_step_update(StepUpdate::new(*steps));
            }
        }
    }
    info!(
        events = recording.events.len(),
        accepted = tally.accepted,
        rejected = tally.jitter_or_teleport,
        "Replay delivered"
    );

    let session = if dry_run {
        let snapshot = controller
            .engine()
            .stop()
            .await
            .ok_or_else(|| anyhow!("tracking stopped before the replay finished"))?;
        RunSession::from_snapshot(&snapshot, &settings, first_ms)
    } else {
        let finished = controller
            .finish_run()
            .await
            .ok_or_else(|| anyhow!("tracking stopped before the replay finished"))?;
        if let Some(error) = &finished.history.error {
            warn!("Run may not have been saved: {error}");
        }
        finished.session
    };

    display_run(&session);
    println!(
        "   Fixes:    {} accepted, {} discarded by the noise gate",
        tally.accepted, tally.jitter_or_teleport
    );
    if dry_run {
        println!("   (dry run: not saved)");
    }
    Ok(())
}
