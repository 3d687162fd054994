// ABOUTME: Live tracking engine turning GPS fixes and step callbacks into run statistics
// ABOUTME: Owns the run lifecycle, sensor subscriptions, the elapsed-time ticker, and the accumulators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

//! # Tracking Engine
//!
//! Lifecycle is `Idle -> Tracking -> Idle`. While tracking, three event
//! sources feed the engine: the GPS fix stream, the step counter stream and
//! a ticker that refreshes elapsed time. Each is a spawned task that owns its
//! receiver and is tagged with the run's generation.
//!
//! All accumulators live in one `RwLock`-guarded state and are updated as a
//! group, so [`TrackingEngine::snapshot`] never observes a partial update.
//! `stop()` bumps the generation under the same lock before aborting the
//! tasks: an event that was already in flight carries the old generation and
//! is discarded, so nothing is counted after `stop()` returns.

use super::clock::{Clock, SystemClock};
use super::noise_gate::{GateRejection, NoiseGate};
use crate::config::TrackingConfig;
use crate::constants::tracking::MIN_AVERAGE_SPEED_SECONDS;
use crate::errors::{AppError, AppResult};
use crate::geo::haversine_distance;
use crate::logging::RunLogger;
use crate::models::{GpsAccuracy, LocationFix, StepReporting, StepUpdate, TrackingSnapshot};
use crate::sensors::{FixReceiver, PermissionStatus, SensorSources, StepReceiver};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Result of a `start()` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new run began with zeroed accumulators
    Started,
    /// A run was already active; nothing changed
    AlreadyTracking,
    /// Location access was refused; `permission_denied` is set in the snapshot
    PermissionDenied,
}

/// What the engine did with one position fix
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixDisposition {
    /// First fix of the run; nothing to measure against yet
    FirstFix,
    /// Delta in meters added to the distance
    Accepted(f64),
    /// Delta discarded by the noise gate
    Rejected(GateRejection),
    /// Engine idle or the fix belongs to a finished run
    Ignored,
}

struct EngineState {
    generation: u64,
    snapshot: TrackingSnapshot,
    previous_fix: Option<LocationFix>,
    step_reporting: StepReporting,
}

impl EngineState {
    const fn is_live(&self, generation: u64) -> bool {
        self.generation == generation && self.snapshot.is_tracking
    }
}

struct EngineCore {
    sources: SensorSources,
    gate: NoiseGate,
    clock: Arc<dyn Clock>,
    state: RwLock<EngineState>,
}

struct ActiveRun {
    tasks: Vec<JoinHandle<()>>,
}

/// Whole seconds between two instants, never negative
fn elapsed_seconds(started_ms: i64, now_ms: i64) -> u64 {
    u64::try_from(now_ms.saturating_sub(started_ms) / 1_000).unwrap_or(0)
}

/// Divisor for the average speed: elapsed whole seconds, at least one
fn average_window_seconds(started_ms: i64, now_ms: i64) -> f64 {
    (now_ms.saturating_sub(started_ms) / 1_000).max(MIN_AVERAGE_SPEED_SECONDS) as f64
}

impl EngineCore {
    // Every update is a plain field assignment, so a poisoned state is still consistent
    fn read(&self) -> RwLockReadGuard<'_, EngineState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, EngineState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply_fix(&self, generation: u64, fix: &LocationFix) -> FixDisposition {
        let now_ms = self.clock.now_ms();
        let mut state = self.write();
        if !state.is_live(generation) {
            return FixDisposition::Ignored;
        }

        // The new fix is the reference for the next delta even when this one is rejected
        let Some(previous) = state.previous_fix.replace(*fix) else {
            return FixDisposition::FirstFix;
        };

        let delta = haversine_distance(previous.coordinate(), fix.coordinate());
        match self.gate.check(delta) {
            Ok(accepted) => {
                let started_ms = state.snapshot.started_at_ms.unwrap_or(now_ms);
                let snapshot = &mut state.snapshot;
                snapshot.distance_meters += accepted;
                snapshot.average_speed_mps =
                    snapshot.distance_meters / average_window_seconds(started_ms, now_ms);
                if let Some(speed) = fix.usable_speed() {
                    snapshot.current_speed_mps = speed;
                }
                FixDisposition::Accepted(accepted)
            }
            Err(reason) => {
                drop(state);
                RunLogger::log_gate_rejection(delta, reason);
                FixDisposition::Rejected(reason)
            }
        }
    }

    fn apply_steps(&self, generation: u64, update: StepUpdate) -> bool {
        let mut state = self.write();
        if !state.is_live(generation) || !state.snapshot.step_sensor_available {
            return false;
        }
        let reporting = state.step_reporting;
        let count = &mut state.snapshot.step_count;
        *count = match reporting {
            StepReporting::Delta => count.saturating_add(update.steps),
            StepReporting::Cumulative => (*count).max(update.steps),
        };
        true
    }

    fn apply_tick(&self, generation: u64) -> bool {
        let now_ms = self.clock.now_ms();
        let mut state = self.write();
        if !state.is_live(generation) {
            return false;
        }
        if let Some(started_ms) = state.snapshot.started_at_ms {
            state.snapshot.elapsed_seconds = elapsed_seconds(started_ms, now_ms);
        }
        true
    }
}

/// Owner of one live run at a time
pub struct TrackingEngine {
    core: Arc<EngineCore>,
    config: TrackingConfig,
    lifecycle: Mutex<Option<ActiveRun>>,
}

impl TrackingEngine {
    /// Engine on the system clock
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` when the configuration does not validate
    pub fn new(sources: SensorSources, config: TrackingConfig) -> AppResult<Self> {
        Self::with_clock(sources, config, Arc::new(SystemClock))
    }

    /// Engine on a caller-supplied clock
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` when the configuration does not validate
    pub fn with_clock(
        sources: SensorSources,
        config: TrackingConfig,
        clock: Arc<dyn Clock>,
    ) -> AppResult<Self> {
        config.validate()?;
        Ok(Self {
            core: Arc::new(EngineCore {
                sources,
                gate: config.noise_gate,
                clock,
                state: RwLock::new(EngineState {
                    generation: 0,
                    snapshot: TrackingSnapshot::default(),
                    previous_fix: None,
                    step_reporting: StepReporting::default(),
                }),
            }),
            config,
            lifecycle: Mutex::new(None),
        })
    }

    /// Configuration in effect
    #[must_use]
    pub const fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// Begin a run.
    ///
    /// An undetermined permission is requested first. Concurrent callers
    /// queue on the lifecycle lock, so only one prompt is ever in flight and
    /// later callers observe its answer instead of prompting again.
    ///
    /// # Errors
    ///
    /// Returns an error only when the location source cannot be subscribed;
    /// permission refusal and a missing step counter are reported through the
    /// outcome and the snapshot flags
    pub async fn start(&self, accuracy: GpsAccuracy) -> AppResult<StartOutcome> {
        let mut active = self.lifecycle.lock().await;
        if active.is_some() {
            return Ok(StartOutcome::AlreadyTracking);
        }

        if !self.ensure_permission().await {
            let mut state = self.core.write();
            state.snapshot.has_permission = false;
            state.snapshot.permission_denied = true;
            return Ok(StartOutcome::PermissionDenied);
        }

        let profile = self.config.profile_for(accuracy);
        let fixes = self.core.sources.location.subscribe(profile)?;
        let steps = self.subscribe_steps();
        let step_sensor_available = steps.is_some();
        let step_reporting = self.core.sources.steps.reporting();
        let started_at_ms = self.core.clock.now_ms();

        let generation = {
            let mut state = self.core.write();
            state.generation += 1;
            state.snapshot = TrackingSnapshot {
                is_tracking: true,
                has_permission: true,
                permission_denied: false,
                step_sensor_available,
                started_at_ms: Some(started_at_ms),
                ..TrackingSnapshot::default()
            };
            state.previous_fix = None;
            state.step_reporting = step_reporting;
            state.generation
        };

        let mut tasks = vec![
            spawn_fix_pump(Arc::clone(&self.core), generation, fixes),
            spawn_ticker(
                Arc::clone(&self.core),
                generation,
                Duration::from_millis(self.config.tick_interval_ms),
            ),
        ];
        if let Some(steps) = steps {
            tasks.push(spawn_step_pump(Arc::clone(&self.core), generation, steps));
        }
        *active = Some(ActiveRun { tasks });

        debug!(generation, ?profile, "Sensor subscriptions active");
        RunLogger::log_run_started(accuracy, started_at_ms, step_sensor_available);
        Ok(StartOutcome::Started)
    }

    /// End the run and return its final snapshot, or `None` when idle
    pub async fn stop(&self) -> Option<TrackingSnapshot> {
        let mut active = self.lifecycle.lock().await;
        let run = active.take()?;

        let now_ms = self.core.clock.now_ms();
        let final_snapshot = {
            let mut state = self.core.write();
            state.generation += 1;
            if let Some(started_ms) = state.snapshot.started_at_ms {
                state.snapshot.elapsed_seconds = elapsed_seconds(started_ms, now_ms);
            }
            state.snapshot.is_tracking = false;
            state.previous_fix = None;
            state.snapshot
        };

        for task in run.tasks {
            task.abort();
        }

        RunLogger::log_run_stopped(
            final_snapshot.distance_meters,
            final_snapshot.elapsed_seconds,
            final_snapshot.step_count,
        );
        Some(final_snapshot)
    }

    /// Copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> TrackingSnapshot {
        self.core.read().snapshot
    }

    /// True between a successful `start()` and `stop()`
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.core.read().snapshot.is_tracking
    }

    /// Deliver a fix from the host's event thread
    pub fn on_position_fix(&self, fix: &LocationFix) -> FixDisposition {
        let generation = self.core.read().generation;
        self.core.apply_fix(generation, fix)
    }

    /// Deliver a step callback from the host's event thread. Returns false when ignored.
    pub fn on_step_update(&self, update: StepUpdate) -> bool {
        let generation = self.core.read().generation;
        self.core.apply_steps(generation, update)
    }

    /// Refresh elapsed time from the clock. Returns false when idle.
    pub fn tick(&self) -> bool {
        let generation = self.core.read().generation;
        self.core.apply_tick(generation)
    }

    async fn ensure_permission(&self) -> bool {
        let permissions = &self.core.sources.permissions;
        let (status, prompted) = match permissions.status() {
            PermissionStatus::Undetermined => (permissions.request().await, true),
            status => (status, false),
        };
        let granted = status == PermissionStatus::Granted;
        RunLogger::log_permission(granted, prompted);
        granted
    }

    fn subscribe_steps(&self) -> Option<StepReceiver> {
        let steps = &self.core.sources.steps;
        if !steps.is_available() {
            RunLogger::log_sensor_degraded(
                "step counter",
                &AppError::sensor_unavailable("step counter"),
            );
            return None;
        }
        steps.reset_counter();
        match steps.subscribe() {
            Ok(receiver) => Some(receiver),
            Err(error) => {
                RunLogger::log_sensor_degraded("step counter", &error);
                None
            }
        }
    }
}

impl Drop for TrackingEngine {
    fn drop(&mut self) {
        if let Some(run) = self.lifecycle.get_mut().take() {
            for task in run.tasks {
                task.abort();
            }
        }
    }
}

impl std::fmt::Debug for TrackingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingEngine")
            .field("config", &self.config)
            .field("snapshot", &self.snapshot())
            .finish_non_exhaustive()
    }
}

fn spawn_fix_pump(
    core: Arc<EngineCore>,
    generation: u64,
    mut fixes: FixReceiver,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(fix) = fixes.recv().await {
            if matches!(core.apply_fix(generation, &fix), FixDisposition::Ignored) {
                break;
            }
        }
        debug!(generation, "Fix stream closed");
    })
}

fn spawn_step_pump(
    core: Arc<EngineCore>,
    generation: u64,
    mut steps: StepReceiver,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(update) = steps.recv().await {
            if !core.apply_steps(generation, update) {
                break;
            }
        }
        debug!(generation, "Step stream closed");
    })
}

fn spawn_ticker(core: Arc<EngineCore>, generation: u64, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            if !core.apply_tick(generation) {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_seconds_floors() {
        assert_eq!(elapsed_seconds(0, 999), 0);
        assert_eq!(elapsed_seconds(0, 1_000), 1);
        assert_eq!(elapsed_seconds(1_000, 6_500), 5);
        assert_eq!(elapsed_seconds(5_000, 1_000), 0);
    }

    #[test]
    fn test_average_window_has_floor_of_one_second() {
        assert!((average_window_seconds(0, 0) - 1.0).abs() < f64::EPSILON);
        assert!((average_window_seconds(0, 400) - 1.0).abs() < f64::EPSILON);
        assert!((average_window_seconds(0, 5_000) - 5.0).abs() < f64::EPSILON);
    }
}
