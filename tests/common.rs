// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging setup, engine fixtures, equator fixes, and run builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
//! Shared test utilities for `stride`

use std::sync::{Arc, Once};
use std::time::Duration;
use stride::config::TrackingConfig;
use stride::geo::equator_longitude_offset;
use stride::models::{LocationFix, RunSession, TrackingSnapshot, UnitsSnapshot};
use stride::sensors::{SensorSources, SyntheticSensors};
use stride::tracking::{ManualClock, TrackingEngine};

static INIT_LOGGER: Once = Once::new();

/// Fixed start instant for deterministic runs
pub const T0: i64 = 1_700_000_000_000;

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Engine wired to `sensors` on a manual clock frozen at [`T0`]
pub struct EngineFixture {
    pub sensors: Arc<SyntheticSensors>,
    pub clock: Arc<ManualClock>,
    pub engine: Arc<TrackingEngine>,
}

/// Build an engine with the default configuration
pub fn engine_fixture(sensors: SyntheticSensors) -> EngineFixture {
    engine_fixture_with(sensors, TrackingConfig::default())
}

/// Build an engine with a custom configuration
pub fn engine_fixture_with(sensors: SyntheticSensors, config: TrackingConfig) -> EngineFixture {
    init_test_logging();
    let sensors = Arc::new(sensors);
    let clock = Arc::new(ManualClock::new(T0));
    let engine = TrackingEngine::with_clock(
        SensorSources::synthetic(&sensors),
        config,
        clock.clone(),
    )
    .expect("default tracking config is valid");
    EngineFixture {
        sensors,
        clock,
        engine: Arc::new(engine),
    }
}

/// Fix on the equator `meters_east` of the origin
pub fn equator_fix(meters_east: f64, timestamp_ms: i64) -> LocationFix {
    LocationFix::at(0.0, equator_longitude_offset(meters_east), timestamp_ms)
}

/// Completed run starting at `started_at_unix_ms`
pub fn run_session(id: &str, started_at_unix_ms: i64) -> RunSession {
    RunSession {
        id: id.to_owned(),
        started_at_unix_ms,
        duration_seconds: 1_800,
        distance_meters: 5_000.0,
        average_speed_mps: 2.78,
        step_count: 5_400,
        units_snapshot: UnitsSnapshot::default(),
    }
}

/// Poll `engine` until `predicate` holds, failing the test after one second
pub async fn wait_for_snapshot(
    engine: &TrackingEngine,
    predicate: impl Fn(&TrackingSnapshot) -> bool,
) -> TrackingSnapshot {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
    loop {
        let snapshot = engine.snapshot();
        if predicate(&snapshot) {
            return snapshot;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached, last snapshot: {snapshot:?}"
        );
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
}
