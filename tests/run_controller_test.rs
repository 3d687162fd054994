// ABOUTME: Integration tests for the run lifecycle glue
// ABOUTME: A tracked run flows from the engine through settings into history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::{equator_fix, init_test_logging, T0};
use std::sync::Arc;
use stride::config::TrackingConfig;
use stride::formatters::{format_recorded_stat, StatKind};
use stride::history::RunHistoryStore;
use stride::models::{DistanceUnit, GpsAccuracy, PaceUnit, SpeedUnit, StepUpdate, UserSettings};
use stride::run::RunController;
use stride::sensors::{SamplingProfile, SensorSources, SyntheticSensors};
use stride::settings::SettingsStore;
use stride::storage::{KeyValueStore, MemoryStore};
use stride::tracking::{ManualClock, StartOutcome, TrackingEngine};

struct Fixture {
    backend: Arc<MemoryStore>,
    sensors: Arc<SyntheticSensors>,
    clock: Arc<ManualClock>,
    controller: RunController,
}

fn fixture() -> Fixture {
    init_test_logging();
    let backend = Arc::new(MemoryStore::new());
    let kv: Arc<dyn KeyValueStore> = backend.clone();
    let sensors = Arc::new(SyntheticSensors::new());
    let clock = Arc::new(ManualClock::new(T0));
    let engine = TrackingEngine::with_clock(
        SensorSources::synthetic(&sensors),
        TrackingConfig::default(),
        clock.clone(),
    )
    .unwrap();
    let controller = RunController::new(
        engine,
        Arc::new(SettingsStore::new(Arc::clone(&kv))),
        Arc::new(RunHistoryStore::with_default_cap(kv)),
    );
    Fixture {
        backend,
        sensors,
        clock,
        controller,
    }
}

#[tokio::test]
async fn test_finished_run_lands_in_history_with_units() {
    let fx = fixture();
    let miles = UserSettings {
        distance_unit: DistanceUnit::Miles,
        pace_unit: PaceUnit::MinPerMile,
        speed_unit: SpeedUnit::Mph,
        gps_accuracy: GpsAccuracy::Balanced,
        ..UserSettings::default()
    };
    assert!(fx.controller.settings().save(miles).await.is_confirmed());

    assert_eq!(fx.controller.start_run().await.unwrap(), StartOutcome::Started);
    assert_eq!(fx.sensors.last_profile(), Some(SamplingProfile::BALANCED));

    let engine = fx.controller.engine();
    engine.on_position_fix(&equator_fix(0.0, T0));
    fx.clock.advance_secs(10);
    engine.on_position_fix(&equator_fix(30.0, T0 + 10_000));
    engine.on_step_update(StepUpdate::new(28));

    let finished = fx.controller.finish_run().await.expect("run was active");
    assert!(finished.history.is_confirmed());
    assert_eq!(finished.session.units_snapshot, miles.units_snapshot());
    assert_eq!(
        finished.session.distance_meters.to_bits(),
        finished.snapshot.distance_meters.to_bits()
    );
    assert_eq!(finished.session.step_count, 28);
    assert_eq!(finished.session.duration_seconds, 10);
    assert_eq!(finished.history.value, vec![finished.session.clone()]);

    // Later unit changes do not alter how the stored run renders
    assert!(fx
        .controller
        .settings()
        .save(UserSettings::default())
        .await
        .is_confirmed());
    let stored = fx.controller.history().get(&finished.session.id).await.unwrap();
    assert_eq!(format_recorded_stat(StatKind::Distance, &stored), "0.02");
    assert_eq!(StatKind::Distance.label(&stored.units_snapshot), "mi");
}

#[tokio::test]
async fn test_finish_without_run_is_none() {
    let fx = fixture();
    assert!(fx.controller.finish_run().await.is_none());
    assert!(fx.controller.history().is_empty().await);
}

#[tokio::test]
async fn test_unconfirmed_save_still_returns_session() {
    let fx = fixture();
    fx.controller.start_run().await.unwrap();
    fx.backend.set_fail_writes(true);

    let finished = fx.controller.finish_run().await.unwrap();
    assert!(!finished.history.is_confirmed());
    assert_eq!(finished.history.value.len(), 1);
    assert_eq!(finished.history.value[0].id, finished.session.id);
}
