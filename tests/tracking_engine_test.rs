// ABOUTME: Integration tests for the live tracking engine
// ABOUTME: Covers the run lifecycle, the noise gate through real coordinates, steps, and late events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::{engine_fixture, engine_fixture_with, equator_fix, wait_for_snapshot, T0};
use std::sync::Arc;
use std::time::Duration;
use stride::config::TrackingConfig;
use stride::geo::haversine_distance;
use stride::errors::ErrorCode;
use stride::models::{GpsAccuracy, LocationFix, RunSession, StepReporting, StepUpdate, UserSettings};
use stride::sensors::{PermissionStatus, SamplingProfile, SensorSources, SyntheticSensors};
use stride::tracking::{FixDisposition, GateRejection, NoiseGate, StartOutcome, TrackingEngine};

#[tokio::test]
async fn test_end_to_end_ten_meters_in_five_seconds() {
    let fx = engine_fixture(SyntheticSensors::new());
    assert_eq!(
        fx.engine.start(GpsAccuracy::High).await.unwrap(),
        StartOutcome::Started
    );

    let a = LocationFix::at(0.0, 0.0, T0);
    assert_eq!(fx.engine.on_position_fix(&a), FixDisposition::FirstFix);

    fx.clock.advance_secs(5);
    let b = LocationFix::at(0.0, 0.00009, T0 + 5_000);
    assert!(matches!(
        fx.engine.on_position_fix(&b),
        FixDisposition::Accepted(_)
    ));

    let live = fx.engine.snapshot();
    assert!((live.distance_meters - 10.0).abs() < 0.5, "{live:?}");
    assert!((live.average_speed_mps - 2.0).abs() < 0.1, "{live:?}");

    let final_snapshot = fx.engine.stop().await.expect("run was active");
    assert!(!final_snapshot.is_tracking);
    assert_eq!(final_snapshot.elapsed_seconds, 5);
    assert_eq!(final_snapshot.started_at_ms, Some(T0));

    let session = RunSession::from_snapshot(&final_snapshot, &UserSettings::default(), 0);
    assert_eq!(session.distance_meters.to_bits(), final_snapshot.distance_meters.to_bits());
    assert_eq!(session.started_at_unix_ms, T0);
    assert_eq!(session.duration_seconds, 5);
}

#[tokio::test]
async fn test_noise_gate_boundaries_on_real_coordinates() {
    let fx = engine_fixture(SyntheticSensors::new());
    fx.engine.start(GpsAccuracy::High).await.unwrap();

    let mut position = 0.0;
    fx.engine.on_position_fix(&equator_fix(position, T0));

    let mut step = |meters: f64| {
        position += meters;
        fx.engine.on_position_fix(&equator_fix(position, T0))
    };

    assert_eq!(step(1.99), FixDisposition::Rejected(GateRejection::Jitter));
    assert!(matches!(step(2.01), FixDisposition::Accepted(d) if (d - 2.01).abs() < 1e-6));
    assert!(matches!(step(99.99), FixDisposition::Accepted(d) if (d - 99.99).abs() < 1e-6));
    assert_eq!(step(100.01), FixDisposition::Rejected(GateRejection::Teleport));
    assert_eq!(step(0.0), FixDisposition::Rejected(GateRejection::Jitter));

    let distance = fx.engine.snapshot().distance_meters;
    assert!((distance - 102.0).abs() < 1e-6, "got {distance}");
}

#[tokio::test]
async fn test_noise_gate_exact_bounds_on_real_coordinates() {
    let fx = engine_fixture(SyntheticSensors::new());
    fx.engine.start(GpsAccuracy::High).await.unwrap();

    let origin = equator_fix(0.0, T0);
    let two = equator_fix(2.0, T0);
    let hundred = equator_fix(100.0, T0);
    assert_eq!(
        haversine_distance(origin.coordinate(), two.coordinate()).to_bits(),
        2.0_f64.to_bits()
    );
    assert_eq!(
        haversine_distance(origin.coordinate(), hundred.coordinate()).to_bits(),
        100.0_f64.to_bits()
    );

    fx.engine.on_position_fix(&origin);
    assert_eq!(
        fx.engine.on_position_fix(&two),
        FixDisposition::Rejected(GateRejection::Jitter)
    );
    assert_eq!(
        fx.engine.on_position_fix(&origin),
        FixDisposition::Rejected(GateRejection::Jitter)
    );
    assert_eq!(
        fx.engine.on_position_fix(&hundred),
        FixDisposition::Rejected(GateRejection::Teleport)
    );
    assert_eq!(
        fx.engine.on_position_fix(&origin),
        FixDisposition::Rejected(GateRejection::Teleport)
    );

    assert!(fx.engine.snapshot().distance_meters.abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_rejected_fix_still_becomes_reference() {
    let fx = engine_fixture(SyntheticSensors::new());
    fx.engine.start(GpsAccuracy::High).await.unwrap();

    fx.engine.on_position_fix(&equator_fix(0.0, T0));
    // Warp artifact: dropped, but the next delta is measured from it
    assert_eq!(
        fx.engine.on_position_fix(&equator_fix(150.0, T0)),
        FixDisposition::Rejected(GateRejection::Teleport)
    );
    assert!(matches!(
        fx.engine.on_position_fix(&equator_fix(160.0, T0)),
        FixDisposition::Accepted(_)
    ));

    let distance = fx.engine.snapshot().distance_meters;
    assert!((distance - 10.0).abs() < 1e-6, "got {distance}");
}

#[tokio::test]
async fn test_distance_is_monotonic() {
    let fx = engine_fixture(SyntheticSensors::new());
    fx.engine.start(GpsAccuracy::High).await.unwrap();

    let offsets = [0.0, 3.0, 1.0, 250.0, 255.0, 254.5, 300.0, 290.0, 291.0, 280.0];
    let mut last = 0.0;
    for (i, meters) in offsets.iter().enumerate() {
        fx.clock.advance_secs(1);
        fx.engine
            .on_position_fix(&equator_fix(*meters, T0 + i as i64 * 1_000));
        let distance = fx.engine.snapshot().distance_meters;
        assert!(distance >= last, "distance went from {last} to {distance}");
        last = distance;
    }
    assert!(last > 0.0);
}

#[tokio::test]
async fn test_second_start_does_not_reset() {
    let fx = engine_fixture(SyntheticSensors::new());
    fx.engine.start(GpsAccuracy::High).await.unwrap();
    fx.engine.on_position_fix(&equator_fix(0.0, T0));
    fx.engine.on_position_fix(&equator_fix(10.0, T0));

    assert_eq!(
        fx.engine.start(GpsAccuracy::High).await.unwrap(),
        StartOutcome::AlreadyTracking
    );
    assert!((fx.engine.snapshot().distance_meters - 10.0).abs() < 1e-6);

    fx.engine.stop().await;
    assert!((fx.engine.snapshot().distance_meters - 10.0).abs() < 1e-6);

    assert_eq!(
        fx.engine.start(GpsAccuracy::High).await.unwrap(),
        StartOutcome::Started
    );
    let restarted = fx.engine.snapshot();
    assert!(restarted.distance_meters.abs() < f64::EPSILON);
    assert_eq!(restarted.step_count, 0);
    assert_eq!(restarted.elapsed_seconds, 0);

    // The first fix of the new run has no predecessor
    assert_eq!(
        fx.engine.on_position_fix(&equator_fix(20.0, T0)),
        FixDisposition::FirstFix
    );
}

#[tokio::test]
async fn test_stop_is_idempotent() {
    let fx = engine_fixture(SyntheticSensors::new());
    assert!(fx.engine.stop().await.is_none());

    fx.engine.start(GpsAccuracy::High).await.unwrap();
    assert!(fx.engine.stop().await.is_some());
    assert!(fx.engine.stop().await.is_none());
    assert!(!fx.engine.is_tracking());
}

#[tokio::test]
async fn test_events_after_stop_are_ignored() {
    let fx = engine_fixture(SyntheticSensors::new());
    fx.engine.start(GpsAccuracy::High).await.unwrap();
    fx.engine.on_position_fix(&equator_fix(0.0, T0));
    fx.engine.on_position_fix(&equator_fix(10.0, T0));
    fx.engine.on_step_update(StepUpdate::new(12));

    let final_snapshot = fx.engine.stop().await.unwrap();

    assert_eq!(
        fx.engine.on_position_fix(&equator_fix(20.0, T0)),
        FixDisposition::Ignored
    );
    assert!(!fx.engine.on_step_update(StepUpdate::new(5)));
    assert!(!fx.engine.tick());

    // Whatever was still queued on the old subscription is discarded too
    fx.sensors.push_fix(equator_fix(30.0, T0));
    fx.sensors.push_steps(40);
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(fx.engine.snapshot(), final_snapshot);
}

#[tokio::test]
async fn test_subscription_pumps_deliver_events() {
    let fx = engine_fixture(SyntheticSensors::new());
    fx.engine.start(GpsAccuracy::High).await.unwrap();
    assert!(fx.sensors.has_location_subscriber());

    assert!(fx.sensors.push_fix(equator_fix(0.0, T0)));
    fx.clock.advance_secs(4);
    assert!(fx.sensors.push_fix(equator_fix(12.0, T0 + 4_000).with_speed(3.1)));
    assert!(fx.sensors.push_steps(15));

    let snapshot =
        wait_for_snapshot(&fx.engine, |s| s.distance_meters > 0.0 && s.step_count > 0).await;
    assert!((snapshot.distance_meters - 12.0).abs() < 1e-6);
    assert!((snapshot.average_speed_mps - 3.0).abs() < 1e-6);
    assert!((snapshot.current_speed_mps - 3.1).abs() < f64::EPSILON);
    assert_eq!(snapshot.step_count, 15);
}

#[tokio::test]
async fn test_denied_permission_sets_flags() {
    let fx = engine_fixture(SyntheticSensors::new().with_permission(PermissionStatus::Denied));

    assert_eq!(
        fx.engine.start(GpsAccuracy::High).await.unwrap(),
        StartOutcome::PermissionDenied
    );
    let snapshot = fx.engine.snapshot();
    assert!(snapshot.permission_denied);
    assert!(!snapshot.has_permission);
    assert!(!snapshot.is_tracking);
    assert_eq!(fx.sensors.request_count(), 0);
    assert_eq!(
        fx.engine.on_position_fix(&equator_fix(0.0, T0)),
        FixDisposition::Ignored
    );
}

#[tokio::test]
async fn test_undetermined_permission_is_requested() {
    let fx = engine_fixture(
        SyntheticSensors::new()
            .with_permission(PermissionStatus::Undetermined)
            .answering(PermissionStatus::Granted),
    );

    assert_eq!(
        fx.engine.start(GpsAccuracy::High).await.unwrap(),
        StartOutcome::Started
    );
    let snapshot = fx.engine.snapshot();
    assert!(snapshot.has_permission);
    assert!(!snapshot.permission_denied);
    assert_eq!(fx.sensors.request_count(), 1);
}

#[tokio::test]
async fn test_concurrent_starts_share_one_prompt() {
    let fx = engine_fixture(
        SyntheticSensors::new()
            .with_permission(PermissionStatus::Undetermined)
            .answering(PermissionStatus::Granted)
            .with_request_delay(Duration::from_millis(50)),
    );

    let first = Arc::clone(&fx.engine);
    let second = Arc::clone(&fx.engine);
    let (a, b) = tokio::join!(
        async move { first.start(GpsAccuracy::High).await.unwrap() },
        async move { second.start(GpsAccuracy::High).await.unwrap() },
    );

    let mut outcomes = [a, b];
    outcomes.sort_by_key(|o| *o != StartOutcome::Started);
    assert_eq!(
        outcomes,
        [StartOutcome::Started, StartOutcome::AlreadyTracking]
    );
    assert_eq!(fx.sensors.request_count(), 1);
}

#[tokio::test]
async fn test_concurrent_starts_after_refusal_do_not_reprompt() {
    let fx = engine_fixture(
        SyntheticSensors::new()
            .with_permission(PermissionStatus::Undetermined)
            .answering(PermissionStatus::Denied)
            .with_request_delay(Duration::from_millis(20)),
    );

    let (a, b) = tokio::join!(
        fx.engine.start(GpsAccuracy::High),
        fx.engine.start(GpsAccuracy::High),
    );
    assert_eq!(a.unwrap(), StartOutcome::PermissionDenied);
    assert_eq!(b.unwrap(), StartOutcome::PermissionDenied);
    assert_eq!(fx.sensors.request_count(), 1);
}

#[tokio::test]
async fn test_missing_step_sensor_degrades_to_zero() {
    let fx = engine_fixture(SyntheticSensors::new().without_step_sensor());

    assert_eq!(
        fx.engine.start(GpsAccuracy::High).await.unwrap(),
        StartOutcome::Started
    );
    assert!(!fx.engine.snapshot().step_sensor_available);
    assert!(!fx.engine.on_step_update(StepUpdate::new(10)));

    fx.engine.on_position_fix(&equator_fix(0.0, T0));
    fx.engine.on_position_fix(&equator_fix(10.0, T0));
    let snapshot = fx.engine.snapshot();
    assert_eq!(snapshot.step_count, 0);
    assert!(snapshot.distance_meters > 0.0);
}

#[tokio::test]
async fn test_delta_steps_accumulate() {
    let fx = engine_fixture(SyntheticSensors::new());
    fx.engine.start(GpsAccuracy::High).await.unwrap();
    assert_eq!(fx.sensors.counter_resets(), 1);

    fx.engine.on_step_update(StepUpdate::new(5));
    fx.engine.on_step_update(StepUpdate::new(7));
    assert_eq!(fx.engine.snapshot().step_count, 12);
}

#[tokio::test]
async fn test_cumulative_steps_never_decrease() {
    let fx = engine_fixture(SyntheticSensors::new().with_step_reporting(StepReporting::Cumulative));
    fx.engine.start(GpsAccuracy::High).await.unwrap();

    fx.engine.on_step_update(StepUpdate::new(5));
    fx.engine.on_step_update(StepUpdate::new(12));
    fx.engine.on_step_update(StepUpdate::new(10));
    assert_eq!(fx.engine.snapshot().step_count, 12);

    fx.engine.stop().await;
    fx.engine.start(GpsAccuracy::High).await.unwrap();
    assert_eq!(fx.sensors.counter_resets(), 2);
    assert_eq!(fx.engine.snapshot().step_count, 0);
}

#[tokio::test]
async fn test_elapsed_time_follows_the_clock() {
    let fx = engine_fixture(SyntheticSensors::new());
    fx.engine.start(GpsAccuracy::High).await.unwrap();

    fx.clock.advance(65_999);
    assert!(fx.engine.tick());
    assert_eq!(fx.engine.snapshot().elapsed_seconds, 65);
}

#[tokio::test]
async fn test_ticker_refreshes_elapsed_time() {
    let config = TrackingConfig {
        tick_interval_ms: 5,
        ..TrackingConfig::default()
    };
    let fx = engine_fixture_with(SyntheticSensors::new(), config);
    fx.engine.start(GpsAccuracy::High).await.unwrap();

    fx.clock.advance_secs(3);
    let snapshot = wait_for_snapshot(&fx.engine, |s| s.elapsed_seconds == 3).await;
    assert!(snapshot.is_tracking);
}

#[tokio::test]
async fn test_current_speed_only_from_accepted_fixes() {
    let fx = engine_fixture(SyntheticSensors::new());
    fx.engine.start(GpsAccuracy::High).await.unwrap();

    fx.engine.on_position_fix(&equator_fix(0.0, T0).with_speed(9.0));
    assert!(fx.engine.snapshot().current_speed_mps.abs() < f64::EPSILON);

    fx.engine.on_position_fix(&equator_fix(10.0, T0).with_speed(3.2));
    assert!((fx.engine.snapshot().current_speed_mps - 3.2).abs() < f64::EPSILON);

    // Rejected fix: speed ignored
    fx.engine.on_position_fix(&equator_fix(10.5, T0).with_speed(8.0));
    // Accepted fix with an invalid speed: left unchanged
    fx.engine.on_position_fix(&equator_fix(20.0, T0).with_speed(-1.0));
    // Accepted fix without a speed: left unchanged
    fx.engine.on_position_fix(&equator_fix(30.0, T0));
    assert!((fx.engine.snapshot().current_speed_mps - 3.2).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_sampling_profile_follows_accuracy() {
    let fx = engine_fixture(SyntheticSensors::new());
    fx.engine.start(GpsAccuracy::Balanced).await.unwrap();
    assert_eq!(fx.sensors.last_profile(), Some(SamplingProfile::BALANCED));
    fx.engine.stop().await;

    fx.engine.start(GpsAccuracy::High).await.unwrap();
    let profile = fx.sensors.last_profile().unwrap();
    assert_eq!(profile.min_interval_ms, 1_000);
    assert!((profile.min_distance_meters - 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_custom_gate_bounds() {
    let config = TrackingConfig {
        noise_gate: NoiseGate::new(0.5, 20.0).unwrap(),
        ..TrackingConfig::default()
    };
    let fx = engine_fixture_with(SyntheticSensors::new(), config);
    fx.engine.start(GpsAccuracy::High).await.unwrap();

    fx.engine.on_position_fix(&equator_fix(0.0, T0));
    assert!(matches!(
        fx.engine.on_position_fix(&equator_fix(1.0, T0)),
        FixDisposition::Accepted(_)
    ));
    assert_eq!(
        fx.engine.on_position_fix(&equator_fix(31.0, T0)),
        FixDisposition::Rejected(GateRejection::Teleport)
    );
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let sensors = Arc::new(SyntheticSensors::new());
    let config = TrackingConfig {
        noise_gate: NoiseGate {
            min_delta_meters: 50.0,
            max_delta_meters: 10.0,
        },
        ..TrackingConfig::default()
    };
    let err = TrackingEngine::new(SensorSources::synthetic(&sensors), config).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}
