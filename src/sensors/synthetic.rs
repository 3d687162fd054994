// ABOUTME: Synthetic sensor device for deterministic replays and tests
// ABOUTME: Fixes and step counts are pushed programmatically instead of read from hardware
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

//! One [`SyntheticSensors`] value implements every sensor seam. The host
//! pushes fixes and step counts; each push reaches the current subscriber,
//! if any. Permission answers, request latency and step sensor presence are
//! configured up front with builder methods.

use super::{
    FixReceiver, LocationPermissions, LocationSource, PermissionStatus, SamplingProfile,
    StepReceiver, StepSource,
};
use crate::errors::{AppError, AppResult};
use crate::models::{LocationFix, StepReporting, StepUpdate};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Programmable device exposing location, permission and step sensors
#[derive(Debug)]
pub struct SyntheticSensors {
    permission: Mutex<PermissionStatus>,
    answer: PermissionStatus,
    request_delay: Option<Duration>,
    requests: AtomicUsize,
    step_sensor: bool,
    step_reporting: StepReporting,
    counter_resets: AtomicUsize,
    fix_tx: Mutex<Option<mpsc::UnboundedSender<LocationFix>>>,
    step_tx: Mutex<Option<mpsc::UnboundedSender<StepUpdate>>>,
    last_profile: Mutex<Option<SamplingProfile>>,
}

impl Default for SyntheticSensors {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutex access that survives a panicked holder; the guarded values are plain data
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SyntheticSensors {
    /// Permission already granted, step counter present, delta reporting
    #[must_use]
    pub fn new() -> Self {
        Self {
            permission: Mutex::new(PermissionStatus::Granted),
            answer: PermissionStatus::Granted,
            request_delay: None,
            requests: AtomicUsize::new(0),
            step_sensor: true,
            step_reporting: StepReporting::Delta,
            counter_resets: AtomicUsize::new(0),
            fix_tx: Mutex::new(None),
            step_tx: Mutex::new(None),
            last_profile: Mutex::new(None),
        }
    }

    /// Set the status reported before any request
    #[must_use]
    pub fn with_permission(self, status: PermissionStatus) -> Self {
        *lock(&self.permission) = status;
        self
    }

    /// Set how the simulated user answers a permission prompt
    #[must_use]
    pub const fn answering(mut self, answer: PermissionStatus) -> Self {
        self.answer = answer;
        self
    }

    /// Delay each permission prompt, simulating the user reading the dialog
    #[must_use]
    pub const fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = Some(delay);
        self
    }

    /// Simulate a device without a step counter
    #[must_use]
    pub const fn without_step_sensor(mut self) -> Self {
        self.step_sensor = false;
        self
    }

    /// Set the step counting convention
    #[must_use]
    pub const fn with_step_reporting(mut self, reporting: StepReporting) -> Self {
        self.step_reporting = reporting;
        self
    }

    /// Deliver a fix to the current subscriber. Returns false when nobody listens.
    pub fn push_fix(&self, fix: LocationFix) -> bool {
        let mut guard = lock(&self.fix_tx);
        match guard.as_ref() {
            Some(tx) if tx.send(fix).is_ok() => true,
            Some(_) => {
                *guard = None;
                false
            }
            None => false,
        }
    }

    /// Deliver a step callback to the current subscriber. Returns false when nobody listens.
    pub fn push_steps(&self, steps: u64) -> bool {
        let mut guard = lock(&self.step_tx);
        match guard.as_ref() {
            Some(tx) if tx.send(StepUpdate::new(steps)).is_ok() => true,
            Some(_) => {
                *guard = None;
                false
            }
            None => false,
        }
    }

    /// Number of permission prompts shown
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Number of times the step counter was zeroed
    #[must_use]
    pub fn counter_resets(&self) -> usize {
        self.counter_resets.load(Ordering::SeqCst)
    }

    /// Sampling profile of the most recent location subscription
    #[must_use]
    pub fn last_profile(&self) -> Option<SamplingProfile> {
        *lock(&self.last_profile)
    }

    /// True while a location subscriber holds its receiver
    #[must_use]
    pub fn has_location_subscriber(&self) -> bool {
        lock(&self.fix_tx)
            .as_ref()
            .is_some_and(|tx| !tx.is_closed())
    }
}

#[async_trait]
impl LocationPermissions for SyntheticSensors {
    fn status(&self) -> PermissionStatus {
        *lock(&self.permission)
    }

    async fn request(&self) -> PermissionStatus {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.request_delay {
            tokio::time::sleep(delay).await;
        }
        *lock(&self.permission) = self.answer;
        debug!(answer = ?self.answer, "Synthetic permission prompt answered");
        self.answer
    }
}

impl LocationSource for SyntheticSensors {
    fn subscribe(&self, profile: SamplingProfile) -> AppResult<FixReceiver> {
        let (tx, rx) = mpsc::unbounded_channel();
        *lock(&self.fix_tx) = Some(tx);
        *lock(&self.last_profile) = Some(profile);
        Ok(rx)
    }
}

impl StepSource for SyntheticSensors {
    fn is_available(&self) -> bool {
        self.step_sensor
    }

    fn reporting(&self) -> StepReporting {
        self.step_reporting
    }

    fn reset_counter(&self) {
        self.counter_resets.fetch_add(1, Ordering::SeqCst);
    }

    fn subscribe(&self) -> AppResult<StepReceiver> {
        if !self.step_sensor {
            return Err(AppError::sensor_unavailable("step counter"));
        }
        let (tx, rx) = mpsc::unbounded_channel();
        *lock(&self.step_tx) = Some(tx);
        Ok(rx)
    }
}
