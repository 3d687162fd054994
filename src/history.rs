// ABOUTME: Persistent run history capped at a fixed number of newest runs
// ABOUTME: Newest-first ordering, delete and clear, with best-effort failure handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

//! # Run History
//!
//! [`RunHistoryStore`] is the single owner of the persisted run list. It
//! keeps an in-memory mirror guarded by an async mutex that is held across
//! the write, so concurrent saves and deletes are applied one at a time.
//!
//! Storage failures never surface as `Err`. Every operation returns a
//! [`StoreOutcome`] whose value reflects the attempted change; a recorded
//! error means the change may not have reached the backend.
//!
//! A malformed record is treated as absent and the next write replaces it.
//! A failed read is not: until the list has been read, saves and deletes
//! leave the backend untouched and report the read error.

use crate::constants::storage::{HISTORY_KEY, MAX_STORED_RUNS};
use crate::errors::{AppError, ErrorCode, StorageError, StoreOutcome};
use crate::logging::RunLogger;
use crate::models::RunSession;
use crate::storage::{read_json, write_json, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Totals across every stored run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HistorySummary {
    /// Number of stored runs
    pub total_runs: usize,
    /// Sum of run distances
    pub total_distance_meters: f64,
    /// Sum of run durations
    pub total_duration_seconds: u64,
    /// Sum of step counts
    pub total_steps: u64,
}

#[derive(Default)]
struct HistoryState {
    runs: Vec<RunSession>,
    loaded: bool,
}

/// Ordered, capped collection of completed runs
pub struct RunHistoryStore {
    backend: Arc<dyn KeyValueStore>,
    cap: usize,
    state: Mutex<HistoryState>,
}

/// Newest first by start time. Stable, so equal start times keep storage order.
fn sort_newest_first(runs: &mut [RunSession]) {
    runs.sort_by(|a, b| b.started_at_unix_ms.cmp(&a.started_at_unix_ms));
}

/// Turn a backend write result into an outcome carrying `value` either way.
///
/// `discarded` is the decode failure for a corrupt record the write replaced.
fn finish_write<T>(
    operation: &str,
    result: Result<(), StorageError>,
    value: T,
    discarded: Option<AppError>,
) -> StoreOutcome<T> {
    match (result, discarded) {
        (Ok(()), None) => StoreOutcome::confirmed(value),
        (Ok(()), Some(error)) => StoreOutcome::unconfirmed(value, error),
        (Err(error), _) => {
            let error = AppError::from(error);
            RunLogger::log_storage_failure(operation, HISTORY_KEY, &error);
            StoreOutcome::unconfirmed(value, error)
        }
    }
}

fn is_read_failure(error: Option<&AppError>) -> bool {
    error.is_some_and(|error| error.code == ErrorCode::StorageReadError)
}

impl RunHistoryStore {
    /// Store keeping at most `cap` runs (at least one)
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>, cap: usize) -> Self {
        Self {
            backend,
            cap: cap.max(1),
            state: Mutex::new(HistoryState::default()),
        }
    }

    /// Store keeping the default 100 runs
    #[must_use]
    pub fn with_default_cap(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::new(backend, MAX_STORED_RUNS)
    }

    /// Retention cap
    #[must_use]
    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Read the persisted list, re-sorted by start time.
    ///
    /// A failed read or corrupt record yields an empty list. After a failed
    /// read the in-memory list is left as it was.
    pub async fn load_all(&self) -> StoreOutcome<Vec<RunSession>> {
        let mut state = self.state.lock().await;
        let outcome = self.read_from_backend().await;
        if !is_read_failure(outcome.error.as_ref()) {
            state.runs.clone_from(&outcome.value);
            state.loaded = true;
        }
        outcome
    }

    /// Prepend a run, drop anything beyond the cap, persist, and return the new list.
    ///
    /// When the stored list cannot be read the run is not written and the
    /// outcome carries the read error.
    pub async fn save_run(&self, session: RunSession) -> StoreOutcome<Vec<RunSession>> {
        let mut state = self.state.lock().await;
        let discarded = match self.ensure_loaded(&mut state).await {
            Ok(discarded) => discarded,
            Err(error) => {
                warn!(run.id = %session.id, "History unreadable, run not saved");
                return StoreOutcome::unconfirmed(vec![session], error);
            }
        };

        debug!(run.id = %session.id, "Saving run");
        state.runs.insert(0, session);
        state.runs.truncate(self.cap);

        let result = write_json(self.backend.as_ref(), HISTORY_KEY, &state.runs).await;
        finish_write("save", result, state.runs.clone(), discarded)
    }

    /// Remove the run with `id`; an unknown id changes nothing
    pub async fn delete_run(&self, id: &str) -> StoreOutcome<Vec<RunSession>> {
        let mut state = self.state.lock().await;
        let discarded = match self.ensure_loaded(&mut state).await {
            Ok(discarded) => discarded,
            Err(error) => {
                warn!(run.id = %id, "History unreadable, run not deleted");
                return StoreOutcome::unconfirmed(Vec::new(), error);
            }
        };

        let before = state.runs.len();
        state.runs.retain(|run| run.id != id);
        if state.runs.len() == before {
            debug!(run.id = %id, "Delete of unknown run ignored");
            return finish_write("delete", Ok(()), state.runs.clone(), discarded);
        }

        let result = write_json(self.backend.as_ref(), HISTORY_KEY, &state.runs).await;
        finish_write("delete", result, state.runs.clone(), discarded)
    }

    /// Remove every run
    pub async fn clear_all(&self) -> StoreOutcome<()> {
        let mut state = self.state.lock().await;
        state.runs.clear();
        state.loaded = true;

        let result = self.backend.delete_key(HISTORY_KEY).await;
        finish_write("clear", result, (), None)
    }

    /// Run with `id`, if stored
    pub async fn get(&self, id: &str) -> Option<RunSession> {
        let mut state = self.state.lock().await;
        let _ = self.ensure_loaded(&mut state).await;
        state.runs.iter().find(|run| run.id == id).cloned()
    }

    /// Number of stored runs
    pub async fn len(&self) -> usize {
        let mut state = self.state.lock().await;
        let _ = self.ensure_loaded(&mut state).await;
        state.runs.len()
    }

    /// True when no runs are stored
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Totals across stored runs; counters saturate instead of wrapping
    pub async fn summary(&self) -> HistorySummary {
        let mut state = self.state.lock().await;
        let _ = self.ensure_loaded(&mut state).await;
        state
            .runs
            .iter()
            .fold(HistorySummary::default(), |mut acc, run| {
                acc.total_runs += 1;
                acc.total_distance_meters += run.distance_meters;
                acc.total_duration_seconds =
                    acc.total_duration_seconds.saturating_add(run.duration_seconds);
                acc.total_steps = acc.total_steps.saturating_add(run.step_count);
                acc
            })
    }

    /// Read the list on first use.
    ///
    /// Returns the decode error of a discarded corrupt record. A failed read
    /// is returned as `Err` and leaves the list unloaded, so lookups see an
    /// empty history and writes are refused.
    async fn ensure_loaded(
        &self,
        state: &mut HistoryState,
    ) -> Result<Option<AppError>, AppError> {
        if state.loaded {
            return Ok(None);
        }
        let outcome = self.read_from_backend().await;
        match outcome.error {
            Some(error) if is_read_failure(Some(&error)) => Err(error),
            discarded => {
                state.runs = outcome.value;
                state.loaded = true;
                Ok(discarded)
            }
        }
    }

    async fn read_from_backend(&self) -> StoreOutcome<Vec<RunSession>> {
        match read_json::<Vec<RunSession>>(self.backend.as_ref(), HISTORY_KEY).await {
            Ok(Some(mut runs)) => {
                sort_newest_first(&mut runs);
                runs.truncate(self.cap);
                StoreOutcome::confirmed(runs)
            }
            Ok(None) => StoreOutcome::confirmed(Vec::new()),
            Err(error) => {
                let error = AppError::from(error);
                RunLogger::log_storage_failure("load", HISTORY_KEY, &error);
                StoreOutcome::unconfirmed(Vec::new(), error)
            }
        }
    }
}

impl std::fmt::Debug for RunHistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunHistoryStore")
            .field("cap", &self.cap)
            .finish_non_exhaustive()
    }
}
