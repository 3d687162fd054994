// ABOUTME: Persistent user preferences with documented defaults
// ABOUTME: Whole-object replace on save; the cached copy changes only after a confirmed write
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

use crate::constants::storage::SETTINGS_KEY;
use crate::errors::{AppError, StoreOutcome};
use crate::logging::RunLogger;
use crate::models::UserSettings;
use crate::storage::{read_json, write_json, KeyValueStore};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Owner of the persisted [`UserSettings`]
pub struct SettingsStore {
    backend: Arc<dyn KeyValueStore>,
    current: RwLock<UserSettings>,
}

impl SettingsStore {
    /// Store starting from defaults until `load()` runs
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            current: RwLock::new(UserSettings::default()),
        }
    }

    /// Persisted settings, or defaults when nothing usable is stored
    pub async fn load(&self) -> StoreOutcome<UserSettings> {
        let mut current = self.current.write().await;
        let outcome = match read_json::<UserSettings>(self.backend.as_ref(), SETTINGS_KEY).await {
            Ok(Some(settings)) => StoreOutcome::confirmed(settings),
            Ok(None) => {
                debug!("No stored settings, using defaults");
                StoreOutcome::confirmed(UserSettings::default())
            }
            Err(error) => {
                let error = AppError::from(error);
                RunLogger::log_storage_failure("load", SETTINGS_KEY, &error);
                StoreOutcome::unconfirmed(UserSettings::default(), error)
            }
        };
        *current = outcome.value;
        outcome
    }

    /// Persist `settings` as a whole. On failure the previous settings stay
    /// in effect and are returned with the error.
    pub async fn save(&self, settings: UserSettings) -> StoreOutcome<UserSettings> {
        let mut current = self.current.write().await;
        match write_json(self.backend.as_ref(), SETTINGS_KEY, &settings).await {
            Ok(()) => {
                *current = settings;
                StoreOutcome::confirmed(settings)
            }
            Err(error) => {
                let error = AppError::from(error);
                RunLogger::log_storage_failure("save", SETTINGS_KEY, &error);
                StoreOutcome::unconfirmed(*current, error)
            }
        }
    }

    /// Settings in effect
    pub async fn current(&self) -> UserSettings {
        *self.current.read().await
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore").finish_non_exhaustive()
    }
}
