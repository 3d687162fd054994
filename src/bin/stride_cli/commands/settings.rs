// ABOUTME: Settings commands for stride-cli
// ABOUTME: Shows and replaces the stored user preferences
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

use anyhow::Result;
use stride::models::{DistanceUnit, GpsAccuracy, PaceUnit, SpeedUnit, Theme, UserSettings};
use tracing::info;

use super::CliContext;
use crate::helpers::display::display_settings;

/// Fields to change; `None` keeps the stored value
pub struct SettingsChanges {
    pub distance_unit: Option<DistanceUnit>,
    pub pace_unit: Option<PaceUnit>,
    pub speed_unit: Option<SpeedUnit>,
    pub theme: Option<Theme>,
    pub lock_rotation: Option<bool>,
    pub gps_accuracy: Option<GpsAccuracy>,
}

impl SettingsChanges {
    fn apply(&self, base: UserSettings) -> UserSettings {
        UserSettings {
            distance_unit: self.distance_unit.unwrap_or(base.distance_unit),
            pace_unit: self.pace_unit.unwrap_or(base.pace_unit),
            speed_unit: self.speed_unit.unwrap_or(base.speed_unit),
            theme: self.theme.unwrap_or(base.theme),
            lock_rotation: self.lock_rotation.unwrap_or(base.lock_rotation),
            gps_accuracy: self.gps_accuracy.unwrap_or(base.gps_accuracy),
        }
    }
}

/// Print the preferences in effect
pub async fn show(ctx: &CliContext) {
    display_settings(&ctx.settings.current().await);
}

/// Save a new settings object built from the stored one
pub async fn set(ctx: &CliContext, changes: SettingsChanges) -> Result<()> {
    let updated = changes.apply(ctx.settings.current().await);
    let outcome = ctx.settings.save(updated).await;
    if let Some(error) = outcome.error {
        return Err(error.into());
    }
    info!("Settings saved");
    display_settings(&outcome.value);
    Ok(())
}
