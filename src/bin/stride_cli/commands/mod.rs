// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors
// ABOUTME: Command modules for stride-cli and the shared store context
// ABOUTME: Replay, history, and settings subcommands

pub mod history;
pub mod replay;
pub mod settings;

use std::sync::Arc;
use stride::config::StrideConfig;
use stride::history::RunHistoryStore;
use stride::settings::SettingsStore;

/// Stores and configuration shared by every command
pub struct CliContext {
    pub config: StrideConfig,
    pub settings: Arc<SettingsStore>,
    pub history: Arc<RunHistoryStore>,
}
