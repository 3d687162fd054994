// ABOUTME: Persistence constants for settings and run history records
// ABOUTME: Storage keys and the run history retention cap
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

/// Key holding the serialized `UserSettings`
pub const SETTINGS_KEY: &str = "user_settings";

/// Key holding the serialized run history list
pub const HISTORY_KEY: &str = "run_history";

/// Maximum number of runs kept in history
pub const MAX_STORED_RUNS: usize = 100;

/// Directory name under the platform data dir
pub const DATA_DIR_NAME: &str = "stride";

/// Extension of files written by the file backend
pub const RECORD_FILE_EXTENSION: &str = "json";
