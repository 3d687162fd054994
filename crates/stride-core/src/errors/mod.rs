// ABOUTME: Unified error handling with standard error codes for the run tracker
// ABOUTME: Defines AppError, ErrorCode, and the non-throwing StoreOutcome wrapper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

//! # Unified Error Handling System
//!
//! Centralized error types shared by the tracking engine and the stores.
//!
//! Expected environmental failures (permission refusal, missing step sensor,
//! storage I/O, corrupt persisted data) never cross a public boundary as
//! `Err`: the engine surfaces them as snapshot flags and the stores return a
//! [`StoreOutcome`] carrying a best-effort value plus the error. Only contract
//! violations (bad configuration, invalid input) are returned as `Err`.

/// Persistence backend errors
pub mod storage;

pub use storage::StorageError;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Sensors (1000-1999)
    /// Location access refused by the operating system
    #[serde(rename = "PERMISSION_DENIED")]
    PermissionDenied = 1000,
    /// No step counter on this device
    #[serde(rename = "SENSOR_UNAVAILABLE")]
    SensorUnavailable = 1001,

    // Storage (2000-2999)
    /// Reading a persisted record failed
    #[serde(rename = "STORAGE_READ_ERROR")]
    StorageReadError = 2000,
    /// Writing or deleting a persisted record failed
    #[serde(rename = "STORAGE_WRITE_ERROR")]
    StorageWriteError = 2001,
    /// Persisted record could not be decoded
    #[serde(rename = "MALFORMED_STORED_DATA")]
    MalformedStoredData = 2002,

    // Validation (3000-3999)
    /// Caller supplied an invalid value
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Configuration is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 3001,

    // Internal (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "Location permission was denied",
            Self::SensorUnavailable => "Step counter is not available on this device",
            Self::StorageReadError => "Reading from persistent storage failed",
            Self::StorageWriteError => "Writing to persistent storage failed",
            Self::MalformedStoredData => "Stored data is corrupt and was discarded",
            Self::InvalidInput => "The provided input is invalid",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
        }
    }

    /// Whether this code describes an expected environmental condition
    /// rather than a defect
    #[must_use]
    pub const fn is_environmental(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied
                | Self::SensorUnavailable
                | Self::StorageReadError
                | Self::StorageWriteError
                | Self::MalformedStoredData
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::SensorUnavailable => "SENSOR_UNAVAILABLE",
            Self::StorageReadError => "STORAGE_READ_ERROR",
            Self::StorageWriteError => "STORAGE_WRITE_ERROR",
            Self::MalformedStoredData => "MALFORMED_STORED_DATA",
            Self::InvalidInput => "INVALID_INPUT",
            Self::ConfigInvalid => "CONFIG_INVALID",
            Self::InternalError => "INTERNAL_ERROR",
        };
        f.write_str(name)
    }
}

/// Unified error type for the application
#[derive(Debug, thiserror::Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Location permission refused
    #[must_use]
    pub fn permission_denied() -> Self {
        Self::new(ErrorCode::PermissionDenied, "location access refused")
    }

    /// Step counter missing
    #[must_use]
    pub fn sensor_unavailable(sensor: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::SensorUnavailable,
            format!("{} unavailable", sensor.into()),
        )
    }

    /// Storage read failure
    #[must_use]
    pub fn storage_read(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageReadError, message)
    }

    /// Storage write failure
    #[must_use]
    pub fn storage_write(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageWriteError, message)
    }

    /// Corrupt persisted data
    #[must_use]
    pub fn malformed_data(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedStoredData, message)
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::InternalError, "serialization failed").with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Best-effort result of a store operation.
///
/// `value` is always usable. `error` is set when a read fell back to
/// defaults or a write could not be confirmed.
#[derive(Debug)]
#[must_use]
pub struct StoreOutcome<T> {
    /// Best-effort value
    pub value: T,
    /// Non-fatal failure encountered while producing `value`
    pub error: Option<AppError>,
}

impl<T> StoreOutcome<T> {
    /// Outcome with no failure
    pub const fn confirmed(value: T) -> Self {
        Self { value, error: None }
    }

    /// Outcome that fell back or could not be persisted
    pub const fn unconfirmed(value: T, error: AppError) -> Self {
        Self {
            value,
            error: Some(error),
        }
    }

    /// True when no failure was recorded
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        self.error.is_none()
    }

    /// Discard the failure record and keep the value
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Transform the value, keeping the failure record
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StoreOutcome<U> {
        StoreOutcome {
            value: f(self.value),
            error: self.error,
        }
    }
}
