// ABOUTME: Persistence backend error types for key/value storage
// ABOUTME: Converts backend failures into the unified AppError taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Errors raised by key/value persistence backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading a key failed
    #[error("failed to read key '{key}'")]
    Read {
        /// Storage key
        key: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
    /// Writing a key failed
    #[error("failed to write key '{key}'")]
    Write {
        /// Storage key
        key: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
    /// Deleting a key failed
    #[error("failed to delete key '{key}'")]
    Delete {
        /// Storage key
        key: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
    /// Stored value could not be decoded
    #[error("stored value for key '{key}' is malformed")]
    Malformed {
        /// Storage key
        key: String,
        /// Decoder failure
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Key the failure relates to
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Read { key, .. }
            | Self::Write { key, .. }
            | Self::Delete { key, .. }
            | Self::Malformed { key, .. } => key,
        }
    }

    /// Error code this failure maps to
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::StorageReadError,
            Self::Write { .. } | Self::Delete { .. } => ErrorCode::StorageWriteError,
            Self::Malformed { .. } => ErrorCode::MalformedStoredData,
        }
    }
}

impl From<StorageError> for AppError {
    fn from(error: StorageError) -> Self {
        Self::new(error.code(), error.to_string()).with_source(error)
    }
}
