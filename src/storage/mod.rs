// ABOUTME: Key/value persistence seam used by the history and settings stores
// ABOUTME: Async trait with in-memory and JSON-file backends plus typed JSON helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

//! # Persistence Backends
//!
//! Records are whole strings under a key: a read returns the full value or
//! nothing, a write replaces it entirely. Typed access goes through
//! [`read_json`] and [`write_json`].

/// JSON file per key
pub mod file;
/// Process-local map with failure injection
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::errors::StorageError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// String storage addressed by key
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, or `None` when absent
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Read` when the backend cannot be read
    async fn read_key(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` when the value was not persisted
    async fn write_key(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Delete` when the backend refused the removal
    async fn delete_key(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON record
///
/// # Errors
///
/// Returns `StorageError::Read` on I/O failure and `StorageError::Malformed`
/// when the stored text is not a valid record
pub async fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.read_key(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Malformed {
            key: key.to_owned(),
            source,
        })
}

/// Encode and write a JSON record
///
/// # Errors
///
/// Returns `StorageError::Write` when encoding or the write fails
pub async fn write_json<T: Serialize + Sync>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Write {
        key: key.to_owned(),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })?;
    store.write_key(key, &raw).await
}
