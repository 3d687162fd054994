// ABOUTME: In-memory key/value backend with switchable read and write failures
// ABOUTME: Used by tests and embedded hosts that persist elsewhere
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

use super::KeyValueStore;
use crate::errors::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Process-local store. Failure switches make every subsequent read or
/// write fail until turned off again.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

fn injected(operation: &str) -> io::Error {
    io::Error::other(format!("injected {operation} failure"))
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make reads fail (or succeed again)
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make writes and deletes fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw value under `key`, bypassing failure injection
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn read_key(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Read {
                key: key.to_owned(),
                source: injected("read"),
            });
        }
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write_key(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Write {
                key: key.to_owned(),
                source: injected("write"),
            });
        }
        self.entries
            .write()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn delete_key(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Delete {
                key: key.to_owned(),
                source: injected("delete"),
            });
        }
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_write_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.read_key("k").await.unwrap(), None);

        store.write_key("k", "v1").await.unwrap();
        store.write_key("k", "v2").await.unwrap();
        assert_eq!(store.read_key("k").await.unwrap().as_deref(), Some("v2"));

        store.delete_key("k").await.unwrap();
        store.delete_key("k").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = MemoryStore::new();
        store.write_key("k", "v").await.unwrap();

        store.set_fail_reads(true);
        assert!(matches!(
            store.read_key("k").await,
            Err(StorageError::Read { .. })
        ));

        store.set_fail_writes(true);
        assert!(store.write_key("k", "other").await.is_err());
        assert!(store.delete_key("k").await.is_err());
        assert_eq!(store.raw("k").await.as_deref(), Some("v"));
    }
}
