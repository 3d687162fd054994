// ABOUTME: File-backed key/value store writing one JSON document per key
// ABOUTME: Whole-record replacement through a temporary file and an atomic rename
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

use super::KeyValueStore;
use crate::constants::storage::RECORD_FILE_EXTENSION;
use crate::errors::StorageError;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

/// Stores each key as `<data_dir>/<key>.json`
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    // Serializes writers so two saves never share a temp file
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Store rooted at `root`; the directory is created on first write
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Directory holding the records
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`. Keys are flat names; anything that could escape
    /// the data directory is refused.
    fn path_for(&self, key: &str) -> io::Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid storage key '{key}'"),
            ));
        }
        Ok(self.root.join(format!("{key}.{RECORD_FILE_EXTENSION}")))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn read_key(&self, key: &str) -> Result<Option<String>, StorageError> {
        let read_error = |source| StorageError::Read {
            key: key.to_owned(),
            source,
        };
        let path = self.path_for(key).map_err(read_error)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(read_error(e)),
        }
    }

    async fn write_key(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_error = |source| StorageError::Write {
            key: key.to_owned(),
            source,
        };
        let path = self.path_for(key).map_err(write_error)?;
        let temp = path.with_extension(format!("{RECORD_FILE_EXTENSION}.tmp"));

        let _guard = self.write_lock.lock().await;
        fs::create_dir_all(&self.root).await.map_err(write_error)?;
        fs::write(&temp, value).await.map_err(write_error)?;
        if let Err(e) = fs::rename(&temp, &path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(write_error(e));
        }
        debug!(key, bytes = value.len(), "Record written");
        Ok(())
    }

    async fn delete_key(&self, key: &str) -> Result<(), StorageError> {
        let delete_error = |source| StorageError::Delete {
            key: key.to_owned(),
            source,
        };
        let path = self.path_for(key).map_err(delete_error)?;

        let _guard = self.write_lock.lock().await;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(delete_error(e)),
        }
    }
}
