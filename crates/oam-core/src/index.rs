//! Shared JSON-array files.
//!
//! The per-case index files (`advocates.json`, `members.json`,
//! `arguments.json`) and the case document itself are JSON arrays appended
//! to by concurrent tasks. Every append for a given path goes through that
//! file's mutex, so the read-modify-write cycle is never interleaved: no
//! append is lost and the array stays valid.

use crate::error::FetchError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// One append-only JSON array on disk, safe to share between concurrent
/// appenders via `Arc`.
#[derive(Debug)]
pub struct JsonArrayFile {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonArrayFile {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `record` to the array, creating the file as a one-element
    /// array if it does not exist. The per-file lock is held across the
    /// whole read-modify-write cycle.
    pub async fn append<T: Serialize>(&self, record: &T) -> Result<(), FetchError> {
        let _guard = self.write_lock.lock().await;

        let mut entries: Vec<serde_json::Value> = match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| FetchError::Serialize {
                    path: self.path.clone(),
                    source,
                })?
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(source) => {
                return Err(FetchError::Persistence {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let value = serde_json::to_value(record).map_err(|source| FetchError::Serialize {
            path: self.path.clone(),
            source,
        })?;
        entries.push(value);

        let body =
            serde_json::to_vec_pretty(&entries).map_err(|source| FetchError::Serialize {
                path: self.path.clone(),
                source,
            })?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|source| FetchError::Persistence {
                path: self.path.clone(),
                source,
            })
    }
}
