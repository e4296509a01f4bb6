// SPDX-License-Identifier: MIT

//! Single-document JSON store.
//!
//! The whole application state lives in one JSON document with top-level
//! arrays for each collection. Every mutation rewrites the full document.
//! Writers serialize on one async lock, so overlapping mutations cannot
//! clobber each other; a failed mutation or save leaves both the in-memory
//! document and the file untouched.

use crate::error::AppError;
use crate::models::{Issue, Ride, SosEvent, User};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::Mutex;

/// The persisted document. Each key defaults independently so documents
/// written by earlier versions (or an empty file) load cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub rides: Vec<Ride>,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub sos_events: Vec<SosEvent>,
}

/// Handle to the JSON document store.
pub struct Store {
    path: PathBuf,
    document: Mutex<Document>,
}

impl Store {
    /// Open the store at `path`, loading the document if the file exists.
    ///
    /// An absent or empty file yields the empty default document.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        let document = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Document::default(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::Storage(format!("Failed to parse {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Document::default(),
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        tracing::info!(
            path = %path.display(),
            users = document.users.len(),
            "Data store opened"
        );

        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    /// Run a closure against the current document.
    pub async fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&Document) -> T,
    {
        let document = self.document.lock().await;
        f(&document)
    }

    /// Run a mutating closure, then persist the whole document.
    ///
    /// The mutation runs against a staged copy; only after the closure
    /// succeeds and the file is written does the staged copy become the
    /// current document. The lock is held across mutate and save.
    pub async fn write<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Document) -> Result<T, AppError>,
    {
        let mut document = self.document.lock().await;

        let mut staged = document.clone();
        let value = f(&mut staged)?;
        self.persist(&staged).await?;
        *document = staged;

        Ok(value)
    }

    async fn persist(&self, document: &Document) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| AppError::Storage(format!("Failed to serialize document: {}", e)))?;

        tokio::fs::write(&self.path, bytes).await.map_err(|e| {
            AppError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}
