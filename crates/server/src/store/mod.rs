//! Flat-file JSON persistence.
//!
//! # Data file
//!
//! The whole dataset is one JSON document:
//!
//! ```json
//! { "testimonials": [], "messages": [] }
//! ```
//!
//! It is read in full and rewritten in full on every operation. There is no
//! indexing and no partial write.
//!
//! # Concurrency
//!
//! Every read and every read-modify-write runs under one async mutex, so two
//! requests in this process can never interleave their updates. Writes go to a
//! sibling `*.tmp` file which is then renamed over the data file, so a crash
//! mid-write leaves the previous document intact. Other processes writing the
//! same file are not coordinated with.

pub mod messages;
pub mod testimonials;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::models::{Message, Testimonial};

pub use messages::MessageRepository;
pub use testimonials::TestimonialRepository;

/// Errors from the flat-file store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the data file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data file is not a valid document.
    #[error("data file is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// The in-memory document could not be encoded.
    #[error("failed to encode data file: {0}")]
    Encode(#[source] serde_json::Error),
}

/// The full contents of the data file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Top-level keys owned by other services, written back untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Handle to the JSON data file.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonStore {
    /// Open the store, creating the data file with an empty document if it
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file or its parent directory cannot be
    /// created, or `StoreError::Corrupt` if an existing file cannot be parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            lock: Mutex::new(()),
        };

        let exists = tokio::fs::try_exists(&store.path)
            .await
            .map_err(|source| store.io_error(source))?;

        if exists {
            // Fail fast on a corrupt file rather than on the first request.
            store.load().await?;
        } else {
            let parent = store.path.parent().filter(|p| !p.as_os_str().is_empty());
            if let Some(parent) = parent {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| store.io_error(source))?;
            }
            store.save(&Database::default()).await?;
            tracing::info!(path = %store.path.display(), "Created empty data file");
        }

        Ok(store)
    }

    /// Path of the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` against a snapshot of the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be read or parsed.
    pub async fn read<T>(&self, f: impl FnOnce(&Database) -> T) -> Result<T, StoreError> {
        let _guard = self.lock.lock().await;
        let db = self.load().await?;
        Ok(f(&db))
    }

    /// Load the document, let `f` mutate it, and persist the result.
    ///
    /// The document is written back only when `f` reports a change by
    /// returning `(value, true)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be read, parsed, or written.
    pub async fn update<T>(
        &self,
        f: impl FnOnce(&mut Database) -> (T, bool),
    ) -> Result<T, StoreError> {
        let _guard = self.lock.lock().await;
        let mut db = self.load().await?;
        let (value, changed) = f(&mut db);
        if changed {
            self.save(&db).await?;
        }
        Ok(value)
    }

    async fn load(&self) -> Result<Database, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Data file missing, using empty document"
                );
                return Ok(Database::default());
            }
            Err(source) => return Err(self.io_error(source)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Database::default());
        }

        serde_json::from_slice(&bytes).map_err(StoreError::Corrupt)
    }

    async fn save(&self, db: &Database) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(db).map_err(StoreError::Encode)?;
        let tmp = self.tmp_path();

        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|source| self.io_error(source))?;
        if let Err(source) = tokio::fs::rename(&tmp, &self.path).await {
            if let Err(e) = tokio::fs::remove_file(&tmp).await {
                tracing::warn!(
                    path = %tmp.display(),
                    error = %e,
                    "Failed to remove temporary data file"
                );
            }
            return Err(self.io_error(source));
        }

        tracing::debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            "Data file written"
        );
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
