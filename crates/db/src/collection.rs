//! Whole-file JSON persistence for one entity kind.
//!
//! A [`JsonCollection`] owns the path of a single backing document holding
//! a top-level array of records. Every call goes back to disk; nothing is
//! cached between calls, so edits made by other processes are picked up on
//! the next load.

use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anidex_core::error::CoreError;
use anidex_core::hashing::sha256_hex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{DbError, DbResult};

/// Content version of a backing file: SHA-256 hex of the bytes on disk.
pub type Version = String;

/// An ordered collection of `T` records backed by one pretty-printed JSON file.
#[derive(Debug)]
pub struct JsonCollection<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record in file order.
    pub async fn load(&self) -> DbResult<Vec<T>> {
        let (records, _) = self.load_versioned().await?;
        Ok(records)
    }

    /// Load every record together with the version of the bytes they came from.
    pub async fn load_versioned(&self) -> DbResult<(Vec<T>, Version)> {
        let bytes = self.read_bytes().await?;
        let records: Vec<T> =
            serde_json::from_slice(&bytes).map_err(|source| DbError::CorruptData {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(
            path = %self.path.display(),
            count = records.len(),
            "Loaded collection"
        );
        Ok((records, sha256_hex(&bytes)))
    }

    /// Version of the file as it is on disk right now.
    pub async fn version(&self) -> DbResult<Version> {
        let bytes = self.read_bytes().await?;
        Ok(sha256_hex(&bytes))
    }

    /// Replace the file content with `records`, all-or-nothing.
    ///
    /// Returns the version of the newly written content.
    pub async fn save(&self, records: &[T]) -> DbResult<Version> {
        let bytes = serde_json::to_vec_pretty(records).map_err(|err| {
            CoreError::Internal(format!(
                "failed to serialize collection {}: {err}",
                self.path.display()
            ))
        })?;
        write_atomic(&self.path, &bytes).await?;
        tracing::debug!(
            path = %self.path.display(),
            count = records.len(),
            "Saved collection"
        );
        Ok(sha256_hex(&bytes))
    }

    /// Create the backing file as an empty array if it does not exist yet.
    ///
    /// Returns `true` when a file was created.
    pub async fn ensure_exists(&self) -> DbResult<bool> {
        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|source| DbError::StorageUnavailable {
                path: self.path.clone(),
                source,
            })?;
        if exists {
            return Ok(false);
        }
        write_atomic(&self.path, b"[]").await?;
        tracing::info!(path = %self.path.display(), "Created empty collection file");
        Ok(true)
    }

    async fn read_bytes(&self) -> DbResult<Vec<u8>> {
        fs::read(&self.path)
            .await
            .map_err(|source| DbError::StorageUnavailable {
                path: self.path.clone(),
                source,
            })
    }
}

/// Disambiguates scratch files of writers racing on the same destination.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Write `bytes` to `path` so readers only ever see the old or the new content.
///
/// The data goes to a uniquely named sibling `.tmp` file, is fsynced, then
/// renamed over the destination.
pub(crate) async fn write_atomic(path: &Path, bytes: &[u8]) -> DbResult<()> {
    let unavailable = |source: io::Error| DbError::StorageUnavailable {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(unavailable)?;
    }

    let temp_path = temp_path_for(path);
    let written = async {
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&temp_path, path).await
    }
    .await;

    if let Err(source) = written {
        // The destination is untouched; only the scratch file may remain.
        let _ = fs::remove_file(&temp_path).await;
        return Err(unavailable(source));
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{}.{n}.tmp", std::process::id()));
    PathBuf::from(name)
}
