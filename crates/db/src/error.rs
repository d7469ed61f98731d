use std::io;
use std::path::PathBuf;

use anidex_core::error::CoreError;

/// Errors raised by the document store and the entity services.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A domain error (missing record, dangling reference).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The backing file could not be read or written.
    #[error("Storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing file is not a valid serialized collection.
    #[error("Corrupt data in {}: {source}", .path.display())]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An optimistic write kept losing the race against other writers.
    #[error("Write conflict on {} after {attempts} attempts", .path.display())]
    WriteConflict { path: PathBuf, attempts: u32 },
}

pub type DbResult<T> = Result<T, DbError>;
