//! Typed CRUD primitives over a [`JsonCollection`].
//!
//! Every mutation is a full read-modify-write cycle: load the whole
//! collection, change one record in memory, save the whole collection.
//! Failed mutations never save.
//!
//! With [`WriteStrategy::Unguarded`] two cycles on the same collection can
//! interleave at their await points and the later save silently discards
//! the earlier one. [`WriteStrategy::Serialized`] and
//! [`WriteStrategy::Optimistic`] close that window within the process.

use std::io;
use std::path::PathBuf;

use anidex_core::error::CoreError;
use anidex_core::types::DbId;
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};

use crate::collection::{write_atomic, JsonCollection};
use crate::error::{DbError, DbResult};
use crate::models::Record;

/// How concurrent read-modify-write cycles on one collection are coordinated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteStrategy {
    /// No coordination; concurrent writers may lose updates.
    #[default]
    Unguarded,
    /// One cycle at a time per collection.
    Serialized,
    /// Compare the file version at commit time and redo the cycle on change.
    Optimistic { max_retries: u32 },
}

/// How primary keys are assigned on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// `count + 1`. Can hand out an id that is still in use after a delete.
    #[default]
    CountPlusOne,
    /// Monotonic counter persisted next to the collection in a `.seq` file.
    Sequence,
}

impl IdStrategy {
    /// Pick the id for a new record. `issued` is the last id recorded by the
    /// persisted counter, `0` if none.
    pub fn next<T: Record>(self, records: &[T], issued: DbId) -> Result<DbId, CoreError> {
        match self {
            IdStrategy::CountPlusOne => Ok(next_id(records)),
            IdStrategy::Sequence => {
                let highest = records.iter().map(Record::id).max().unwrap_or(0);
                highest
                    .max(issued)
                    .checked_add(1)
                    .ok_or_else(|| CoreError::Internal(format!("{} id space exhausted", T::ENTITY)))
            }
        }
    }
}

/// `count + 1`, the default id for a new record.
pub fn next_id<T>(records: &[T]) -> DbId {
    records.len() as DbId + 1
}

/// Position of the first record with the given id.
pub fn find_index_by_id<T: Record>(records: &[T], id: DbId) -> Option<usize> {
    records.iter().position(|record| record.id() == id)
}

/// Per-entity-kind store: one instance per backing file.
#[derive(Debug)]
pub struct CollectionStore<T> {
    collection: JsonCollection<T>,
    write_strategy: WriteStrategy,
    id_strategy: IdStrategy,
    write_lock: Mutex<()>,
}

impl<T: Record> CollectionStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            collection: JsonCollection::new(path),
            write_strategy: WriteStrategy::default(),
            id_strategy: IdStrategy::default(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_write_strategy(mut self, write_strategy: WriteStrategy) -> Self {
        self.write_strategy = write_strategy;
        self
    }

    pub fn with_id_strategy(mut self, id_strategy: IdStrategy) -> Self {
        self.id_strategy = id_strategy;
        self
    }

    pub fn collection(&self) -> &JsonCollection<T> {
        &self.collection
    }

    /// Sidecar file holding the last id issued under [`IdStrategy::Sequence`].
    pub fn sequence_path(&self) -> PathBuf {
        self.collection.path().with_extension("seq")
    }

    pub async fn list(&self) -> DbResult<Vec<T>> {
        self.collection.load().await
    }

    /// Linear scan for the first record with `id`. `None` when absent.
    pub async fn find_by_id(&self, id: DbId) -> DbResult<Option<T>> {
        let records = self.collection.load().await?;
        Ok(records.into_iter().find(|record| record.id() == id))
    }

    /// Append a record built from the freshly assigned id.
    ///
    /// `build` may run more than once under [`WriteStrategy::Optimistic`].
    pub async fn insert<F>(&self, build: F) -> DbResult<T>
    where
        F: Fn(DbId) -> T,
    {
        let _guard = self.exclusive().await;
        let id_strategy = self.id_strategy;

        let record = self
            .cycle(|records, issued| {
                let record = build(id_strategy.next(records, issued)?);
                records.push(record.clone());
                let sequence = (id_strategy == IdStrategy::Sequence).then(|| record.id());
                Ok((record, sequence))
            })
            .await?;

        tracing::info!(entity = T::ENTITY, id = record.id(), "Record inserted");
        Ok(record)
    }

    /// Replace the first record with `id` by `apply(existing)`.
    ///
    /// Fails with `NotFound` and leaves the file untouched if `id` is absent.
    pub async fn replace<F>(&self, id: DbId, apply: F) -> DbResult<T>
    where
        F: Fn(&T) -> T,
    {
        let _guard = self.exclusive().await;
        let record = self
            .cycle(|records, _| {
                let index = find_index_by_id(records, id).ok_or(CoreError::NotFound {
                    entity: T::ENTITY,
                    id,
                })?;
                let updated = apply(&records[index]);
                records[index] = updated.clone();
                Ok((updated, None))
            })
            .await?;
        tracing::info!(entity = T::ENTITY, id, "Record replaced");
        Ok(record)
    }

    /// Remove every record with `id`.
    ///
    /// Fails with `NotFound` and leaves the file untouched if `id` is absent.
    pub async fn remove(&self, id: DbId) -> DbResult<()> {
        let _guard = self.exclusive().await;
        self.cycle(|records, _| {
            let before = records.len();
            records.retain(|record| record.id() != id);
            if records.len() == before {
                return Err(CoreError::NotFound {
                    entity: T::ENTITY,
                    id,
                }
                .into());
            }
            Ok(((), None))
        })
        .await?;
        tracing::info!(entity = T::ENTITY, id, "Record removed");
        Ok(())
    }

    /// Hold the collection for a whole cycle when writes are serialized.
    async fn exclusive(&self) -> Option<MutexGuard<'_, ()>> {
        match self.write_strategy {
            WriteStrategy::Serialized => Some(self.write_lock.lock().await),
            WriteStrategy::Unguarded | WriteStrategy::Optimistic { .. } => None,
        }
    }

    /// One load-mutate-save cycle, retried on version change when optimistic.
    ///
    /// `mutate` gets the last id recorded by the sequence counter and hands
    /// back the id it issued, if any. That id is persisted in the same commit
    /// as the collection, so the counter cannot be rewound by a slower writer.
    async fn cycle<R, F>(&self, mut mutate: F) -> DbResult<R>
    where
        F: FnMut(&mut Vec<T>, DbId) -> DbResult<(R, Option<DbId>)>,
    {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let (mut records, version) = self.collection.load_versioned().await?;
            let issued = self.last_issued_id().await?;
            let (outcome, new_id) = mutate(&mut records, issued)?;

            let _commit = match self.write_strategy {
                WriteStrategy::Optimistic { max_retries } => {
                    let commit = self.write_lock.lock().await;
                    let unchanged = self.collection.version().await? == version
                        && self.last_issued_id().await? == issued;
                    if !unchanged {
                        if attempts > max_retries {
                            return Err(DbError::WriteConflict {
                                path: self.collection.path().to_path_buf(),
                                attempts,
                            });
                        }
                        tracing::warn!(
                            entity = T::ENTITY,
                            attempts,
                            "Collection changed during write, retrying"
                        );
                        continue;
                    }
                    Some(commit)
                }
                WriteStrategy::Unguarded | WriteStrategy::Serialized => None,
            };

            self.collection.save(&records).await?;
            if let Some(id) = new_id {
                self.record_issued_id(id).await?;
            }
            return Ok(outcome);
        }
    }

    async fn last_issued_id(&self) -> DbResult<DbId> {
        if self.id_strategy != IdStrategy::Sequence {
            return Ok(0);
        }
        let path = self.sequence_path();
        let read = fs::read(&path).await;
        match read {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| DbError::CorruptData { path, source })
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(source) => Err(DbError::StorageUnavailable { path, source }),
        }
    }

    /// The counter only moves forward.
    async fn record_issued_id(&self, id: DbId) -> DbResult<()> {
        let issued = self.last_issued_id().await?.max(id);
        write_atomic(&self.sequence_path(), issued.to_string().as_bytes()).await
    }
}
