//! Manual foreign-key enforcement between collections.

use anidex_core::error::CoreError;
use anidex_core::types::DbId;

use crate::error::DbResult;
use crate::models::Record;
use crate::store::CollectionStore;

/// A foreign-key field whose values must name a record in `target`.
pub struct ForeignKey<'a, P> {
    field: &'static str,
    target: &'a CollectionStore<P>,
}

impl<'a, P: Record> ForeignKey<'a, P> {
    pub fn new(field: &'static str, target: &'a CollectionStore<P>) -> Self {
        Self { field, target }
    }

    /// Whether `value` is the primary key of an existing target record.
    pub async fn resolves(&self, value: DbId) -> DbResult<bool> {
        Ok(self.target.find_by_id(value).await?.is_some())
    }

    /// Resolve a candidate value, rejecting missing or dangling references.
    ///
    /// Callers must run this before mutating their own collection.
    pub async fn check(&self, value: Option<DbId>) -> DbResult<DbId> {
        if let Some(id) = value {
            if self.resolves(id).await? {
                return Ok(id);
            }
        }
        tracing::debug!(
            field = self.field,
            target = P::ENTITY,
            value = ?value,
            "Rejected dangling reference"
        );
        Err(CoreError::InvalidReference {
            field: self.field,
            entity: P::ENTITY,
            value,
        }
        .into())
    }
}
