use crate::types::DbId;

/// Domain-level failures raised by the entity services.
///
/// Storage failures live in the storage crate; this type only carries
/// conditions that are the client's concern.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A foreign key on a write does not name an existing record.
    /// `value` is `None` when the field was not supplied at all.
    #[error("Invalid reference: {field} does not name an existing {entity}")]
    InvalidReference {
        field: &'static str,
        entity: &'static str,
        value: Option<DbId>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
