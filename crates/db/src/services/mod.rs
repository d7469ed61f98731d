//! Entity services: the create/read/update/delete use cases per entity kind.
//!
//! Each service validates foreign keys before touching its own collection
//! and joins parent display fields into read views.

pub mod anime;
pub mod character;
pub mod director;
pub mod studio;

pub use anime::AnimeService;
pub use character::CharacterService;
pub use director::DirectorService;
pub use studio::StudioService;

use anidex_core::error::CoreError;
use anidex_core::types::{DbId, UNKNOWN_REFERENCE};

use crate::error::DbError;
use crate::models::Record;
use crate::store::CollectionStore;

fn not_found<T: Record>(id: DbId) -> DbError {
    CoreError::NotFound {
        entity: T::ENTITY,
        id,
    }
    .into()
}

/// Load a parent collection for enrichment. A read failure degrades to an
/// empty parent list so every child renders with the sentinel name.
async fn load_parents<P: Record>(store: &CollectionStore<P>) -> Vec<P> {
    match store.list().await {
        Ok(parents) => parents,
        Err(err) => {
            tracing::warn!(
                entity = P::ENTITY,
                error = %err,
                "Parent collection unreadable, enriching with sentinel"
            );
            Vec::new()
        }
    }
}

/// Display label of the parent with `id`, or the sentinel when dangling.
fn display_name<P, F>(parents: &[P], id: DbId, label: F) -> String
where
    P: Record,
    F: Fn(&P) -> &str,
{
    parents
        .iter()
        .find(|parent| parent.id() == id)
        .map(|parent| label(parent).to_string())
        .unwrap_or_else(|| UNKNOWN_REFERENCE.to_string())
}
