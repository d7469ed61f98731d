use std::sync::Arc;

use anidex_core::types::DbId;
use serde_json::Map;

use super::not_found;
use crate::error::DbResult;
use crate::models::studio::{CreateStudio, Studio, UpdateStudio};
use crate::store::CollectionStore;

#[derive(Clone)]
pub struct StudioService {
    studios: Arc<CollectionStore<Studio>>,
}

impl StudioService {
    pub fn new(studios: Arc<CollectionStore<Studio>>) -> Self {
        Self { studios }
    }

    pub async fn create(&self, input: &CreateStudio) -> DbResult<Studio> {
        self.studios
            .insert(|id| Studio {
                id,
                name: input.name.clone(),
                location: input.location.clone(),
                extra: Map::new(),
            })
            .await
    }

    pub async fn list_all(&self) -> DbResult<Vec<Studio>> {
        self.studios.list().await
    }

    pub async fn get_by_id(&self, id: DbId) -> DbResult<Studio> {
        self.studios
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found::<Studio>(id))
    }

    pub async fn update(&self, id: DbId, input: &UpdateStudio) -> DbResult<Studio> {
        self.studios
            .replace(id, |existing| Studio {
                name: input.name.clone(),
                location: input.location.clone(),
                ..existing.clone()
            })
            .await
    }

    /// Removing a studio does not touch the animes that reference it; their
    /// reads fall back to the sentinel studio name.
    pub async fn delete_by_id(&self, id: DbId) -> DbResult<()> {
        self.studios.remove(id).await
    }
}
