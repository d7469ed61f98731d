use std::sync::Arc;

use anidex_core::types::DbId;
use serde_json::Map;

use super::not_found;
use crate::error::DbResult;
use crate::models::director::{CreateDirector, Director, UpdateDirector};
use crate::store::CollectionStore;

#[derive(Clone)]
pub struct DirectorService {
    directors: Arc<CollectionStore<Director>>,
}

impl DirectorService {
    pub fn new(directors: Arc<CollectionStore<Director>>) -> Self {
        Self { directors }
    }

    pub async fn create(&self, input: &CreateDirector) -> DbResult<Director> {
        self.directors
            .insert(|id| Director {
                id,
                name: input.name.clone(),
                extra: Map::new(),
            })
            .await
    }

    pub async fn list_all(&self) -> DbResult<Vec<Director>> {
        self.directors.list().await
    }

    pub async fn get_by_id(&self, id: DbId) -> DbResult<Director> {
        self.directors
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found::<Director>(id))
    }

    pub async fn update(&self, id: DbId, input: &UpdateDirector) -> DbResult<Director> {
        self.directors
            .replace(id, |existing| Director {
                name: input.name.clone(),
                ..existing.clone()
            })
            .await
    }

    pub async fn delete_by_id(&self, id: DbId) -> DbResult<()> {
        self.directors.remove(id).await
    }
}
