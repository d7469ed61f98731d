use std::sync::Arc;

use anidex_core::types::DbId;
use serde_json::Map;

use super::{display_name, load_parents, not_found};
use crate::error::DbResult;
use crate::integrity::ForeignKey;
use crate::models::anime::{Anime, AnimeWithStudio, CreateAnime, UpdateAnime};
use crate::models::studio::Studio;
use crate::store::CollectionStore;

/// Anime use cases. Every write checks `studioId` against the studio store.
#[derive(Clone)]
pub struct AnimeService {
    animes: Arc<CollectionStore<Anime>>,
    studios: Arc<CollectionStore<Studio>>,
}

impl AnimeService {
    pub fn new(animes: Arc<CollectionStore<Anime>>, studios: Arc<CollectionStore<Studio>>) -> Self {
        Self { animes, studios }
    }

    fn studio_ref(&self) -> ForeignKey<'_, Studio> {
        ForeignKey::new("studioId", &self.studios)
    }

    pub async fn create(&self, input: &CreateAnime) -> DbResult<Anime> {
        let studio_id = self.studio_ref().check(input.studio_id).await?;
        self.animes
            .insert(|id| Anime {
                id,
                title: input.title.clone(),
                genre: input.genre.clone(),
                studio_id,
                extra: Map::new(),
            })
            .await
    }

    pub async fn list_all(&self) -> DbResult<Vec<AnimeWithStudio>> {
        let animes = self.animes.list().await?;
        let studios = load_parents(&self.studios).await;
        Ok(animes
            .into_iter()
            .map(|anime| with_studio(anime, &studios))
            .collect())
    }

    pub async fn get_by_id(&self, id: DbId) -> DbResult<AnimeWithStudio> {
        let anime = self
            .animes
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found::<Anime>(id))?;
        let studios = load_parents(&self.studios).await;
        Ok(with_studio(anime, &studios))
    }

    /// The reference is checked before the id, so a bad `studioId` is
    /// reported even when `id` does not exist.
    pub async fn update(&self, id: DbId, input: &UpdateAnime) -> DbResult<Anime> {
        let studio_id = self.studio_ref().check(input.studio_id).await?;
        self.animes
            .replace(id, |existing| Anime {
                title: input.title.clone(),
                genre: input.genre.clone(),
                studio_id,
                ..existing.clone()
            })
            .await
    }

    pub async fn delete_by_id(&self, id: DbId) -> DbResult<()> {
        self.animes.remove(id).await
    }
}

fn with_studio(anime: Anime, studios: &[Studio]) -> AnimeWithStudio {
    let studio_name = display_name(studios, anime.studio_id, |studio| studio.name.as_str());
    AnimeWithStudio::new(anime, studio_name)
}
