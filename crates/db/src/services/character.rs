use std::sync::Arc;

use anidex_core::types::DbId;
use serde_json::Map;

use super::{display_name, load_parents, not_found};
use crate::error::DbResult;
use crate::integrity::ForeignKey;
use crate::models::anime::Anime;
use crate::models::character::{Character, CharacterWithAnime, CreateCharacter, UpdateCharacter};
use crate::store::CollectionStore;

/// Character use cases. Every write checks `animeId` against the anime store.
#[derive(Clone)]
pub struct CharacterService {
    characters: Arc<CollectionStore<Character>>,
    animes: Arc<CollectionStore<Anime>>,
}

impl CharacterService {
    pub fn new(
        characters: Arc<CollectionStore<Character>>,
        animes: Arc<CollectionStore<Anime>>,
    ) -> Self {
        Self { characters, animes }
    }

    fn anime_ref(&self) -> ForeignKey<'_, Anime> {
        ForeignKey::new("animeId", &self.animes)
    }

    pub async fn create(&self, input: &CreateCharacter) -> DbResult<Character> {
        let anime_id = self.anime_ref().check(input.anime_id).await?;
        self.characters
            .insert(|id| Character {
                id,
                name: input.name.clone(),
                anime_id,
                extra: Map::new(),
            })
            .await
    }

    pub async fn list_all(&self) -> DbResult<Vec<CharacterWithAnime>> {
        let characters = self.characters.list().await?;
        let animes = load_parents(&self.animes).await;
        Ok(characters
            .into_iter()
            .map(|character| with_anime(character, &animes))
            .collect())
    }

    pub async fn get_by_id(&self, id: DbId) -> DbResult<CharacterWithAnime> {
        let character = self
            .characters
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found::<Character>(id))?;
        let animes = load_parents(&self.animes).await;
        Ok(with_anime(character, &animes))
    }

    pub async fn update(&self, id: DbId, input: &UpdateCharacter) -> DbResult<Character> {
        let anime_id = self.anime_ref().check(input.anime_id).await?;
        self.characters
            .replace(id, |existing| Character {
                name: input.name.clone(),
                anime_id,
                ..existing.clone()
            })
            .await
    }

    pub async fn delete_by_id(&self, id: DbId) -> DbResult<()> {
        self.characters.remove(id).await
    }
}

fn with_anime(character: Character, animes: &[Anime]) -> CharacterWithAnime {
    let anime_title = display_name(animes, character.anime_id, |anime| anime.title.as_str());
    CharacterWithAnime::new(character, anime_title)
}
