//! Character entity model and DTOs.

use anidex_core::types::DbId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Record;

/// A character record from `characters.json`. `anime_id` references [`Anime`](super::anime::Anime).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: DbId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub anime_id: DbId,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for Character {
    const ENTITY: &'static str = "Character";

    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharacter {
    pub name: String,
    #[serde(default, deserialize_with = "super::reference_id")]
    pub anime_id: Option<DbId>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCharacter {
    pub name: String,
    #[serde(default, deserialize_with = "super::reference_id")]
    pub anime_id: Option<DbId>,
}

/// Read view of a character with its anime's title joined in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterWithAnime {
    #[serde(flatten)]
    pub character: Character,
    pub anime_title: String,
}

impl CharacterWithAnime {
    /// The joined title replaces any stored `animeTitle` key.
    pub fn new(mut character: Character, anime_title: String) -> Self {
        character.extra.shift_remove("animeTitle");
        Self {
            character,
            anime_title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joined_anime_title_overrides_stored_key() {
        let mut extra = Map::new();
        extra.insert("animeTitle".into(), json!("Stale"));
        let character = Character {
            id: 1,
            name: "Spike Spiegel".into(),
            anime_id: 1,
            extra,
        };

        let view = CharacterWithAnime::new(character, "Cowboy Bebop".into());
        let json = serde_json::to_string(&view).unwrap();

        assert_eq!(json.matches("\"animeTitle\"").count(), 1);
        assert!(json.contains("\"animeTitle\":\"Cowboy Bebop\""));
    }
}
