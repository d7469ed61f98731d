//! Anime entity model and DTOs.

use anidex_core::types::DbId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Record;

/// An anime record from `animes.json`. `studio_id` references [`Studio`](super::studio::Studio).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anime {
    pub id: DbId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub studio_id: DbId,
    /// Keys written by other tools, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for Anime {
    const ENTITY: &'static str = "Anime";

    fn id(&self) -> DbId {
        self.id
    }
}

/// DTO for creating a new anime.
///
/// `studio_id` is optional at the wire level so that a missing reference is
/// reported as an invalid reference rather than a malformed body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnime {
    pub title: String,
    pub genre: String,
    #[serde(default, deserialize_with = "super::reference_id")]
    pub studio_id: Option<DbId>,
}

/// DTO for updating an anime. Every mutable field must be resupplied.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnime {
    pub title: String,
    pub genre: String,
    #[serde(default, deserialize_with = "super::reference_id")]
    pub studio_id: Option<DbId>,
}

/// Read view of an anime with its studio's name joined in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeWithStudio {
    #[serde(flatten)]
    pub anime: Anime,
    pub studio_name: String,
}

impl AnimeWithStudio {
    /// The joined name replaces any stored `studioName` key.
    pub fn new(mut anime: Anime, studio_name: String) -> Self {
        anime.extra.shift_remove("studioName");
        Self { anime, studio_name }
    }
}
