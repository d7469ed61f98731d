//! Handlers for the `/characters` resource.
//!
//! Characters belong to an anime through `animeId`; reads add `animeTitle`.

use anidex_core::types::DbId;
use anidex_db::models::character::{
    Character, CharacterWithAnime, CreateCharacter, UpdateCharacter,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::extract::{self, Path};
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /characters
pub async fn create(
    State(state): State<AppState>,
    extract::Json(input): extract::Json<CreateCharacter>,
) -> AppResult<(StatusCode, Json<Character>)> {
    let character = state.catalog.characters.create(&input).await?;
    Ok((StatusCode::CREATED, Json(character)))
}

/// GET /characters
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CharacterWithAnime>>> {
    let characters = state.catalog.characters.list_all().await?;
    Ok(Json(characters))
}

/// GET /characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CharacterWithAnime>> {
    let character = state.catalog.characters.get_by_id(id).await?;
    Ok(Json(character))
}

/// PUT /characters/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    extract::Json(input): extract::Json<UpdateCharacter>,
) -> AppResult<Json<Character>> {
    let character = state.catalog.characters.update(id, &input).await?;
    Ok(Json(character))
}

/// DELETE /characters/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.catalog.characters.delete_by_id(id).await?;
    Ok(Json(MessageResponse::new(format!("Character {id} deleted"))))
}
