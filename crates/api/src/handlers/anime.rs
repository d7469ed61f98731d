//! Handlers for the `/animes` resource.
//!
//! Reads join in the owning studio's name as `studioName`; writes are
//! rejected with 400 when `studioId` does not name an existing studio.

use anidex_core::types::DbId;
use anidex_db::models::anime::{Anime, AnimeWithStudio, CreateAnime, UpdateAnime};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::extract::{self, Path};
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /animes
pub async fn create(
    State(state): State<AppState>,
    extract::Json(input): extract::Json<CreateAnime>,
) -> AppResult<(StatusCode, Json<Anime>)> {
    let anime = state.catalog.animes.create(&input).await?;
    Ok((StatusCode::CREATED, Json(anime)))
}

/// GET /animes
///
/// Every anime carries `studioName`, `"Unknown"` when the studio is gone.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<AnimeWithStudio>>> {
    let animes = state.catalog.animes.list_all().await?;
    Ok(Json(animes))
}

/// GET /animes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<AnimeWithStudio>> {
    let anime = state.catalog.animes.get_by_id(id).await?;
    Ok(Json(anime))
}

/// PUT /animes/{id}
///
/// Replaces title, genre and studio. Returns the stored record without
/// the joined studio name.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    extract::Json(input): extract::Json<UpdateAnime>,
) -> AppResult<Json<Anime>> {
    let anime = state.catalog.animes.update(id, &input).await?;
    Ok(Json(anime))
}

/// DELETE /animes/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.catalog.animes.delete_by_id(id).await?;
    Ok(Json(MessageResponse::new(format!("Anime {id} deleted"))))
}
