//! Handlers for the `/directors` resource.

use anidex_core::types::DbId;
use anidex_db::models::director::{CreateDirector, Director, UpdateDirector};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::extract::{self, Path};
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /directors
pub async fn create(
    State(state): State<AppState>,
    extract::Json(input): extract::Json<CreateDirector>,
) -> AppResult<(StatusCode, Json<Director>)> {
    let director = state.catalog.directors.create(&input).await?;
    Ok((StatusCode::CREATED, Json(director)))
}

/// GET /directors
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Director>>> {
    let directors = state.catalog.directors.list_all().await?;
    Ok(Json(directors))
}

/// GET /directors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Director>> {
    let director = state.catalog.directors.get_by_id(id).await?;
    Ok(Json(director))
}

/// PUT /directors/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    extract::Json(input): extract::Json<UpdateDirector>,
) -> AppResult<Json<Director>> {
    let director = state.catalog.directors.update(id, &input).await?;
    Ok(Json(director))
}

/// DELETE /directors/{id}
///
/// Nothing references directors, so deletes never leave dangling keys.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.catalog.directors.delete_by_id(id).await?;
    Ok(Json(MessageResponse::new(format!("Director {id} deleted"))))
}
