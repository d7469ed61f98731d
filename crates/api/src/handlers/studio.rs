//! Handlers for the `/studios` resource.

use anidex_core::types::DbId;
use anidex_db::models::studio::{CreateStudio, Studio, UpdateStudio};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::extract::{self, Path};
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /studios
pub async fn create(
    State(state): State<AppState>,
    extract::Json(input): extract::Json<CreateStudio>,
) -> AppResult<(StatusCode, Json<Studio>)> {
    let studio = state.catalog.studios.create(&input).await?;
    Ok((StatusCode::CREATED, Json(studio)))
}

/// GET /studios
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Studio>>> {
    let studios = state.catalog.studios.list_all().await?;
    Ok(Json(studios))
}

/// GET /studios/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Studio>> {
    let studio = state.catalog.studios.get_by_id(id).await?;
    Ok(Json(studio))
}

/// PUT /studios/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    extract::Json(input): extract::Json<UpdateStudio>,
) -> AppResult<Json<Studio>> {
    let studio = state.catalog.studios.update(id, &input).await?;
    Ok(Json(studio))
}

/// DELETE /studios/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.catalog.studios.delete_by_id(id).await?;
    Ok(Json(MessageResponse::new(format!("Studio {id} deleted"))))
}
