use axum::routing::get;
use axum::Router;

use crate::handlers::anime;
use crate::state::AppState;

/// Routes mounted at `/animes`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(anime::list).post(anime::create))
        .route(
            "/{id}",
            get(anime::get_by_id).put(anime::update).delete(anime::delete),
        )
}
