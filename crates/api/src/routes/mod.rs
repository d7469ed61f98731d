pub mod anime;
pub mod character;
pub mod director;
pub mod health;
pub mod studio;

use axum::Router;

use crate::state::AppState;

/// Build the entity route tree.
///
/// ```text
/// /animes[/{id}]        anime CRUD, reads include studioName
/// /studios[/{id}]       studio CRUD
/// /directors[/{id}]     director CRUD
/// /characters[/{id}]    character CRUD, reads include animeTitle
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/animes", anime::router())
        .nest("/studios", studio::router())
        .nest("/directors", director::router())
        .nest("/characters", character::router())
}
