pub mod health;
pub mod menu;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /health              liveness probe
///
/// /menu                GET full catalog, POST create listing
/// /menu/{id}           DELETE listing (cascades to its image blob)
///
/// /upload              POST multipart image upload (field "image")
/// /upload/{filename}   DELETE stored image blob
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/menu", menu::router())
        .nest("/upload", upload::router())
}
