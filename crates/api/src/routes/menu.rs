//! Route definitions for the menu catalog.
//!
//! All routes are mounted under `/menu`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::menu;
use crate::state::AppState;

/// Menu catalog routes mounted at `/menu`.
///
/// ```text
/// GET    /       -> list_menu
/// POST   /       -> create_menu_item
/// DELETE /{id}   -> delete_menu_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::list_menu).post(menu::create_menu_item))
        .route("/{id}", delete(menu::delete_menu_item))
}
