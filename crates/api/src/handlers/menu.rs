//! Handlers for the categorized menu catalog.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use charcut_core::assets;
use charcut_core::catalog::Catalog;
use charcut_core::types::{Listing, ListingId, NewListing};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/menu -- the full catalog, category -> listings.
pub async fn list_menu(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.catalog().all().clone())
}

/// POST /api/menu -- validate and create a listing.
pub async fn create_menu_item(
    State(state): State<AppState>,
    Json(input): Json<NewListing>,
) -> AppResult<(StatusCode, Json<Listing>)> {
    let listing = state.catalog().insert(input)?;
    Ok((StatusCode::CREATED, Json(listing)))
}

/// Response for a successful listing deletion.
#[derive(Debug, Serialize)]
pub struct DeleteMenuItemResponse {
    pub message: String,
    pub item: Listing,
}

/// DELETE /api/menu/{id} -- remove a listing and, best-effort, the
/// image blob it references.
///
/// Blob cleanup failure never fails the request: catalog consistency
/// takes priority over asset-store consistency, and a missing blob is
/// already the state the cleanup was after.
pub async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<ListingId>,
) -> AppResult<Json<DeleteMenuItemResponse>> {
    let removed = state.catalog().delete(id)?;

    if let Some(name) = assets::blob_name(&removed.image) {
        if let Err(e) = state.assets.remove(name) {
            tracing::warn!(blob = name, error = %e, "Could not delete image for removed menu item");
        }
    }

    Ok(Json(DeleteMenuItemResponse {
        message: "Menu item deleted successfully".to_string(),
        item: removed,
    }))
}
