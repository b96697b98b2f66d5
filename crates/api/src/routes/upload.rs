//! Route definitions for image uploads.
//!
//! All routes are mounted under `/upload`. The blobs themselves are
//! served back under the root-level `/uploads` mount.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Upload routes mounted at `/upload`.
///
/// ```text
/// POST   /            -> upload_image (multipart field "image")
/// DELETE /{filename}  -> delete_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(upload::upload_image))
        .route("/{filename}", delete(upload::delete_image))
}
