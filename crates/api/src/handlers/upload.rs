//! Handlers for image upload and deletion.
//!
//! Uploads arrive as multipart form data in a field named `image`. The
//! stored blob is addressed by generated name and served back under the
//! public uploads mount.

use axum::extract::{Multipart, Path, State};
use axum::http::header::HOST;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use charcut_core::assets::PUBLIC_MOUNT;

use crate::config::Environment;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Response for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// POST /api/upload -- store the multipart `image` field as a blob and
/// return its publicly reachable URL.
pub async fn upload_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut stored: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        stored = Some(state.assets.store(&data, &filename, &content_type)?);
        break;
    }

    let name = stored.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;
    let base = public_base_url(&state, &headers);

    Ok(Json(UploadResponse {
        image_url: format!("{base}{PUBLIC_MOUNT}/{name}"),
    }))
}

/// Response for a successful blob deletion.
#[derive(Debug, Serialize)]
pub struct DeleteImageResponse {
    pub message: String,
}

/// DELETE /api/upload/{filename} -- remove a stored blob by name.
pub async fn delete_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Json<DeleteImageResponse>> {
    state.assets.remove(&filename)?;

    Ok(Json(DeleteImageResponse {
        message: "Image deleted successfully".to_string(),
    }))
}

/// Base URL for public asset links: the configured override when set,
/// otherwise derived from the request's Host header (`https` in
/// production, `http` in development).
fn public_base_url(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(base) = &state.config.public_base_url {
        return base.trim_end_matches('/').to_string();
    }

    let host = headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");

    let scheme = match state.config.environment {
        Environment::Production => "https",
        Environment::Development => "http",
    };

    format!("{scheme}://{host}")
}
