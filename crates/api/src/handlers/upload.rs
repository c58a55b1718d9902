//! Handler for `POST /upload`.
//!
//! Accepts a multipart form with a required `file` field. The file is written
//! under the configured upload directory and served back from `/uploads`.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use wikimasters_core::types::Timestamp;
use wikimasters_core::upload::{
    public_url, stored_filename, validate_file_size, validate_file_type,
};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::state::AppState;

/// Metadata returned for a stored upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub url: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
    pub uploaded_at: Timestamp,
}

/// POST /api/upload
///
/// Requires editor or admin. The type is checked before the body is read.
pub async fn upload_file(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<UploadedFile>)> {
    let mut multipart = multipart?;
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue; // ignore unknown fields
        }

        let name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        validate_file_type(&content_type)?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file = Some((name, content_type, data.to_vec()));
        break;
    }

    let (name, content_type, data) =
        file.ok_or_else(|| AppError::BadRequest("No file provided".into()))?;
    let size = data.len() as u64;
    validate_file_size(size)?;

    let uploaded_at = Utc::now();
    let stored_name = stored_filename(&name, uploaded_at.timestamp_millis());

    let dir = &state.config.upload_dir;
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;
    tokio::fs::write(dir.join(&stored_name), &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to write upload: {e}")))?;

    tracing::info!(
        user_id = user.id,
        file = %stored_name,
        size,
        content_type = %content_type,
        "File uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadedFile {
            url: public_url(&stored_name),
            name,
            size,
            content_type,
            uploaded_at,
        }),
    ))
}
