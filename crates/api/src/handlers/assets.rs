//! Handler for product image uploads.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use techhub_core::storage::{asset_object_path, validate_image_name, PRODUCT_IMAGES_BUCKET};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// A stored object and the URL it is served from.
#[derive(Debug, Serialize)]
pub struct UploadedAsset {
    pub bucket: &'static str,
    pub path: String,
    pub public_url: String,
}

/// POST /api/v1/admin/assets/{folder}
///
/// Accepts a multipart form with a required `file` field. The object is
/// stored as `{folder}/{unix_millis}_{sanitized_name}` inside the product
/// image bucket, so repeated uploads of the same name never overwrite.
pub async fn upload(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(folder): Path<String>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadedAsset>>)> {
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file_data = Some((filename, data.to_vec()));
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    let max = state.config.storage.max_upload_bytes;
    if data.len() > max {
        return Err(AppError::BadRequest(format!(
            "File exceeds the {max} byte upload limit"
        )));
    }
    validate_image_name(&filename)?;

    let path = asset_object_path(&folder, &filename, chrono::Utc::now().timestamp_millis())?;
    state
        .assets
        .put(PRODUCT_IMAGES_BUCKET, &path, &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store asset: {e}")))?;

    let public_url = state.assets.public_url(PRODUCT_IMAGES_BUCKET, &path);
    tracing::info!(
        path = %path,
        size = data.len(),
        user_id = admin.user_id,
        "Asset uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadedAsset {
                bucket: PRODUCT_IMAGES_BUCKET,
                path,
                public_url,
            },
        }),
    ))
}
