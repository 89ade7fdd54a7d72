//! Object storage naming for uploaded product images.
//!
//! Uploads land in a single bucket, one folder per catalog, under a
//! millisecond-timestamp prefix so repeated uploads of the same file name
//! never collide.

use crate::error::CoreError;

/// Bucket holding every product image.
pub const PRODUCT_IMAGES_BUCKET: &str = "product_images";

/// Folder for software product images.
pub const FOLDER_SOFTWARE: &str = "software";

/// Folder for electronics product images.
pub const FOLDER_ELECTRONICS: &str = "electronics";

const VALID_FOLDERS: &[&str] = &[FOLDER_SOFTWARE, FOLDER_ELECTRONICS];

/// Accepted image file extensions (lowercase).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "svg"];

/// Default upload size ceiling (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Validate that `folder` is one of the known catalog folders.
pub fn validate_folder(folder: &str) -> Result<(), CoreError> {
    if VALID_FOLDERS.contains(&folder) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid asset folder '{folder}'. Must be one of: {VALID_FOLDERS:?}"
        )))
    }
}

/// Replace anything outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Lowercase extension of `name`, if it has one.
pub fn extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Validate that the file looks like a supported image.
pub fn validate_image_name(name: &str) -> Result<(), CoreError> {
    match extension(name) {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        Some(ext) => Err(CoreError::Validation(format!(
            "Unsupported image format '.{ext}'. Supported: {IMAGE_EXTENSIONS:?}"
        ))),
        None => Err(CoreError::Validation(
            "Image file name must have an extension".into(),
        )),
    }
}

/// Build the object path `{folder}/{millis}_{sanitized}` for an upload.
pub fn asset_object_path(
    folder: &str,
    file_name: &str,
    now_millis: i64,
) -> Result<String, CoreError> {
    validate_folder(folder)?;
    let sanitized = sanitize_file_name(file_name);
    if sanitized.trim_matches(['.', '_']).is_empty() {
        return Err(CoreError::Validation("File name must not be empty".into()));
    }
    Ok(format!("{folder}/{now_millis}_{sanitized}"))
}

/// Public URL for an object, given the server's externally visible base URL.
pub fn public_url(base_url: &str, bucket: &str, object_path: &str) -> String {
    format!(
        "{}/assets/{bucket}/{object_path}",
        base_url.trim_end_matches('/')
    )
}
