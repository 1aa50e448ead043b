//! Member photo store
//!
//! Photos live on the filesystem keyed by mobile number, one per member:
//! a later upload for the same mobile overwrites the previous file. Uploads
//! are validated as real images and re-encoded to JPEG before storage.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;

use crate::error::{AppError, AppResult};

/// Maximum accepted upload size (5MB)
pub const MAX_PHOTO_SIZE: usize = 5 * 1024 * 1024;

/// Accepted upload extensions
pub const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Stored JPEG quality
const JPEG_QUALITY: u8 = 85;

/// File name for a member's photo
pub fn photo_file_name(mobile: &str) -> String {
    format!("{mobile}.jpg")
}

/// Validate an uploaded photo (size, extension, decodable content)
pub fn validate_photo(data: &[u8], original_name: &str) -> AppResult<()> {
    if data.is_empty() {
        return Err(AppError::validation("Empty photo upload"));
    }
    if data.len() > MAX_PHOTO_SIZE {
        return Err(AppError::validation(format!(
            "Photo too large: {} bytes (max {MAX_PHOTO_SIZE})",
            data.len()
        )));
    }

    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported photo format '{ext}'. Supported: {}",
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image file: {e}")))?;
    Ok(())
}

/// Store a validated photo under `<upload_dir>/<mobile>.jpg`, returning the
/// stored file name. Overwrites any existing photo for the same mobile.
pub fn store_photo(upload_dir: &Path, mobile: &str, data: &[u8]) -> AppResult<String> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image file: {e}")))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb = img.to_rgb8();
        let encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb.write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to encode photo: {e}")))?;
    }

    let file_name = photo_file_name(mobile);
    std::fs::write(upload_dir.join(&file_name), &buffer)
        .map_err(|e| AppError::internal(format!("Failed to save photo: {e}")))?;

    Ok(file_name)
}

/// Best-effort load of a member's photo for card rendering.
///
/// Any read or decode failure yields `None`; the caller renders without it.
pub fn load_photo(upload_dir: &Path, file_name: &str) -> Option<image::DynamicImage> {
    let path: PathBuf = upload_dir.join(file_name);
    let data = std::fs::read(&path).ok()?;
    match image::load_from_memory(&data) {
        Ok(img) => Some(img),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Stored photo unreadable, rendering without it");
            None
        }
    }
}
