use crate::config::{ACCEPTED_IMAGE_TYPES, MAX_UPLOAD_BYTES};

/// Why a worksheet photo was refused before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("'{0}' is not a supported image. Please upload a JPEG, PNG or WebP photo.")]
    UnsupportedType(String),

    #[error("This photo is {:.1} MB. Please upload an image under 10 MB.", megabytes(.size))]
    TooLarge { size: usize },

    #[error("The selected file is empty.")]
    Empty,
}

fn megabytes(size: &usize) -> f64 {
    *size as f64 / (1024.0 * 1024.0)
}

/// `image/png; charset=binary` and `IMAGE/PNG` both become `image/png`.
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// File-drop rules shared by the practice controller and the grading endpoint.
pub fn validate_image(content_type: &str, size: usize) -> Result<(), UploadRejection> {
    if !ACCEPTED_IMAGE_TYPES.contains(&essence(content_type).as_str()) {
        return Err(UploadRejection::UnsupportedType(content_type.to_string()));
    }
    if size == 0 {
        return Err(UploadRejection::Empty);
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge { size });
    }
    Ok(())
}

/// File extension used when storing an accepted image.
pub fn extension_for(content_type: &str) -> &'static str {
    match essence(content_type).as_str() {
        "image/png" => "png",
        "image/webp" => "webp",
        _ => "jpg",
    }
}

/// Guesses a MIME type from a file name, for files picked from disk.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}
