// src/publishing/media.rs
//! Media helpers for uploads.

use std::path::Path;

/// MIME type for an upload, chosen by file extension.
pub fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// The name an upload is stored under: the caller's choice, else the file name.
pub(super) fn upload_name(path: &Path, filename: Option<&str>) -> String {
    filename
        .map(str::to_string)
        .or_else(|| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "upload".to_string())
}
