//! Shared multipart handling for the content forms: text fields plus an
//! optional media file that is stored first, with the returned public URL
//! substituted into the record.

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::{error::AppError, state::AppState};

pub struct MediaFile {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

pub struct FormData {
    pub fields: HashMap<String, String>,
    pub file: Option<MediaFile>,
}

impl FormData {
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    pub fn take_or_default(&mut self, name: &str) -> String {
        self.take(name).unwrap_or_default()
    }
}

/// Drain a multipart request into named text fields and at most one file
/// part (the last file part wins; empty file inputs are ignored).
pub async fn read_form(mut multipart: Multipart) -> Result<FormData, AppError> {
    let mut fields = HashMap::new();
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if let Some(file_name) = field.file_name() {
            let file_name = file_name.to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?
                .to_vec();
            if !bytes.is_empty() {
                file = Some(MediaFile {
                    bytes,
                    file_name,
                    content_type,
                });
            }
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            fields.insert(name, text);
        }
    }

    Ok(FormData { fields, file })
}

/// Store a media file under a fresh timestamped name and return its public
/// URL.
pub async fn store_media(
    state: &AppState,
    bucket: &str,
    prefix: Option<&str>,
    file: MediaFile,
) -> Result<String, AppError> {
    let ext = std::path::Path::new(&file.file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin");
    let name = format!("{}.{ext}", chrono::Utc::now().timestamp_millis());
    let path = match prefix {
        Some(prefix) => format!("{prefix}/{name}"),
        None => name,
    };

    state
        .supabase
        .upload_object(bucket, &path, file.bytes, &file.content_type, false)
        .await
        .map_err(AppError::backend)?;
    state
        .supabase
        .public_url(bucket, &path)
        .map_err(AppError::backend)
}
