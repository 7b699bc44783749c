use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use gkici_core::content::ArtikelInput;
use gkici_supabase::artikel::ArtikelPatch;

use crate::{error::AppError, routes::media, state::AppState};

const MEDIA_BUCKET: &str = "media-artikel";

/// `GET /api/artikel` — all articles, newest first.
pub async fn list(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let rows = state.supabase.list_artikel().await.map_err(AppError::backend)?;
    Ok(Json(json!({ "data": rows })))
}

/// `POST /api/artikel` — multipart form: text fields plus an optional media
/// file, which is stored first so its public URL lands on the row.
pub async fn create(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = media::read_form(multipart).await?;
    let input = ArtikelInput {
        judul: form.take_or_default("judul"),
        penulis: form.take_or_default("penulis"),
        ringkasan: form.take_or_default("ringkasan"),
        isi: form.take_or_default("isi"),
    };
    input.validate().map_err(AppError::BadRequest)?;

    let media_url = match form.file.take() {
        Some(file) => Some(media::store_media(&state, MEDIA_BUCKET, None, file).await?),
        None => None,
    };

    let created = state
        .supabase
        .insert_artikel(&input, media_url)
        .await
        .map_err(AppError::backend)?;
    Ok((StatusCode::CREATED, Json(json!({ "data": created }))))
}

/// `PUT /api/artikel/{id}` — multipart form; absent fields stay untouched,
/// a new file replaces the media URL.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = media::read_form(multipart).await?;
    let mut patch = ArtikelPatch {
        judul: form.take("judul"),
        penulis: form.take("penulis"),
        ringkasan: form.take("ringkasan"),
        isi: form.take("isi"),
        media_url: None,
    };
    patch.validate().map_err(AppError::BadRequest)?;

    if let Some(file) = form.file.take() {
        let url = media::store_media(&state, MEDIA_BUCKET, None, file).await?;
        patch.media_url = Some(Some(url));
    }

    let updated = state
        .supabase
        .update_artikel(id, &patch)
        .await
        .map_err(AppError::backend)?
        .ok_or_else(|| AppError::NotFound("Artikel tidak ditemukan".to_string()))?;
    Ok(Json(json!({ "data": updated })))
}

/// `DELETE /api/artikel/{id}`.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state
        .supabase
        .delete_artikel(id)
        .await
        .map_err(AppError::backend)?;
    if !deleted {
        return Err(AppError::NotFound("Artikel tidak ditemukan".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
