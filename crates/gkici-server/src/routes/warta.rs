use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use gkici_core::content::jakarta_today;

use crate::{error::AppError, routes::media, state::AppState};

/// `GET /api/warta` — download page entries: the standing liturgy document
/// first, then bulletins newest first by their stored date.
pub async fn list(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let entries = state.supabase.list_warta().await.map_err(AppError::backend)?;
    Ok(Json(json!({ "data": entries })))
}

/// `POST /api/warta` — multipart PDF upload.
///
/// The object name is derived from today's congregation-calendar date, so a
/// second upload on the same day overwrites the first (one bulletin per
/// Sunday).
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = media::read_form(multipart).await?;
    let Some(file) = form.file.take() else {
        return Err(AppError::BadRequest(
            "Silakan pilih file PDF terlebih dahulu.".to_string(),
        ));
    };
    if file.content_type != "application/pdf" {
        return Err(AppError::BadRequest(
            "Hanya file PDF yang diizinkan.".to_string(),
        ));
    }

    let published_on = jakarta_today(Utc::now());
    let stored = state
        .supabase
        .upload_warta(file.bytes, published_on)
        .await
        .map_err(AppError::backend)?;
    Ok((StatusCode::CREATED, Json(json!({ "data": stored }))))
}

/// `DELETE /api/warta/{id}`.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state
        .supabase
        .delete_warta(id)
        .await
        .map_err(AppError::backend)?;
    if !deleted {
        return Err(AppError::NotFound("Warta tidak ditemukan".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
