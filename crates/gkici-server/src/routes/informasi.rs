use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use gkici_core::content::{InformasiInput, InformasiKategori};
use gkici_supabase::informasi::InformasiPatch;

use crate::{error::AppError, routes::media, state::AppState};

const MEDIA_BUCKET: &str = "media-informasi";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub kategori: String,
}

fn parse_kategori(raw: &str) -> Result<InformasiKategori, AppError> {
    InformasiKategori::parse(raw).map_err(AppError::BadRequest)
}

fn parse_tanggal(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest("tanggal must be YYYY-MM-DD".to_string()))
}

/// `GET /api/informasi?kategori=` — one kategori's rows, newest first.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let kategori = parse_kategori(&query.kategori)?;
    let rows = state
        .supabase
        .list_informasi(kategori)
        .await
        .map_err(AppError::backend)?;
    Ok(Json(json!({ "data": rows })))
}

/// `POST /api/informasi` — multipart form. The kategori decides the target
/// table and which date field is required; media lands under the kategori's
/// own prefix in the bucket.
pub async fn create(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = media::read_form(multipart).await?;
    let kategori = parse_kategori(&form.take_or_default("kategori"))?;
    let input = InformasiInput {
        kategori,
        judul: form.take_or_default("judul"),
        deskripsi: form.take_or_default("deskripsi"),
        jadwal: form.take("jadwal"),
        tanggal: form.take("tanggal").map(|v| parse_tanggal(&v)).transpose()?,
    };
    input.validate().map_err(AppError::BadRequest)?;

    let media_url = match form.file.take() {
        Some(file) => {
            Some(media::store_media(&state, MEDIA_BUCKET, Some(kategori.table()), file).await?)
        }
        None => None,
    };

    let created = state
        .supabase
        .insert_informasi(&input, media_url)
        .await
        .map_err(AppError::backend)?;
    Ok((StatusCode::CREATED, Json(json!({ "data": created }))))
}

/// `PUT /api/informasi/{kategori}/{id}`.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path((kategori, id)): Path<(String, Uuid)>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let kategori = parse_kategori(&kategori)?;
    let mut form = media::read_form(multipart).await?;
    let mut patch = InformasiPatch {
        judul: form.take("judul"),
        deskripsi: form.take("deskripsi"),
        jadwal: form.take("jadwal"),
        tanggal: form.take("tanggal").map(|v| parse_tanggal(&v)).transpose()?,
        media_url: None,
    };
    patch.validate().map_err(AppError::BadRequest)?;

    if let Some(file) = form.file.take() {
        let url = media::store_media(&state, MEDIA_BUCKET, Some(kategori.table()), file).await?;
        patch.media_url = Some(Some(url));
    }

    let updated = state
        .supabase
        .update_informasi(kategori, id, &patch)
        .await
        .map_err(AppError::backend)?
        .ok_or_else(|| AppError::NotFound("Informasi tidak ditemukan".to_string()))?;
    Ok(Json(json!({ "data": updated })))
}

/// `DELETE /api/informasi/{kategori}/{id}`.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path((kategori, id)): Path<(String, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let kategori = parse_kategori(&kategori)?;
    let deleted = state
        .supabase
        .delete_informasi(kategori, id)
        .await
        .map_err(AppError::backend)?;
    if !deleted {
        return Err(AppError::NotFound("Informasi tidak ditemukan".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
