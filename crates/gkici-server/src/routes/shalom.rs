use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use gkici_core::content::ShalomInput;
use gkici_supabase::shalom::ShalomPatch;

use crate::{error::AppError, state::AppState};

/// `GET /api/shalom` — devotional posts, ordered by effective date.
pub async fn list(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let rows = state.supabase.list_shalom().await.map_err(AppError::backend)?;
    Ok(Json(json!({ "data": rows })))
}

/// `POST /api/shalom`.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ShalomInput>,
) -> Result<impl IntoResponse, AppError> {
    input.validate().map_err(AppError::BadRequest)?;
    let created = state
        .supabase
        .insert_shalom(&input)
        .await
        .map_err(AppError::backend)?;
    Ok((StatusCode::CREATED, Json(json!({ "data": created }))))
}

/// `PUT /api/shalom/{id}`.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ShalomPatch>,
) -> Result<impl IntoResponse, AppError> {
    patch.validate().map_err(AppError::BadRequest)?;
    let updated = state
        .supabase
        .update_shalom(id, &patch)
        .await
        .map_err(AppError::backend)?
        .ok_or_else(|| AppError::NotFound("Shalom tidak ditemukan".to_string()))?;
    Ok(Json(json!({ "data": updated })))
}

/// `DELETE /api/shalom/{id}`.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state
        .supabase
        .delete_shalom(id)
        .await
        .map_err(AppError::backend)?;
    if !deleted {
        return Err(AppError::NotFound("Shalom tidak ditemukan".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
