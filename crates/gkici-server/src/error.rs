use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ga::GaError;

/// Application-level errors that map directly to HTTP responses.
///
/// The wire shape is the flat `{ "error": "<message>" }` envelope the admin
/// frontend consumes. Every variant implements [`IntoResponse`] so handlers
/// can use `Result<impl IntoResponse, AppError>` as their return type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    /// Reporting API failure, already mapped to its user-facing message.
    #[error(transparent)]
    Analytics(#[from] GaError),

    /// Managed-backend failure; the backend's own error text is surfaced
    /// verbatim, uncategorized.
    #[error("{0}")]
    Backend(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wrap a managed-backend error, keeping its message on the wire.
    pub fn backend(err: anyhow::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Analytics(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Backend(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e}");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response();
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
