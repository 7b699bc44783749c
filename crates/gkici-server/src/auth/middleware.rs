use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use gkici_supabase::session::verify_session_token;

use crate::{error::AppError, state::AppState};

/// Require a provider-issued session token on the request.
///
/// Sessions are owned entirely by the backend's auth service; this
/// middleware only verifies the bearer token it minted and injects the
/// claims into request extensions. No session state lives in this process,
/// so there is nothing to subscribe to or tear down.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "));

    let Some(token) = token else {
        return Err(AppError::Unauthorized);
    };

    let claims = verify_session_token(token, &state.config.supabase_jwt_secret)
        .map_err(|_| AppError::Unauthorized)?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
