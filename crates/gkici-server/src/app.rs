use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{auth, routes, state::AppState};

/// Construct the Axum [`Router`] with all routes and middleware attached.
///
/// The analytics proxy and dashboard are open (the public site embeds the
/// charts); content management requires a provider session token. Middleware
/// order: `TraceLayer` for structured request logging, then CORS (the admin
/// frontend is served from a different origin).
pub fn build_app(state: Arc<AppState>) -> Router {
    let content = Router::new()
        .route(
            "/api/artikel",
            get(routes::artikel::list).post(routes::artikel::create),
        )
        .route(
            "/api/artikel/{id}",
            put(routes::artikel::update).delete(routes::artikel::remove),
        )
        .route(
            "/api/informasi",
            get(routes::informasi::list).post(routes::informasi::create),
        )
        .route(
            "/api/informasi/{kategori}/{id}",
            put(routes::informasi::update).delete(routes::informasi::remove),
        )
        .route(
            "/api/shalom",
            get(routes::shalom::list).post(routes::shalom::create),
        )
        .route(
            "/api/shalom/{id}",
            put(routes::shalom::update).delete(routes::shalom::remove),
        )
        .route(
            "/api/warta",
            get(routes::warta::list).post(routes::warta::upload),
        )
        .route("/api/warta/{id}", delete(routes::warta::remove))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::middleware::require_session,
        ));

    let cors = if state.config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/analytics", get(routes::analytics::report))
        .route("/api/dashboard", get(routes::dashboard::summary))
        .merge(content)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
