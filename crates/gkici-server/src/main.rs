use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use gkici_server::ga::{GaClient, ServiceAccountKey};
use gkici_server::state::AppState;
use gkici_supabase::SupabaseClient;

/// `gkici-admin health` — liveness probe for Docker HEALTHCHECK.
///
/// Calls `GET http://localhost:$GKICI_PORT/health`.
/// Exits 0 if the server responds with HTTP 200, exits 1 otherwise.
fn run_health_check() -> ! {
    let port = std::env::var("GKICI_PORT").unwrap_or_else(|_| "5173".to_string());
    let url = format!("http://localhost:{}/health", port);
    match ureq::get(&url).call() {
        Ok(resp) if resp.status() == 200 => std::process::exit(0),
        _ => std::process::exit(1),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Health-check subcommand — handled before anything else so the binary
    // doubles as its own probe.
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(|s| s.as_str()) == Some("health") {
        run_health_check();
    }

    // Structured JSON logging. Level controlled via RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gkici_server=info".parse()?)
                .add_directive("gkici_supabase=info".parse()?),
        )
        .json()
        .init();

    let cfg = gkici_core::config::Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Reporting stays optional: a half-configured instance still serves the
    // content endpoints, and the analytics routes answer with a
    // configuration error until both settings exist.
    let ga_key = ServiceAccountKey::load(&cfg)?;
    if cfg.ga_property_id.is_none() || ga_key.is_none() {
        tracing::warn!(
            "Analytics reporting not fully configured. Set GA_PROPERTY_ID and \
             GOOGLE_APPLICATION_CREDENTIALS (or GOOGLE_CREDENTIALS_JSON) to enable \
             /api/analytics and /api/dashboard."
        );
    }

    let supabase = SupabaseClient::new(&cfg.supabase_url, &cfg.supabase_service_key);
    let ga = GaClient::new(cfg.ga_property_id.clone(), ga_key);
    let state = Arc::new(AppState::new(cfg.clone(), supabase, ga));

    let addr = format!("0.0.0.0:{}", cfg.port);
    let app = gkici_server::app::build_app(Arc::clone(&state));

    info!(port = cfg.port, "gkici-admin listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
