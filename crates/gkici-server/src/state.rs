use std::sync::Arc;

use gkici_core::config::Config;
use gkici_supabase::SupabaseClient;

use crate::ga::GaClient;

/// Shared application state injected into every Axum handler via
/// [`axum::extract::State`].
///
/// Both clients are cheap to clone; the reporting client shares its token
/// cache across clones.
pub struct AppState {
    pub config: Arc<Config>,
    pub supabase: SupabaseClient,
    pub ga: GaClient,
}

impl AppState {
    pub fn new(config: Config, supabase: SupabaseClient, ga: GaClient) -> Self {
        Self {
            config: Arc::new(config),
            supabase,
            ga,
        }
    }
}
