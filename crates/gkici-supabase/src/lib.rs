//! Client for the managed backend: table rows over its REST conventions,
//! object storage, and verification of the session tokens it issues.

pub mod artikel;
pub mod informasi;
pub mod rest;
pub mod session;
pub mod shalom;
pub mod storage;
pub mod warta;

use reqwest::Client;

/// HTTP client for the managed backend.
///
/// Authenticates with the service-role key; admin access control happens in
/// the server's own middleware, so row-level policies never see end-user
/// tokens.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
