#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cors_origins: Vec<String>,
    /// GA4 property to report on. Missing property is a per-request error so
    /// the content endpoints stay usable on an instance without analytics.
    pub ga_property_id: Option<String>,
    /// Path to a service-account key file.
    pub ga_credentials_path: Option<String>,
    /// Inline service-account key JSON. Takes precedence over the path.
    pub ga_credentials_json: Option<String>,
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub supabase_jwt_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            port: std::env::var("GKICI_PORT")
                .unwrap_or_else(|_| "5173".to_string())
                .parse()
                .map_err(|e| format!("invalid port: {e}"))?,
            cors_origins: std::env::var("GKICI_CORS_ORIGINS")
                .map(|v| v.split(',').map(str::to_string).collect())
                .unwrap_or_default(),
            ga_property_id: std::env::var("GA_PROPERTY_ID").ok(),
            ga_credentials_path: std::env::var("GOOGLE_APPLICATION_CREDENTIALS").ok(),
            ga_credentials_json: std::env::var("GOOGLE_CREDENTIALS_JSON").ok(),
            supabase_url: std::env::var("SUPABASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .map_err(|_| "SUPABASE_URL is required".to_string())?,
            supabase_service_key: std::env::var("SUPABASE_SERVICE_ROLE_KEY")
                .map_err(|_| "SUPABASE_SERVICE_ROLE_KEY is required".to_string())?,
            supabase_jwt_secret: std::env::var("SUPABASE_JWT_SECRET")
                .map_err(|_| "SUPABASE_JWT_SECRET is required".to_string())?,
        })
    }
}
