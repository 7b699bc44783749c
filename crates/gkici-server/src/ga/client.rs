//! HTTP client for the Data API: service-account token exchange plus the
//! `runReport` call.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use gkici_core::config::Config;

use super::types::{ApiErrorEnvelope, RunReportRequest, RunReportResponse};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DATA_API_BASE: &str = "https://analyticsdata.googleapis.com/v1beta";
const SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";

/// Reporting failures, each carrying its user-facing message. No retry: a
/// failure is surfaced to the caller immediately.
#[derive(Debug, Error)]
pub enum GaError {
    #[error("GA_PROPERTY_ID is not configured.")]
    MissingProperty,

    #[error("Authentication or permission error with Google Analytics. Check your service account permissions and GOOGLE_APPLICATION_CREDENTIALS.")]
    Auth,

    #[error("Google Analytics API Error: {0}")]
    Api(String),

    #[error("Server Error: {0}")]
    Transport(String),
}

/// The two fields of a service-account key file this client needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
}

impl ServiceAccountKey {
    /// Load credential material from config: inline JSON wins over a key
    /// file path; neither configured yields `None` (requests will fail with
    /// the auth message, the server itself still starts).
    pub fn load(config: &Config) -> anyhow::Result<Option<Self>> {
        if let Some(raw) = &config.ga_credentials_json {
            let key = serde_json::from_str(raw)
                .map_err(|e| anyhow::anyhow!("GOOGLE_CREDENTIALS_JSON is not a valid key: {e}"))?;
            return Ok(Some(key));
        }
        if let Some(path) = &config.ga_credentials_path {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("cannot read credentials file {path}: {e}"))?;
            let key = serde_json::from_str(&raw)
                .map_err(|e| anyhow::anyhow!("credentials file {path} is not a valid key: {e}"))?;
            return Ok(Some(key));
        }
        Ok(None)
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Client for the reporting API. Cheap to clone; the token cache is shared.
#[derive(Clone)]
pub struct GaClient {
    http: reqwest::Client,
    property_id: Option<String>,
    key: Option<Arc<ServiceAccountKey>>,
    token: Arc<Mutex<Option<CachedToken>>>,
}

impl GaClient {
    pub fn new(property_id: Option<String>, key: Option<ServiceAccountKey>) -> Self {
        Self {
            http: reqwest::Client::new(),
            property_id,
            key: key.map(Arc::new),
            token: Arc::new(Mutex::new(None)),
        }
    }

    /// Current access token, exchanging a fresh service-account assertion
    /// when the cached one is absent or within a minute of expiry.
    async fn access_token(&self) -> Result<String, GaError> {
        let key = self.key.as_deref().ok_or(GaError::Auth)?;

        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Utc::now() + Duration::seconds(60) {
                return Ok(token.access_token.clone());
            }
        }

        let now = Utc::now();
        let claims = AssertionClaims {
            iss: &key.client_email,
            scope: SCOPE,
            aud: TOKEN_URL,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        // A key that does not parse as RSA PEM is malformed credential
        // material, reported the same way as a rejected one.
        let encoding_key =
            EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|_| GaError::Auth)?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| GaError::Transport(e.to_string()))?;

        let resp = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| GaError::Transport(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GaError::Auth);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GaError::Api(format!("token exchange failed ({status}): {body}")));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| GaError::Transport(e.to_string()))?;
        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        });
        Ok(access_token)
    }

    /// Run one report against the configured property.
    pub async fn run_report(
        &self,
        request: &RunReportRequest,
    ) -> Result<RunReportResponse, GaError> {
        let property = self.property_id.as_deref().ok_or(GaError::MissingProperty)?;
        let token = self.access_token().await?;

        // Outbound request and raw response are logged for operational
        // troubleshooting only.
        tracing::debug!(
            property,
            request = %serde_json::to_string(request).unwrap_or_default(),
            "analytics API request"
        );

        let url = format!("{DATA_API_BASE}/properties/{property}:runReport");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(|e| GaError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| GaError::Transport(e.to_string()))?;
        tracing::debug!(%status, body = %body, "analytics API response");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GaError::Auth);
        }
        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .map(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or(body);
            return Err(GaError::Api(message));
        }

        serde_json::from_str(&body).map_err(|e| GaError::Transport(e.to_string()))
    }
}
