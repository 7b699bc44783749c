//! Verification of the session access tokens the backend's auth service
//! issues to logged-in admins.

use anyhow::{anyhow, Result};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by a provider-issued session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: i64,
}

/// Decode and validate a session access token (HS256, audience
/// "authenticated", expiry enforced).
pub fn verify_session_token(token: &str, secret: &str) -> Result<SessionClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&["authenticated"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| anyhow!("verify_session_token: {e}"))?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "test-jwt-secret";

    fn issue(aud: &str, exp_offset: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = json!({
            "sub": "user-1",
            "email": "admin@gkici.or.id",
            "role": "authenticated",
            "aud": aud,
            "exp": now + exp_offset,
        });
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("encode")
    }

    #[test]
    fn accepts_valid_session_token() {
        let token = issue("authenticated", 3600);
        let claims = verify_session_token(&token, SECRET).expect("claims");
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email.as_deref(), Some("admin@gkici.or.id"));
    }

    #[test]
    fn rejects_wrong_audience() {
        let token = issue("anon", 3600);
        assert!(verify_session_token(&token, SECRET).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let token = issue("authenticated", -3600);
        assert!(verify_session_token(&token, SECRET).is_err());
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = issue("authenticated", 3600);
        assert!(verify_session_token(&token, "other-secret").is_err());
    }
}
