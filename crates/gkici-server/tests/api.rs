//! Router-level tests: everything here must settle before any network call
//! leaves the process (validation, auth, configuration errors).

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use tower::ServiceExt;

use gkici_core::config::Config;
use gkici_server::app::build_app;
use gkici_server::ga::GaClient;
use gkici_server::state::AppState;
use gkici_supabase::SupabaseClient;

const JWT_SECRET: &str = "integration-test-secret";

fn test_state(property: Option<&str>) -> Arc<AppState> {
    let config = Config {
        port: 0,
        cors_origins: Vec::new(),
        ga_property_id: property.map(str::to_string),
        ga_credentials_path: None,
        ga_credentials_json: None,
        supabase_url: "http://localhost:1".to_string(),
        supabase_service_key: "service-key".to_string(),
        supabase_jwt_secret: JWT_SECRET.to_string(),
    };
    let supabase = SupabaseClient::new(&config.supabase_url, &config.supabase_service_key);
    let ga = GaClient::new(config.ga_property_id.clone(), None);
    Arc::new(AppState::new(config, supabase, ga))
}

fn session_token() -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = json!({
        "sub": "admin-1",
        "email": "admin@gkici.or.id",
        "role": "authenticated",
        "aud": "authenticated",
        "exp": now + 3600,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("token")
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json")
}

fn multipart_body(boundary: &str, parts: &[(&str, Option<(&str, &str)>, &str)]) -> String {
    let mut body = String::new();
    for (name, file, content) in parts {
        body.push_str(&format!("--{boundary}\r\n"));
        match file {
            Some((filename, content_type)) => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: {content_type}\r\n\r\n"
                ));
            }
            None => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                ));
            }
        }
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{boundary}--\r\n"));
    body
}

#[tokio::test]
async fn health_answers_ok() {
    let app = build_app(test_state(Some("123456")));
    let resp = app
        .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn invalid_report_type_is_rejected_with_fixed_message() {
    let app = build_app(test_state(Some("123456")));
    let resp = app
        .oneshot(
            Request::get("/api/analytics?type=yearly")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(
        json["error"],
        "Invalid 'type' parameter. Expected 'daily', 'weekly', 'monthly', 'timeseries', or 'last30minutes'."
    );
}

#[tokio::test]
async fn missing_report_type_gets_the_same_rejection() {
    let app = build_app(test_state(Some("123456")));
    let resp = app
        .oneshot(
            Request::get("/api/analytics")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_property_is_a_per_request_configuration_error() {
    let app = build_app(test_state(None));
    let resp = app
        .oneshot(
            Request::get("/api/analytics?type=daily")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "GA_PROPERTY_ID is not configured.");
}

#[tokio::test]
async fn missing_credentials_map_to_the_remediation_message() {
    let app = build_app(test_state(Some("123456")));
    let resp = app
        .oneshot(
            Request::get("/api/analytics?type=weekly")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(resp).await;
    let message = json["error"].as_str().expect("message");
    assert!(message.starts_with("Authentication or permission error with Google Analytics."));
}

#[tokio::test]
async fn dashboard_failure_carries_the_remediation_hint() {
    let app = build_app(test_state(None));
    let resp = app
        .oneshot(
            Request::get("/api/dashboard")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "GA_PROPERTY_ID is not configured.");
    assert!(json["hint"].as_str().expect("hint").contains("GA_PROPERTY_ID"));
}

#[tokio::test]
async fn content_routes_require_a_session() {
    let app = build_app(test_state(Some("123456")));
    let resp = app
        .oneshot(
            Request::get("/api/artikel")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "Unauthorized");
}

#[tokio::test]
async fn garbage_session_token_is_rejected() {
    let app = build_app(test_state(Some("123456")));
    let resp = app
        .oneshot(
            Request::get("/api/shalom")
                .header(header::AUTHORIZATION, "Bearer not-a-token")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn artikel_create_validates_before_touching_the_backend() {
    let app = build_app(test_state(Some("123456")));
    let boundary = "gkici-test-boundary";
    let body = multipart_body(
        boundary,
        &[("judul", None, ""), ("penulis", None, "Pdt. A")],
    );
    let resp = app
        .oneshot(
            Request::post("/api/artikel")
                .header(header::AUTHORIZATION, format!("Bearer {}", session_token()))
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert!(json["error"].as_str().expect("message").contains("judul"));
}

#[tokio::test]
async fn warta_upload_rejects_non_pdf_files() {
    let app = build_app(test_state(Some("123456")));
    let boundary = "gkici-test-boundary";
    let body = multipart_body(
        boundary,
        &[("file", Some(("warta.txt", "text/plain")), "not a pdf")],
    );
    let resp = app
        .oneshot(
            Request::post("/api/warta")
                .header(header::AUTHORIZATION, format!("Bearer {}", session_token()))
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "Hanya file PDF yang diizinkan.");
}

#[tokio::test]
async fn warta_upload_without_file_is_rejected() {
    let app = build_app(test_state(Some("123456")));
    let boundary = "gkici-test-boundary";
    let body = multipart_body(boundary, &[("note", None, "no file attached")]);
    let resp = app
        .oneshot(
            Request::post("/api/warta")
                .header(header::AUTHORIZATION, format!("Bearer {}", session_token()))
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "Silakan pilih file PDF terlebih dahulu.");
}

#[tokio::test]
async fn informasi_list_requires_known_kategori() {
    let app = build_app(test_state(Some("123456")));
    let resp = app
        .oneshot(
            Request::get("/api/informasi?kategori=pengumuman")
                .header(header::AUTHORIZATION, format!("Bearer {}", session_token()))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "kategori must be 'kegiatan' or 'berita'");
}
