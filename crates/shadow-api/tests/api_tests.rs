//! API integration tests.
//!
//! The router is exercised end to end with an in-memory user store and a
//! stubbed asset gateway, so no network or Gemini credential is needed.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use shadow_analysis::{
    AnalysisOrchestrator, AssetGateway, GatewayError, InferenceClient, SportCatalog,
};
use shadow_api::auth::TokenIssuer;
use shadow_api::store::UserStore;
use shadow_api::{create_router, ApiConfig, AppState};
use shadow_models::{AssetState, AssetStatus, InferencePart, RemoteAsset, SportDefinition};

/// Gateway stub: assets are ACTIVE on the first poll unless a user-asset
/// failure is configured.
#[derive(Default)]
struct StubGateway {
    user_error: Option<String>,
}

#[async_trait]
impl AssetGateway for StubGateway {
    async fn upload(
        &self,
        _bytes: Vec<u8>,
        display_name: &str,
        mime_type: &str,
    ) -> Result<RemoteAsset, GatewayError> {
        Ok(RemoteAsset {
            handle: format!("files/{}", display_name),
            uri: format!("https://files.test/{}", display_name),
            mime_type: mime_type.to_string(),
            state: AssetState::Pending,
            error: None,
        })
    }

    async fn poll(&self, handle: &str) -> Result<AssetStatus, GatewayError> {
        if handle.contains("user") {
            if let Some(message) = &self.user_error {
                return Ok(AssetStatus {
                    state: AssetState::Failed,
                    error: Some(message.clone()),
                });
            }
        }
        Ok(AssetStatus {
            state: AssetState::Active,
            error: None,
        })
    }
}

struct StubInference;

#[async_trait]
impl InferenceClient for StubInference {
    async fn generate(&self, _parts: &[InferencePart]) -> Result<String, GatewayError> {
        Ok("stub analysis text".to_string())
    }
}

struct TestApp {
    router: Router,
    // Keep temp directories alive for the duration of the test.
    _reference_dir: tempfile::TempDir,
    _tmp_dir: tempfile::TempDir,
}

async fn test_app(gateway: StubGateway) -> TestApp {
    let reference_dir = tempfile::tempdir().unwrap();
    let tmp_dir = tempfile::tempdir().unwrap();

    let mut sports = Vec::new();
    for (id, video) in [("golf", "tigerSwing.mp4"), ("basketball", "stephShot.mp4")] {
        let path = reference_dir.path().join(video);
        std::fs::write(&path, b"reference bytes").unwrap();
        sports.push(SportDefinition {
            id: id.to_string(),
            analysis_prompt: format!("Compare the {} technique.", id),
            reference_video: path,
        });
    }
    let catalog = Arc::new(SportCatalog::from_definitions(sports));

    let orchestrator = Arc::new(AnalysisOrchestrator::new(
        Arc::clone(&catalog),
        Arc::new(gateway),
        Arc::new(StubInference),
        tmp_dir.path().to_path_buf(),
    ));

    let config = ApiConfig::default();
    let state = AppState {
        config: config.clone(),
        catalog,
        orchestrator,
        users: UserStore::in_memory().await.unwrap(),
        auth: Arc::new(TokenIssuer::new(
            &config.jwt_secret,
            config.access_token_ttl,
        )),
    };

    TestApp {
        router: create_router(state),
        _reference_dir: reference_dir,
        _tmp_dir: tmp_dir,
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Sign up a user and return their bearer token.
async fn signup_token(app: &TestApp, email: &str, username: &str) -> String {
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "/api/signup",
            serde_json::json!({ "email": email, "username": username, "password": "pw123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["access_token"].as_str().unwrap().to_string()
}

const BOUNDARY: &str = "shadowsync-test-boundary";

fn multipart_request(uri: &str, token: &str, field: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"user.mp4\"\r\nContent-Type: video/mp4\r\n\r\nfake video bytes\r\n--{b}--\r\n",
        b = BOUNDARY,
        field = field,
    );
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn health_and_root_respond() {
    let app = test_app(StubGateway::default()).await;

    let response = app
        .router
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("X-Content-Type-Options").unwrap(),
        "nosniff"
    );

    let response = app
        .router
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "ShadowSync API");
}

#[tokio::test]
async fn sports_list_is_public_and_ordered() {
    let app = test_app(StubGateway::default()).await;

    let response = app
        .router
        .clone()
        .oneshot(Request::get("/api/sports").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["sports"], serde_json::json!(["golf", "basketball"]));
}

#[tokio::test]
async fn signup_login_me_flow() {
    let app = test_app(StubGateway::default()).await;
    let token = signup_token(&app, "a@example.com", "alice").await;

    // /me with the signup token
    let response = app
        .router
        .clone()
        .oneshot(
            Request::get("/api/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email"], "a@example.com");
    assert_eq!(body["username"], "alice");

    // duplicate email is a 400
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "/api/signup",
            serde_json::json!({ "email": "a@example.com", "username": "alice2", "password": "x" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Email already registered");

    // login with the right password succeeds
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "/api/login",
            serde_json::json!({ "email": "a@example.com", "password": "pw123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // wrong password is a 401
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "/api/login",
            serde_json::json!({ "email": "a@example.com", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let app = test_app(StubGateway::default()).await;

    let response = app
        .router
        .clone()
        .oneshot(Request::get("/api/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn analyze_requires_auth() {
    let app = test_app(StubGateway::default()).await;

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(
            "/api/analyze-video/golf",
            "not-a-token",
            "user_video",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn analyze_unknown_sport_is_bad_request() {
    let app = test_app(StubGateway::default()).await;
    let token = signup_token(&app, "a@example.com", "alice").await;

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(
            "/api/analyze-video/curling",
            &token,
            "user_video",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Unsupported sport: curling");
}

#[tokio::test]
async fn analyze_missing_file_field_is_bad_request() {
    let app = test_app(StubGateway::default()).await;
    let token = signup_token(&app, "a@example.com", "alice").await;

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(
            "/api/analyze-video/golf",
            &token,
            "wrong_field",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("user_video"));
}

#[tokio::test]
async fn analyze_golf_happy_path() {
    let app = test_app(StubGateway::default()).await;
    let token = signup_token(&app, "a@example.com", "alice").await;

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(
            "/api/analyze-video/golf",
            &token,
            "user_video",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["sport"], "golf");
    assert_eq!(body["analysis"], "stub analysis text");
}

#[tokio::test]
async fn analyze_user_asset_failure_keeps_detail_and_guidance() {
    let app = test_app(StubGateway {
        user_error: Some("corrupt container".to_string()),
    })
    .await;
    let token = signup_token(&app, "a@example.com", "alice").await;

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(
            "/api/analyze-video/basketball",
            &token,
            "user_video",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("corrupt container"));
    assert!(detail.contains("Try converting your video to MP4"));
}
