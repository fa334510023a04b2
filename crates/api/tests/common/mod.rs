//! Shared helpers for HTTP-level integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use ticketing_api::auth::jwt::{generate_access_token, JwtConfig};
use ticketing_api::config::{Environment, ServerConfig, StorageConfig};
use ticketing_api::router::build_app_router;
use ticketing_api::state::AppState;
use ticketing_api::storage::PassthroughStorage;
use ticketing_api::tickets::{ApprovalError, TicketApprover};
use ticketing_cache::{CacheStore, FixedWindowLimiter, MemoryStore};
use ticketing_core::rate_limit::{TEST_LIMIT_PER_WINDOW, WINDOW};

pub const JWT_SECRET: &str = "integration-test-secret-long-enough";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        environment: Environment::Test,
        database_url: String::new(),
        redis_url: None,
        rate_limit_per_minute: TEST_LIMIT_PER_WINDOW,
        trust_proxy: false,
        max_upload_bytes: 1024 * 1024,
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        storage: StorageConfig {
            bucket: "test".to_string(),
            public_url: "http://localhost:9000/test".to_string(),
            endpoint: None,
        },
        ticket_gateway_url: "http://localhost:0".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Ticket gateway double
// ---------------------------------------------------------------------------

/// What the stub gateway answers.
#[derive(Debug, Clone, Copy)]
pub enum GatewayOutcome {
    Approve,
    Reject,
    Fail,
}

/// Records approval calls and answers with a fixed outcome.
pub struct StubApprover {
    outcome: GatewayOutcome,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl StubApprover {
    pub fn new(outcome: GatewayOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TicketApprover for StubApprover {
    async fn approve(&self, uuid: &str, signature: &str) -> Result<(), ApprovalError> {
        self.calls
            .lock()
            .unwrap()
            .push((uuid.to_string(), signature.to_string()));
        match self.outcome {
            GatewayOutcome::Approve => Ok(()),
            GatewayOutcome::Reject => Err(ApprovalError::Rejected),
            GatewayOutcome::Fail => Err(ApprovalError::Upstream("connection refused".into())),
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Handles to the doubles behind a test app.
pub struct TestApp {
    pub router: Router,
    pub cache: Arc<MemoryStore>,
    pub approver: Arc<StubApprover>,
}

impl TestApp {
    /// A fresh clone of the router, ready for one `oneshot` request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and in-memory doubles.
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with(pool, test_config(), GatewayOutcome::Approve)
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig, outcome: GatewayOutcome) -> TestApp {
    let cache = Arc::new(MemoryStore::new());
    let approver = Arc::new(StubApprover::new(outcome));
    let store: Arc<dyn CacheStore> = cache.clone();

    let state = AppState {
        pool,
        limiter: FixedWindowLimiter::new(Arc::clone(&store), config.rate_limit_per_minute, WINDOW),
        config: Arc::new(config),
        cache: store,
        storage: Arc::new(PassthroughStorage),
        tickets: approver.clone(),
    };

    TestApp {
        router: build_app_router(state),
        cache,
        approver,
    }
}

/// Bearer token for `user_id` with `role`, signed with the test secret.
pub fn bearer(user_id: i64, role: &str) -> String {
    let token = generate_access_token(user_id, role, &test_config().jwt).unwrap();
    format!("Bearer {token}")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn assert_message(response: Response<Body>, status: StatusCode, message: &str) {
    assert_eq!(response.status(), status);
    assert_eq!(body_json(response).await["message"], message);
}

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

pub const BOUNDARY: &str = "----ticketing-test-boundary";

/// One part of a multipart form.
pub enum Part<'a> {
    Text { name: &'a str, value: &'a str },
    File { name: &'a str, file_name: &'a str, bytes: &'a [u8] },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                bytes,
            } => {
                let disposition = format!(r#"form-data; name="{name}"; filename="{file_name}""#);
                body.extend_from_slice(b"Content-Disposition: ");
                body.extend_from_slice(disposition.as_bytes());
                body.extend_from_slice(b"\r\nContent-Type: application/octet-stream\r\n\r\n");
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(
    app: Router,
    uri: &str,
    authorization: Option<&str>,
    parts: &[Part<'_>],
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    send(app, builder.body(Body::from(multipart_body(parts))).unwrap()).await
}

// ---------------------------------------------------------------------------
// File signatures
// ---------------------------------------------------------------------------

pub const PNG: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];

pub const PDF: &[u8] = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\n";
