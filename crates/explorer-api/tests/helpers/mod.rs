//! Shared test helpers for API integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use explorer_api::{AppState, build_router};
use explorer_auth::jwt::JwtEncoder;
use explorer_core::config::AppConfig;
use explorer_database::Repositories;

/// Test application over the in-memory store
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    encoder: JwtEncoder,
}

impl TestApp {
    /// Create a new test application with a fresh store
    pub fn new() -> Self {
        let config = AppConfig::default();
        let encoder = JwtEncoder::new(&config.auth);
        let state = AppState::new(config.clone(), Repositories::in_memory());

        Self {
            router: build_router(state),
            config,
            encoder,
        }
    }

    /// Issue a bearer token for `user_id`
    pub fn token(&self, user_id: Uuid) -> String {
        self.encoder
            .issue(user_id, Some("tester"))
            .expect("Failed to issue token")
    }

    /// A fresh user id and a token for it
    pub fn user(&self) -> (Uuid, String) {
        let id = Uuid::new_v4();
        (id, self.token(id))
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let raw = self.request_raw(method, path, body, token).await;
        let body: Value = serde_json::from_slice(raw.text.as_bytes()).unwrap_or(Value::Null);

        TestResponse {
            status: raw.status,
            body,
        }
    }

    /// Make a request and keep the body as text
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> RawResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        RawResponse {
            status,
            headers,
            text: String::from_utf8(body_bytes.to_vec()).expect("Body is not UTF-8"),
        }
    }

    /// Create an itinerary and return its id
    pub async fn create_itinerary(&self, token: &str, body: Value) -> String {
        let response = self
            .request("POST", "/api/itineraries", Some(body), Some(token))
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );
        response.body["id"]
            .as_str()
            .expect("No id in create response")
            .to_string()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// Response with an unparsed body
#[derive(Debug)]
pub struct RawResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Body text
    pub text: String,
}
