//! Shared test helpers for HTTP tests.
//!
//! The app runs against the in-memory identity and partner stores and a
//! stub Facebook provider, so no database or network is needed.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use campfire_api::AppState;
use campfire_auth::store::register_local_user;
use campfire_auth::{MemoryIdentityStore, PasswordHasher, ProfileProvider, ProviderProfile};
use campfire_core::config::AppConfig;
use campfire_core::error::AppError;
use campfire_core::result::AppResult;
use campfire_database::repositories::MemoryPartnerStore;
use campfire_entity::user::User;

/// Token the stub provider resolves to Bob Jones.
pub const BOB_TOKEN: &str = "fb-token-bob";
/// Token for the same Facebook account after Bob renamed his profile.
pub const BOB_RENAMED_TOKEN: &str = "fb-token-bob-renamed";
/// Token for which the stub provider reports an outage.
pub const PROVIDER_DOWN_TOKEN: &str = "fb-token-down";

/// Profile provider backed by a fixed token table.
#[derive(Debug, Default)]
pub struct StubProfileProvider {
    profiles: HashMap<String, ProviderProfile>,
}

impl StubProfileProvider {
    pub fn with_bob() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(
            BOB_TOKEN.to_string(),
            ProviderProfile {
                external_id: "fb-123".into(),
                display_name: "Bob Jones".into(),
                given_name: Some("Bob".into()),
                family_name: Some("Jones".into()),
            },
        );
        profiles.insert(
            BOB_RENAMED_TOKEN.to_string(),
            ProviderProfile {
                external_id: "fb-123".into(),
                display_name: "Bobby J".into(),
                given_name: Some("Bobby".into()),
                family_name: Some("J".into()),
            },
        );
        Self { profiles }
    }
}

#[async_trait]
impl ProfileProvider for StubProfileProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn fetch_profile(&self, access_token: &str) -> AppResult<ProviderProfile> {
        if access_token == PROVIDER_DOWN_TOKEN {
            return Err(AppError::external_service("Facebook Graph API returned 503"));
        }
        self.profiles
            .get(access_token)
            .cloned()
            .ok_or_else(|| AppError::authentication("Facebook rejected the access token"))
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for issuing tokens directly
    pub state: AppState,
    /// Identity store behind the router
    pub store: Arc<MemoryIdentityStore>,
    hasher: PasswordHasher,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.secret_key = "integration-test-secret".into();

        let hasher = PasswordHasher::with_cost(1024, 1).expect("valid argon2 params");
        let store = Arc::new(MemoryIdentityStore::new(hasher.clone()));

        let state = AppState::new(
            Arc::new(config.clone()),
            store.clone(),
            Arc::new(StubProfileProvider::with_bob()),
            Arc::new(MemoryPartnerStore::new()),
        );
        let router = campfire_api::build_app(state.clone(), &config.server.cors);

        Self {
            router,
            state,
            store,
            hasher,
        }
    }

    /// Create a local user with a password
    pub async fn create_test_user(&self, username: &str, password: &str, admin: bool) -> User {
        register_local_user(self.store.as_ref(), &self.hasher, username, password, admin)
            .await
            .expect("Failed to create test user")
    }

    /// Login and return the bearer token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self.request("POST", "/users/login", Some(body), None).await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .get("token")
            .and_then(|v| v.as_str())
            .expect("No token in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let auth = token.map(|t| format!("Bearer {t}"));
        let headers: Vec<(&str, &str)> = auth
            .as_deref()
            .map(|a| vec![("Authorization", a)])
            .unwrap_or_default();
        self.request_with_headers(method, path, body, &headers).await
    }

    /// Make an HTTP request with arbitrary headers
    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let body = match body {
            Some(b) => {
                req = req.header("Content-Type", "application/json");
                Body::from(serde_json::to_string(&b).expect("Failed to serialize body"))
            }
            None => Body::empty(),
        };
        let req = req.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
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
