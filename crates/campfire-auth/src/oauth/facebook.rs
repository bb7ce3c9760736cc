//! Facebook Graph API profile lookup for access-token login.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use campfire_core::config::FacebookConfig;
use campfire_core::error::{AppError, ErrorKind};
use campfire_core::result::AppResult;

use super::profile::{ProfileProvider, ProviderProfile};

/// Profile fields requested from `/me`.
const PROFILE_FIELDS: &str = "id,name,first_name,last_name";

/// `/me` response body.
#[derive(Debug, Deserialize)]
struct GraphProfile {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

impl From<GraphProfile> for ProviderProfile {
    fn from(p: GraphProfile) -> Self {
        Self {
            external_id: p.id,
            display_name: p.name.unwrap_or_default(),
            given_name: p.first_name,
            family_name: p.last_name,
        }
    }
}

/// `/debug_token` response body.
#[derive(Debug, Deserialize)]
struct DebugTokenEnvelope {
    data: DebugTokenData,
}

#[derive(Debug, Deserialize)]
struct DebugTokenData {
    #[serde(default)]
    app_id: Option<String>,
    #[serde(default)]
    is_valid: bool,
}

/// Graph API error body.
#[derive(Debug, Deserialize)]
struct GraphErrorEnvelope {
    error: GraphError,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    message: String,
}

/// Resolves Facebook user access tokens through the Graph API.
///
/// When an app id and secret are configured, the token is first checked
/// with `/debug_token` to make sure it was issued for this application.
#[derive(Debug, Clone)]
pub struct FacebookProfileProvider {
    client: reqwest::Client,
    graph_url: String,
    client_id: String,
    client_secret: String,
}

impl FacebookProfileProvider {
    /// Creates a provider from configuration.
    pub fn new(config: &FacebookConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build Facebook HTTP client",
                    e,
                )
            })?;

        if config.client_id.is_empty() || config.client_secret.is_empty() {
            warn!("Facebook client id/secret not configured; tokens will not be checked against the app");
        }

        Ok(Self {
            client,
            graph_url: config.graph_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        })
    }

    /// `app_id|app_secret`, the Graph API's app access token form.
    fn app_access_token(&self) -> Option<String> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return None;
        }
        Some(format!("{}|{}", self.client_id, self.client_secret))
    }

    async fn check_app_binding(&self, access_token: &str) -> AppResult<()> {
        let Some(app_token) = self.app_access_token() else {
            return Ok(());
        };

        let response = self
            .client
            .get(format!("{}/debug_token", self.graph_url))
            .query(&[("input_token", access_token), ("access_token", app_token.as_str())])
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: DebugTokenEnvelope = read_json(response).await?;

        if !envelope.data.is_valid {
            return Err(AppError::authentication("Facebook access token is not valid"));
        }
        if envelope.data.app_id.as_deref() != Some(self.client_id.as_str()) {
            return Err(AppError::authentication(
                "Facebook access token was issued for a different application",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileProvider for FacebookProfileProvider {
    fn name(&self) -> &'static str {
        "facebook"
    }

    async fn fetch_profile(&self, access_token: &str) -> AppResult<ProviderProfile> {
        if access_token.trim().is_empty() {
            return Err(AppError::authentication("Missing Facebook access token"));
        }

        self.check_app_binding(access_token).await?;

        let response = self
            .client
            .get(format!("{}/me", self.graph_url))
            .query(&[("fields", PROFILE_FIELDS), ("access_token", access_token)])
            .send()
            .await
            .map_err(transport_error)?;
        let profile: GraphProfile = read_json(response).await?;

        if profile.id.is_empty() {
            return Err(AppError::authentication("Facebook profile has no id"));
        }
        // The display name becomes the local username.
        if profile.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            return Err(AppError::authentication("Facebook profile has no name"));
        }
        debug!(facebook_id = %profile.id, "Facebook profile fetched");
        Ok(profile.into())
    }
}

fn transport_error(e: reqwest::Error) -> AppError {
    AppError::with_source(
        ErrorKind::ExternalService,
        format!("Facebook Graph API unreachable: {e}"),
        e,
    )
}

/// Decodes a success body, or maps the Graph API error to an [`AppError`].
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Malformed Facebook Graph API response",
                e,
            )
        });
    }

    let message = response
        .json::<GraphErrorEnvelope>()
        .await
        .map(|body| body.error.message)
        .unwrap_or_else(|_| status.to_string());
    Err(classify_failure(status.as_u16(), &message))
}

fn classify_failure(status: u16, message: &str) -> AppError {
    match status {
        400 | 401 | 403 => {
            AppError::authentication(format!("Facebook rejected the access token: {message}"))
        }
        _ => AppError::external_service(format!(
            "Facebook Graph API returned {status}: {message}"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(id: &str, secret: &str) -> FacebookProfileProvider {
        FacebookProfileProvider::new(&FacebookConfig {
            client_id: id.into(),
            client_secret: secret.into(),
            graph_url: "https://graph.facebook.com/v3.2/".into(),
            timeout_seconds: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_graph_profile_maps_to_provider_profile() {
        let raw: GraphProfile = serde_json::from_value(serde_json::json!({
            "id": "fb-123",
            "name": "Bob Jones",
            "first_name": "Bob",
            "last_name": "Jones",
        }))
        .unwrap();
        let profile = ProviderProfile::from(raw);
        assert_eq!(profile.external_id, "fb-123");
        assert_eq!(profile.display_name, "Bob Jones");
        assert_eq!(profile.given_name.as_deref(), Some("Bob"));
        assert_eq!(profile.family_name.as_deref(), Some("Jones"));
    }

    #[test]
    fn test_app_access_token_requires_both_credentials() {
        assert_eq!(
            provider("app", "secret").app_access_token().as_deref(),
            Some("app|secret")
        );
        assert!(provider("app", "").app_access_token().is_none());
        assert!(provider("", "secret").app_access_token().is_none());
    }

    #[test]
    fn test_graph_url_trailing_slash_trimmed() {
        assert_eq!(provider("a", "b").graph_url, "https://graph.facebook.com/v3.2");
    }

    #[test]
    fn test_failure_classification() {
        assert_eq!(classify_failure(400, "bad").kind, ErrorKind::Authentication);
        assert_eq!(classify_failure(401, "bad").kind, ErrorKind::Authentication);
        assert_eq!(classify_failure(500, "down").kind, ErrorKind::ExternalService);
        assert_eq!(classify_failure(429, "slow").kind, ErrorKind::ExternalService);
    }

    #[tokio::test]
    async fn test_empty_token_rejected_without_network() {
        let err = provider("a", "b").fetch_profile("  ").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    mod graph {
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        use super::*;

        const USER_TOKEN: &str = "user-token";

        fn provider_for(server: &MockServer, id: &str, secret: &str) -> FacebookProfileProvider {
            FacebookProfileProvider::new(&FacebookConfig {
                client_id: id.into(),
                client_secret: secret.into(),
                graph_url: server.uri(),
                timeout_seconds: 5,
            })
            .unwrap()
        }

        async fn mount_debug_token(server: &MockServer, body: serde_json::Value) {
            Mock::given(method("GET"))
                .and(path("/debug_token"))
                .and(query_param("input_token", USER_TOKEN))
                .and(query_param("access_token", "app-id|app-secret"))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .mount(server)
                .await;
        }

        async fn mount_me(server: &MockServer, response: ResponseTemplate) {
            Mock::given(method("GET"))
                .and(path("/me"))
                .and(query_param("access_token", USER_TOKEN))
                .and(query_param("fields", PROFILE_FIELDS))
                .respond_with(response)
                .mount(server)
                .await;
        }

        fn bob() -> ResponseTemplate {
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "fb-123",
                "name": "Bob Jones",
                "first_name": "Bob",
                "last_name": "Jones",
            }))
        }

        #[tokio::test]
        async fn test_valid_token_returns_profile() {
            let server = MockServer::start().await;
            mount_debug_token(
                &server,
                serde_json::json!({ "data": { "app_id": "app-id", "is_valid": true } }),
            )
            .await;
            mount_me(&server, bob()).await;

            let profile = provider_for(&server, "app-id", "app-secret")
                .fetch_profile(USER_TOKEN)
                .await
                .unwrap();
            assert_eq!(profile.external_id, "fb-123");
            assert_eq!(profile.display_name, "Bob Jones");
        }

        #[tokio::test]
        async fn test_unconfigured_app_skips_debug_token() {
            let server = MockServer::start().await;
            mount_me(&server, bob()).await;

            let profile = provider_for(&server, "", "")
                .fetch_profile(USER_TOKEN)
                .await
                .unwrap();
            assert_eq!(profile.external_id, "fb-123");
        }

        #[tokio::test]
        async fn test_token_for_other_app_rejected() {
            let server = MockServer::start().await;
            mount_debug_token(
                &server,
                serde_json::json!({ "data": { "app_id": "someone-else", "is_valid": true } }),
            )
            .await;
            mount_me(&server, bob()).await;

            let err = provider_for(&server, "app-id", "app-secret")
                .fetch_profile(USER_TOKEN)
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authentication);
        }

        #[tokio::test]
        async fn test_invalid_token_rejected() {
            let server = MockServer::start().await;
            mount_debug_token(
                &server,
                serde_json::json!({ "data": { "app_id": "app-id", "is_valid": false } }),
            )
            .await;
            mount_me(&server, bob()).await;

            let err = provider_for(&server, "app-id", "app-secret")
                .fetch_profile(USER_TOKEN)
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authentication);
        }

        #[tokio::test]
        async fn test_graph_error_envelope_is_authentication_failure() {
            let server = MockServer::start().await;
            mount_me(
                &server,
                ResponseTemplate::new(400).set_body_json(serde_json::json!({
                    "error": {
                        "message": "Invalid OAuth access token.",
                        "type": "OAuthException",
                        "code": 190,
                    }
                })),
            )
            .await;

            let err = provider_for(&server, "", "")
                .fetch_profile(USER_TOKEN)
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authentication);
            assert!(err.message.contains("Invalid OAuth access token."));
        }

        #[tokio::test]
        async fn test_graph_outage_is_external_failure() {
            let server = MockServer::start().await;
            mount_me(&server, ResponseTemplate::new(500)).await;

            let err = provider_for(&server, "", "")
                .fetch_profile(USER_TOKEN)
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::ExternalService);
            assert_eq!(err.status_code(), 502);
        }

        #[tokio::test]
        async fn test_profile_without_id_rejected() {
            let server = MockServer::start().await;
            mount_me(
                &server,
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "id": "", "name": "Nobody" })),
            )
            .await;

            let err = provider_for(&server, "", "")
                .fetch_profile(USER_TOKEN)
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authentication);
        }

        #[tokio::test]
        async fn test_profile_without_name_rejected() {
            let server = MockServer::start().await;
            mount_me(
                &server,
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "fb-9" })),
            )
            .await;

            let err = provider_for(&server, "", "")
                .fetch_profile(USER_TOKEN)
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authentication);
        }
    }
}
