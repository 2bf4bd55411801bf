use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

use crate::api::types::{ApiError, GraphqlErrorEntry, HealthStatus};
use crate::config;
use crate::session::SessionManager;

/// Default per-call deadline.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, serde::Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlErrorEntry>>,
}

/// Single chokepoint for every request to the scanning service. Owns no
/// entities; each call resolves to exactly one success or one normalized
/// `ApiError`.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    session: SessionManager,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            session: SessionManager::new(),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            session: SessionManager::new(),
        }
    }

    pub fn new_with_session(base_url: impl Into<String>, session: SessionManager) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            session,
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    /// Sends one GraphQL operation and extracts `field` from the response
    /// data. Never retries; retry policy for non-idempotent operations
    /// belongs to callers.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        document: &str,
        field: &str,
        variables: Value,
    ) -> Result<T, ApiError> {
        self.execute_with_timeout(document, field, variables, REQUEST_TIMEOUT)
            .await
    }

    pub async fn execute_with_timeout<T: DeserializeOwned>(
        &self,
        document: &str,
        field: &str,
        variables: Value,
        timeout: Duration,
    ) -> Result<T, ApiError> {
        let base_url = self.resolved_base_url().await;
        let mut request = self
            .client
            .post(format!("{}/query", base_url))
            .timeout(timeout)
            .json(&json!({ "query": document, "variables": variables }));

        // Credential is attached only while locally valid; an expired token
        // is never sent.
        if self.session.is_valid() {
            if let Some(token) = self.session.credential() {
                request = request.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token));
            }
        }

        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            log::warn!("Credential rejected by server; clearing session");
            self.session.clear_credential();
            redirect_to_login_if_needed();
            return Err(ApiError::unauthenticated("Session rejected by server"));
        }

        let envelope: GraphqlResponse = response
            .json()
            .await
            .map_err(|e| ApiError::application(format!("Failed to parse response: {}", e)))?;

        // An error array fails the call even alongside data; the first
        // message in received order is the failure reason.
        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            return Err(ApiError::application(errors[0].message.clone()));
        }
        if !status.is_success() {
            return Err(ApiError::application(format!(
                "Request failed with status {}",
                status
            )));
        }

        let data = envelope
            .data
            .ok_or_else(|| ApiError::application("Response carried no data"))?;
        let value = data
            .get(field)
            .cloned()
            .ok_or_else(|| ApiError::application(format!("Response missing field '{}'", field)))?;
        serde_json::from_value(value)
            .map_err(|e| ApiError::application(format!("Failed to parse response: {}", e)))
    }

    pub async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .get(format!("{}/health", base_url))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(map_transport_error)?;
        if !response.status().is_success() {
            return Err(ApiError::application(format!(
                "Health check failed with status {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::application(format!("Failed to parse response: {}", e)))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::timeout(format!("Request timed out: {}", error))
    } else {
        ApiError::network(format!("Request failed: {}", error))
    }
}

fn redirect_to_login_if_needed() {
    #[cfg(target_arch = "wasm32")]
    if let Some(window) = web_sys::window() {
        let location = window.location();
        if let Ok(pathname) = location.pathname() {
            if pathname == "/login" {
                return;
            }
        }
        let _ = location.set_href("/login");
    }
}
