//! The outbound HTTP gateway.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use infradesk_core::config::ApiConfig;
use infradesk_core::error::AppError;
use infradesk_core::result::AppResult;

use crate::guard::{AuthExpiryHook, AuthGuard};
use crate::outcome::{ApiError, ApiOutcome};

/// HTTP client for the inventory backend.
///
/// Cheap to clone; clones share the connection pool and the auth-expiry
/// hook.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

#[derive(Debug)]
struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    guard: AuthGuard,
}

impl ApiClient {
    /// Build a client from configuration. No hook is registered yet.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                AppError::configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                guard: AuthGuard::default(),
            }),
        })
    }

    /// Return a client that runs `hook` whenever a call gets 401/403.
    pub fn with_auth_expiry_hook(self, hook: Arc<dyn AuthExpiryHook>) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                http: self.inner.http.clone(),
                base_url: self.inner.base_url.clone(),
                guard: AuthGuard::new(Some(hook)),
            }),
        }
    }

    /// Backend base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Absolute URL for an API path such as `/servers/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    /// `GET path`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> ApiOutcome<T> {
        self.execute::<(), T>(Method::GET, path, token, None).await
    }

    /// `POST path` with a JSON body.
    pub async fn post<B, T>(&self, path: &str, token: Option<&str>, body: &B) -> ApiOutcome<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, path, token, Some(body)).await
    }

    /// `PATCH path` with a JSON body.
    pub async fn patch<B, T>(&self, path: &str, token: Option<&str>, body: &B) -> ApiOutcome<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::PATCH, path, token, Some(body)).await
    }

    /// `DELETE path`. The response body, if any, is ignored.
    pub async fn delete(&self, path: &str, token: Option<&str>) -> ApiOutcome<()> {
        match self.send::<()>(Method::DELETE, path, token, None).await {
            ApiOutcome::Ok(_) => ApiOutcome::Ok(()),
            ApiOutcome::AuthExpired { status } => ApiOutcome::AuthExpired { status },
            ApiOutcome::Error(err) => ApiOutcome::Error(err),
        }
    }

    async fn execute<B, T>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> ApiOutcome<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = match self.send(method, path, token, body).await {
            ApiOutcome::Ok(response) => response,
            ApiOutcome::AuthExpired { status } => return ApiOutcome::AuthExpired { status },
            ApiOutcome::Error(err) => return ApiOutcome::Error(err),
        };

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return ApiOutcome::Error(ApiError::Transport(e.to_string())),
        };
        let text = if text.trim().is_empty() { "null" } else { text.as_str() };

        match serde_json::from_str(text) {
            Ok(value) => ApiOutcome::Ok(value),
            Err(e) => {
                warn!(path, error = %e, "Failed to decode response body");
                ApiOutcome::Error(ApiError::Decode(e.to_string()))
            }
        }
    }

    /// Issue one request. Every call funnels through here, so the
    /// auth-expiry inspection runs exactly once per response.
    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> ApiOutcome<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let mut request = self.inner.http.request(method.clone(), &url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(method = %method, path, "Sending request");
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(method = %method, path, error = %e, "Request did not reach the backend");
                return ApiOutcome::Error(ApiError::Transport(e.to_string()));
            }
        };

        let status = response.status().as_u16();
        debug!(method = %method, path, status, "Received response");

        if self.inner.guard.inspect(method.as_str(), path, status).await {
            return ApiOutcome::AuthExpired { status };
        }

        if !response.status().is_success() {
            let message = match response.text().await {
                Ok(body) => error_message(&body),
                Err(_) => None,
            };
            warn!(method = %method, path, status, "Backend returned an error");
            return ApiOutcome::Error(ApiError::Status { status, message });
        }

        ApiOutcome::Ok(response)
    }
}

/// Pull a human-readable message out of an error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "detail", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = ApiConfig {
            base_url: "http://backend.local/api/".to_string(),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://backend.local/api");
        assert_eq!(client.url("/servers/"), "http://backend.local/api/servers/");
        assert_eq!(client.url("me/"), "http://backend.local/api/me/");
    }

    #[test]
    fn test_error_message_prefers_message_then_detail() {
        assert_eq!(
            error_message(r#"{"message":"Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(
            error_message(r#"{"detail":"Not found."}"#).as_deref(),
            Some("Not found.")
        );
        assert_eq!(error_message("<html>oops</html>"), None);
    }
}
