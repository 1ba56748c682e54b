// GitHub REST transport (HTTP direct, no SDK)

use async_trait::async_trait;
use issuethread_persist::IdentityStore;
use issuethread_types::{Result, ThreadError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::Value;

use crate::config::TransportConfig;
use crate::traits::Transport;

/// Reactions preview plus rendered comment bodies
const GITHUB_ACCEPT: &str =
    "application/vnd.github.squirrel-girl-preview, application/vnd.github.html+json";

/// Tracker client that reads the bearer token from the identity cache on every call.
pub struct GithubTransport {
    http_client: reqwest::Client,
    base_url: String,
    identity: IdentityStore,
}

impl GithubTransport {
    /// Create a transport against the public GitHub API
    pub fn new(identity: IdentityStore) -> Result<Self> {
        Self::builder().identity(identity).build()
    }

    pub fn builder() -> GithubTransportBuilder {
        GithubTransportBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        match self.identity.access_token()? {
            Some(token) => Ok(request.header(AUTHORIZATION, format!("Bearer {}", token.trim()))),
            None => Ok(request),
        }
    }

    async fn send(&self, method: &str, url: &str, request: RequestBuilder) -> Result<Value> {
        tracing::debug!("GitHub {} {}", method, url);

        let response = self
            .authorize(request)?
            .send()
            .await
            .map_err(|e| ThreadError::transport(format!("{} {} failed: {}", method, url, e)))?;

        self.handle_response(method, url, response).await
    }

    /// Map a response to JSON, text or `Null` depending on its body
    async fn handle_response(&self, method: &str, url: &str, response: Response) -> Result<Value> {
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("json"))
            .unwrap_or(false);

        let body = response
            .text()
            .await
            .map_err(|e| ThreadError::transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or(body);

            tracing::error!(
                "GitHub API request failed: {} {} status={}, message={}",
                method,
                url,
                status,
                message
            );
            return Err(ThreadError::http_status(status.as_u16(), message));
        }

        if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
            return Ok(Value::Null);
        }
        if is_json {
            return Ok(serde_json::from_str(&body)?);
        }
        Ok(Value::String(body))
    }
}

#[async_trait]
impl Transport for GithubTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = self.resolve(path);
        let request = self.http_client.get(&url).query(query);
        self.send("GET", &url, request).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        let url = self.resolve(path);
        let request = self.http_client.post(&url).json(&body);
        self.send("POST", &url, request).await
    }

    async fn delete(&self, path: &str) -> Result<Value> {
        let url = self.resolve(path);
        let request = self.http_client.delete(&url);
        self.send("DELETE", &url, request).await
    }
}

/// Builder for GithubTransport
#[derive(Default)]
pub struct GithubTransportBuilder {
    identity: Option<IdentityStore>,
    config: Option<TransportConfig>,
}

impl GithubTransportBuilder {
    /// Identity store the bearer token is read from (required)
    pub fn identity(mut self, identity: IdentityStore) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn config(mut self, config: TransportConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<GithubTransport> {
        let identity = self
            .identity
            .ok_or_else(|| ThreadError::Config("Identity store is required".to_string()))?;
        let config = self.config.unwrap_or_default();

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ThreadError::Config(format!("Invalid user agent: {}", e)))?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ThreadError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(GithubTransport {
            http_client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            identity,
        })
    }
}
