use async_trait::async_trait;
use issuethread_types::{Result, ThreadError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;

use crate::config::TransportConfig;
use crate::traits::TokenExchange;

#[derive(Debug, Deserialize)]
struct ExchangeResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Token exchange through an HTTP intermediary that holds the client secret boundary
pub struct HttpTokenExchange {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpTokenExchange {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .map_err(|e| ThreadError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: config.exchange_url.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TokenExchange for HttpTokenExchange {
    async fn exchange(&self, code: &str, client_id: &str, client_secret: &str) -> Result<String> {
        tracing::info!("Exchanging authorization code at {}", self.endpoint);

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "code": code,
                "client_id": client_id,
                "client_secret": client_secret,
            }))
            .send()
            .await
            .map_err(|e| ThreadError::Exchange(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            tracing::error!("Token exchange failed: status={}, body={}", status, body);
            return Err(ThreadError::Exchange(format!("{} - {}", status, body)));
        }

        let parsed: ExchangeResponse = serde_json::from_str(&body)
            .map_err(|e| ThreadError::Exchange(format!("Unexpected response: {}", e)))?;

        match parsed.access_token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => {
                let reason = parsed
                    .error_description
                    .or(parsed.error)
                    .unwrap_or_else(|| "no access_token in response".to_string());
                Err(ThreadError::Exchange(reason))
            }
        }
    }
}
