// Transport settings shared by the tracker client and the token exchange

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_EXCHANGE_URL: &str = "https://gh-oauth.imsun.net";

/// HTTP settings for [`crate::GithubTransport`] and [`crate::HttpTokenExchange`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_exchange_url")]
    pub exchange_url: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_base() -> String {
    GITHUB_API_BASE.to_string()
}

fn default_exchange_url() -> String {
    DEFAULT_EXCHANGE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("issuethread/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            exchange_url: default_exchange_url(),
            request_timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl TransportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_exchange_url(mut self, url: impl Into<String>) -> Self {
        self.exchange_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = timeout.as_secs().max(1);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
