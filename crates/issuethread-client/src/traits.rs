use async_trait::async_trait;
use issuethread_types::Result;
use serde_json::Value;

/// Authenticated access to the issue tracker.
///
/// Paths beginning with `http://` or `https://` are used as given (for example
/// the `comments_url` of an issue). Any other path is relative to the API base.
/// Non-JSON bodies are returned as `Value::String`, empty bodies as `Value::Null`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `query` pairs are appended in order
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value>;

    async fn post(&self, path: &str, body: Value) -> Result<Value>;

    async fn delete(&self, path: &str) -> Result<Value>;
}

/// Trusted intermediary that turns an authorization code into an access token.
///
/// Kept apart from [`Transport`] so the client secret never travels with
/// ordinary tracker calls.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    async fn exchange(&self, code: &str, client_id: &str, client_secret: &str) -> Result<String>;
}
