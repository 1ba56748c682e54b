use config::{Config as ConfigLoader, ConfigError, Environment, File};
use issuethread::{ThreadOptions, TransportConfig};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub thread: ThreadOptions,
    pub page: PageConfig,
    pub identity: IdentityConfig,
    #[serde(default)]
    pub transport: TransportConfig,
    pub logging: LoggingConfig,
}

/// The page the thread is embedded in
#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    pub url: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// JSON file holding the access token and cached profile
    pub cache_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables prefixed with ISSUETHREAD_ (e.g. ISSUETHREAD_THREAD__OWNER)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("ISSUETHREAD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        let mut cfg: Config = config.try_deserialize()?;

        // Secrets come from ENV only (not in TOML)
        if let Ok(secret) = std::env::var("OAUTH_CLIENT_SECRET") {
            cfg.thread.oauth.client_secret = secret;
        }
        if !cfg.thread.oauth.client_id.is_empty() && cfg.thread.oauth.client_secret.is_empty() {
            return Err(ConfigError::Message(
                "OAUTH_CLIENT_SECRET environment variable is required when oauth.client_id is set"
                    .to_string(),
            ));
        }

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let toml = r#"
            [thread]
            owner = "octocat"
            repo = "blog-comments"
            labels = ["blog"]
            per_page = 20

            [thread.oauth]
            client_id = "cid"

            [page]
            url = "https://blog.example.com/posts/hello"
            title = "Hello"

            [identity]
            cache_path = "/tmp/identity.json"

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.thread.owner, "octocat");
        assert_eq!(config.thread.per_page, Some(20));
        assert_eq!(config.thread.oauth.client_id, "cid");
        assert!(config.thread.oauth.client_secret.is_empty());
        assert_eq!(config.transport.request_timeout_secs, 30);
        assert_eq!(config.logging.format, "json");
    }
}
