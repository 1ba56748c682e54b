use serde::{Deserialize, Serialize};

use crate::error::{Result, ThreadError};

pub const DEFAULT_PER_PAGE: u32 = 30;

/// Label every backing issue carries next to the thread id
pub const DEFAULT_MARKER_LABEL: &str = "gitment";

/// OAuth application credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OAuthConfig {
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    /// Where the provider sends the visitor back (defaults to the current page)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
}

impl OAuthConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: None,
        }
    }

    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }
}

/// Construction-time options, as a host would write them in its config file.
///
/// Unset `id`, `link` and `title` fall back to the current page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreadOptions {
    pub owner: String,
    pub repo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub oauth: OAuthConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_label: Option<String>,
    /// Tracker API base (defaults to the public GitHub API)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Token exchange endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_url: Option<String>,
}

impl ThreadOptions {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_oauth(mut self, oauth: OAuthConfig) -> Self {
        self.oauth = oauth;
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn with_marker_label(mut self, label: impl Into<String>) -> Self {
        self.marker_label = Some(label.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    pub fn with_exchange_url(mut self, url: impl Into<String>) -> Self {
        self.exchange_url = Some(url.into());
        self
    }

    /// Resolve page-dependent defaults and validate.
    ///
    /// `page_url` must already be stripped of any authorization code.
    pub fn resolve(&self, page_url: &str, page_title: &str) -> Result<ThreadConfig> {
        if self.owner.trim().is_empty() {
            return Err(ThreadError::Config("owner is required".to_string()));
        }
        if self.repo.trim().is_empty() {
            return Err(ThreadError::Config("repo is required".to_string()));
        }
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE);
        if per_page == 0 || per_page > 100 {
            return Err(ThreadError::Config(format!(
                "per_page must be between 1 and 100, got {}",
                per_page
            )));
        }

        Ok(ThreadConfig {
            id: self.id.clone().unwrap_or_else(|| page_url.to_string()),
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            title: self.title.clone().unwrap_or_else(|| page_title.to_string()),
            link: self.link.clone().unwrap_or_else(|| page_url.to_string()),
            description: self.desc.clone().unwrap_or_default(),
            labels: self.labels.clone(),
            per_page,
            marker_label: self
                .marker_label
                .clone()
                .unwrap_or_else(|| DEFAULT_MARKER_LABEL.to_string()),
        })
    }
}

/// Resolved, immutable thread settings owned by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadConfig {
    pub id: String,
    pub owner: String,
    pub repo: String,
    pub title: String,
    pub link: String,
    pub description: String,
    pub labels: Vec<String>,
    pub per_page: u32,
    pub marker_label: String,
}

impl ThreadConfig {
    /// Labels attached to a newly created backing issue
    pub fn issue_labels(&self) -> Vec<String> {
        let mut labels = self.labels.clone();
        labels.push(self.marker_label.clone());
        labels.push(self.id.clone());
        labels
    }

    pub fn issue_body(&self) -> String {
        format!("{}\n\n{}", self.link, self.description)
    }
}
