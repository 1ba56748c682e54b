use std::sync::Mutex;

use url::Url;

/// The page hosting the thread.
pub trait Navigation: Send + Sync {
    /// Full current location, fragment included
    fn current_url(&self) -> Url;

    /// Document title, used as the default issue title
    fn title(&self) -> String {
        String::new()
    }

    /// Rewrite the visible location without navigating
    fn replace_url(&self, url: &Url);

    /// Navigate away (used to start the OAuth redirect)
    fn assign(&self, url: &Url);
}

/// Navigation for hosts without a browser location (servers, CLIs, tests).
///
/// `assign` only records the requested URL.
#[derive(Debug)]
pub struct MemoryNavigation {
    current: Mutex<Url>,
    title: String,
    assigned: Mutex<Vec<Url>>,
}

impl MemoryNavigation {
    pub fn new(current: Url) -> Self {
        Self {
            current: Mutex::new(current),
            title: String::new(),
            assigned: Mutex::new(Vec::new()),
        }
    }

    pub fn parse(current: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(current)?))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// URLs passed to `assign`, oldest first
    pub fn assigned(&self) -> Vec<Url> {
        self.assigned
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Navigation for MemoryNavigation {
    fn current_url(&self) -> Url {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn replace_url(&self, url: &Url) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = url.clone();
    }

    fn assign(&self, url: &Url) {
        self.assigned
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(url.clone());
    }
}
