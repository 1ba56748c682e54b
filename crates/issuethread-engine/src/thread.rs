use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Mutex, RwLock};

use issuethread_client::{login_link, strip_code, TokenExchange, Transport};
use issuethread_persist::IdentityStore;
use issuethread_types::{
    OAuthConfig, Result, ThreadConfig, ThreadOptions, ThreadState, UserState,
};
use tokio::task::JoinHandle;
use url::Url;

use crate::navigation::Navigation;
use crate::notifier::Notifier;
use crate::render::Binding;
use crate::store::StateStore;
use crate::theme::Theme;

/// Where the thread is in resolving its backing issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapPhase {
    Uninitialized,
    Locating,
    Creating,
    Found,
    Ready,
    /// Lookup found no backing issue; only `init()` leaves this phase
    NotInitialized,
}

/// Collaborators a thread is constructed from
pub struct ThreadParts {
    pub options: ThreadOptions,
    pub transport: Arc<dyn Transport>,
    pub exchange: Arc<dyn TokenExchange>,
    pub identity: IdentityStore,
    pub navigation: Arc<dyn Navigation>,
    pub notifier: Arc<dyn Notifier>,
    pub theme: Arc<dyn Theme>,
}

/// A comment thread synchronized with one backing issue.
///
/// Construction strips a returning OAuth code from the page location; `start()`
/// then exchanges it or goes straight to `update()`.
pub struct CommentThread {
    pub(crate) config: ThreadConfig,
    pub(crate) oauth: OAuthConfig,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) exchange: Arc<dyn TokenExchange>,
    pub(crate) identity: IdentityStore,
    pub(crate) navigation: Arc<dyn Navigation>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) store: StateStore,
    pub(crate) phase: Mutex<BootstrapPhase>,
    pub(crate) pending_code: Mutex<Option<String>>,
    /// Serializes issue lookups so concurrent callers share one request
    pub(crate) issue_lookup: tokio::sync::Mutex<()>,
    /// Latest comment request token
    pub(crate) comment_requests: AtomicU64,
    pub(crate) theme: RwLock<Arc<dyn Theme>>,
    pub(crate) bindings: Mutex<Vec<Binding>>,
}

impl CommentThread {
    pub fn builder() -> crate::builder::ThreadBuilder {
        crate::builder::ThreadBuilder::new()
    }

    pub fn new(parts: ThreadParts) -> Result<Self> {
        let ThreadParts {
            options,
            transport,
            exchange,
            identity,
            navigation,
            notifier,
            theme,
        } = parts;

        let mut page_url = navigation.current_url();
        let mut pending_code = None;
        if let Some((code, cleaned)) = strip_code(&page_url) {
            tracing::info!("Authorization code found, rewriting location to {}", cleaned);
            navigation.replace_url(&cleaned);
            page_url = cleaned;
            pending_code = Some(code);
        }

        let config = options.resolve(page_url.as_str(), &navigation.title())?;

        let cached = identity.cached_user().unwrap_or_else(|e| {
            tracing::warn!("Ignoring identity cache: {}", e);
            None
        });
        let state = ThreadState::new(UserState {
            identity: cached,
            logging_in: pending_code.is_some(),
        });

        tracing::debug!(
            "Thread {} bound to {}/{}",
            config.id,
            config.owner,
            config.repo
        );

        Ok(Self {
            config,
            oauth: options.oauth,
            transport,
            exchange,
            identity,
            navigation,
            notifier,
            store: StateStore::new(state),
            phase: Mutex::new(BootstrapPhase::Uninitialized),
            pending_code: Mutex::new(pending_code),
            issue_lookup: tokio::sync::Mutex::new(()),
            comment_requests: AtomicU64::new(0),
            theme: RwLock::new(theme),
            bindings: Mutex::new(Vec::new()),
        })
    }

    /// Exchange a pending authorization code, or run `update()` directly.
    pub async fn start(&self) -> Result<()> {
        let code = self
            .pending_code
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        match code {
            Some(code) => self.complete_login(&code).await,
            None => self.update().await,
        }
    }

    /// Run `start()` in the background
    pub fn spawn_start(self: &Arc<Self>) -> JoinHandle<Result<()>> {
        let thread = Arc::clone(self);
        tokio::spawn(async move {
            let result = thread.start().await;
            if let Err(ref e) = result {
                tracing::warn!("Thread start finished with error: {}", e);
            }
            result
        })
    }

    async fn complete_login(&self, code: &str) -> Result<()> {
        let exchanged = self
            .exchange
            .exchange(code, &self.oauth.client_id, &self.oauth.client_secret)
            .await;

        let token = match exchanged {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("Authorization code exchange failed: {}", e);
                self.store.mutate(|s| s.user.logging_in = false);
                self.notifier.notify(&e.to_string());
                return Err(e);
            }
        };

        if let Err(e) = self.identity.set_access_token(&token) {
            self.store.mutate(|s| s.user.logging_in = false);
            self.notifier.notify(&e.to_string());
            return Err(e.into());
        }
        tracing::info!("Logged in, synchronizing thread {}", self.config.id);

        let result = self.update().await;
        if self.store.read(|s| s.user.logging_in) {
            self.store.mutate(|s| s.user.logging_in = false);
        }
        result
    }

    /// Authorize link for the configured OAuth app
    pub fn login_link(&self) -> Result<Url> {
        login_link(&self.oauth, self.navigation.current_url().as_str())
    }

    /// Navigate to the provider's authorize page
    pub fn login(&self) -> Result<()> {
        let link = self.login_link()?;
        self.navigation.assign(&link);
        Ok(())
    }

    /// Forget the token and cached profile
    pub fn logout(&self) {
        if let Err(e) = self.identity.clear() {
            tracing::warn!("Failed to clear identity cache: {}", e);
        }
        self.store.mutate(|s| s.user = UserState::anonymous());
    }

    pub fn is_logged_in(&self) -> bool {
        self.access_token().is_some()
    }

    pub(crate) fn access_token(&self) -> Option<String> {
        self.identity.access_token().unwrap_or_else(|e| {
            tracing::warn!("Identity cache unreadable, treating visitor as anonymous: {}", e);
            None
        })
    }

    pub fn config(&self) -> &ThreadConfig {
        &self.config
    }

    pub fn oauth(&self) -> &OAuthConfig {
        &self.oauth
    }

    pub fn state(&self) -> ThreadState {
        self.store.snapshot()
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn bootstrap_phase(&self) -> BootstrapPhase {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn set_phase(&self, phase: BootstrapPhase) {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner()) = phase;
    }

    /// Owner-relative API path under the configured repository
    pub(crate) fn repo_path(&self, rest: &str) -> String {
        format!("/repos/{}/{}/{}", self.config.owner, self.config.repo, rest)
    }
}
