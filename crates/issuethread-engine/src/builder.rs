use std::sync::Arc;

use issuethread_client::{
    GithubTransport, HttpTokenExchange, TokenExchange, Transport, TransportConfig,
};
use issuethread_persist::{IdentityCache, IdentityStore, MemoryIdentityCache};
use issuethread_types::{Result, ThreadError, ThreadOptions};

use crate::navigation::Navigation;
use crate::notifier::{Notifier, TracingNotifier};
use crate::theme::{DefaultTheme, Theme};
use crate::thread::{CommentThread, ThreadParts};

/// Builder for constructing a CommentThread with optional components
#[derive(Default)]
pub struct ThreadBuilder {
    options: Option<ThreadOptions>,
    navigation: Option<Arc<dyn Navigation>>,
    identity_cache: Option<Arc<dyn IdentityCache>>,
    transport: Option<Arc<dyn Transport>>,
    exchange: Option<Arc<dyn TokenExchange>>,
    notifier: Option<Arc<dyn Notifier>>,
    theme: Option<Arc<dyn Theme>>,
    transport_config: Option<TransportConfig>,
}

impl ThreadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the thread options (required)
    pub fn options(mut self, options: ThreadOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the hosting page (required)
    pub fn navigation(mut self, navigation: Arc<dyn Navigation>) -> Self {
        self.navigation = Some(navigation);
        self
    }

    /// Set where the token and profile are kept. Defaults to memory.
    pub fn identity_cache(mut self, cache: Arc<dyn IdentityCache>) -> Self {
        self.identity_cache = Some(cache);
        self
    }

    /// Replace the GitHub transport
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the HTTP code exchange
    pub fn exchange(mut self, exchange: Arc<dyn TokenExchange>) -> Self {
        self.exchange = Some(exchange);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn theme(mut self, theme: Arc<dyn Theme>) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Settings for the default transport and exchange
    pub fn transport_config(mut self, config: TransportConfig) -> Self {
        self.transport_config = Some(config);
        self
    }

    /// Build the thread
    pub fn build(self) -> Result<Arc<CommentThread>> {
        let options = self
            .options
            .ok_or_else(|| ThreadError::Config("Thread options are required".to_string()))?;
        let navigation = self
            .navigation
            .ok_or_else(|| ThreadError::Config("Navigation is required".to_string()))?;

        let cache = self
            .identity_cache
            .unwrap_or_else(|| Arc::new(MemoryIdentityCache::new()));
        let identity = IdentityStore::new(cache);

        let mut transport_config = self.transport_config.unwrap_or_default();
        if let Some(api_base) = &options.api_base {
            transport_config = transport_config.with_api_base(api_base.clone());
        }
        if let Some(exchange_url) = &options.exchange_url {
            transport_config = transport_config.with_exchange_url(exchange_url.clone());
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(
                GithubTransport::builder()
                    .identity(identity.clone())
                    .config(transport_config.clone())
                    .build()?,
            ),
        };
        let exchange = match self.exchange {
            Some(exchange) => exchange,
            None => Arc::new(HttpTokenExchange::new(&transport_config)?),
        };

        let thread = CommentThread::new(ThreadParts {
            options,
            transport,
            exchange,
            identity,
            navigation,
            notifier: self.notifier.unwrap_or_else(|| Arc::new(TracingNotifier)),
            theme: self.theme.unwrap_or_else(|| Arc::new(DefaultTheme)),
        })?;

        Ok(Arc::new(thread))
    }
}
