//! # Issuethread
//!
//! Comment threads for static pages, stored in a GitHub issue.
//!
//! ## Overview
//!
//! One issue per page holds the discussion. Issuethread keeps a local, observable
//! snapshot of that issue in sync:
//!
//! - **Bootstrap** the thread by finding (or, for the repository admin, creating) its issue
//! - **Log in** with the OAuth authorization-code flow through a token exchange service
//! - **Page** through comments, post new ones and render markdown
//! - **Like** and unlike the thread with heart reactions
//! - **Render** the state through swappable themes bound to render targets
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use issuethread::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let navigation = Arc::new(MemoryNavigation::parse("https://blog.example.com/hello")?);
//!
//!     let thread = ThreadBuilder::new()
//!         .options(
//!             ThreadOptions::new("octocat", "blog-comments")
//!                 .with_oauth(OAuthConfig::new("client-id", "client-secret")),
//!         )
//!         .navigation(navigation)
//!         .build()?;
//!
//!     let target = Arc::new(MemoryTarget::new());
//!     thread.bind(RenderKind::Root, target.clone());
//!
//!     if let Err(e) = thread.start().await {
//!         eprintln!("sync incomplete: {}", e);
//!     }
//!     println!("{}", target.markup());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Issuethread is organized into focused crates:
//!
//! - **`issuethread-types`**: options, state, tracker models and the error model
//! - **`issuethread-persist`**: identity cache for the access token and user profile
//! - **`issuethread-client`**: GitHub transport, OAuth link helpers and code exchange
//! - **`issuethread-engine`**: state store, thread engine, themes and render bindings
//!
//! ## License
//!
//! MIT

pub mod prelude;

pub use issuethread_engine::{
    BootstrapPhase, CommentThread, DefaultTheme, MemoryNavigation, MemoryTarget, Navigation,
    Notifier, RenderKind, RenderNode, RenderTarget, StateStore, StateWatcher, Theme,
    ThreadBuilder, ThreadParts, TracingNotifier, WatcherId,
};

pub use issuethread_client::{
    login_link, strip_code, GithubTransport, GithubTransportBuilder, HttpTokenExchange,
    TokenExchange, Transport, TransportConfig, DEFAULT_EXCHANGE_URL, GITHUB_API_BASE,
};

pub use issuethread_persist::{
    FileIdentityCache, IdentityCache, IdentityStore, MemoryIdentityCache, PersistError,
};

pub use issuethread_types::{
    Comment, ErrorKind, Issue, Label, OAuthConfig, Reaction, ReactionSummary, Result,
    ThreadConfig, ThreadError, ThreadOptions, ThreadState, User, UserIdentity, UserState,
};
