//! Prelude module for convenient imports
//!
//! Import everything you need with:
//! ```rust
//! use issuethread::prelude::*;
//! ```

pub use crate::{
    CommentThread, ThreadBuilder, ThreadOptions, OAuthConfig, ThreadState, ThreadError,
    MemoryNavigation, Navigation, MemoryTarget, RenderKind, RenderNode, RenderTarget,
    Theme, DefaultTheme, Notifier, TracingNotifier,
    FileIdentityCache, MemoryIdentityCache, IdentityCache,
    Transport, TokenExchange, TransportConfig,
};
