mod bootstrap;
pub mod builder;
pub mod navigation;
pub mod notifier;
pub mod render;
pub mod store;
mod sync;
pub mod theme;
pub mod thread;

pub use builder::ThreadBuilder;
pub use navigation::{MemoryNavigation, Navigation};
pub use notifier::{Notifier, TracingNotifier};
pub use render::{MemoryTarget, RenderKind, RenderNode, RenderTarget};
pub use store::{StateStore, StateWatcher, WatcherId};
pub use theme::{DefaultTheme, Theme};
pub use thread::{BootstrapPhase, CommentThread, ThreadParts};

// Re-export key types from issuethread-types
pub use issuethread_types::{
    Comment, ErrorKind, Issue, Reaction, Result, ThreadError, ThreadOptions, ThreadState,
    UserIdentity,
};
