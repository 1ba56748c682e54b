pub mod config;
pub mod error;
pub mod models;
pub mod state;

pub use config::{
    OAuthConfig, ThreadConfig, ThreadOptions, DEFAULT_MARKER_LABEL, DEFAULT_PER_PAGE,
};
pub use error::{ErrorKind, Result, ThreadError};
pub use models::{Comment, Issue, Label, Reaction, ReactionSummary, User, UserIdentity, HEART};
pub use state::{ThreadState, UserState};
