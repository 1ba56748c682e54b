use thiserror::Error;

/// Coarse classification of a [`ThreadError`], used by renderers to pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotInitialized,
    Unauthenticated,
    TransportFailure,
    ExchangeFailure,
    ReactionNotFound,
    CacheFailure,
    InvalidConfig,
}

/// Errors produced while bootstrapping or synchronizing a thread.
///
/// The type is `Clone` so the last failure can be kept in `ThreadState::error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThreadError {
    #[error("Comments not initialized: no backing issue for this thread")]
    NotInitialized,

    #[error("Login required")]
    Unauthenticated,

    #[error("Transport error (status {status:?}): {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Authorization code exchange failed: {0}")]
    Exchange(String),

    #[error("No reaction from the current user to remove")]
    ReactionNotFound,

    #[error("Identity cache error: {0}")]
    Cache(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ThreadError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ThreadError::NotInitialized => ErrorKind::NotInitialized,
            ThreadError::Unauthenticated => ErrorKind::Unauthenticated,
            ThreadError::Transport { .. } | ThreadError::Decode(_) => ErrorKind::TransportFailure,
            ThreadError::Exchange(_) => ErrorKind::ExchangeFailure,
            ThreadError::ReactionNotFound => ErrorKind::ReactionNotFound,
            ThreadError::Cache(_) => ErrorKind::CacheFailure,
            ThreadError::Config(_) => ErrorKind::InvalidConfig,
        }
    }
}

impl From<serde_json::Error> for ThreadError {
    fn from(e: serde_json::Error) -> Self {
        ThreadError::Decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ThreadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(ThreadError::NotInitialized.kind(), ErrorKind::NotInitialized);
        assert_eq!(
            ThreadError::http_status(502, "bad gateway").kind(),
            ErrorKind::TransportFailure
        );
        assert_eq!(
            ThreadError::Decode("eof".to_string()).kind(),
            ErrorKind::TransportFailure
        );
        assert_eq!(
            ThreadError::Exchange("bad_verification_code".to_string()).kind(),
            ErrorKind::ExchangeFailure
        );
    }

    #[test]
    fn test_transport_display_includes_status() {
        let err = ThreadError::http_status(404, "Not Found");
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Not Found"));
    }
}
