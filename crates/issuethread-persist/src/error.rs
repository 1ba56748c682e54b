use issuethread_types::ThreadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cache lock poisoned")]
    Poisoned,
}

impl From<PersistError> for ThreadError {
    fn from(e: PersistError) -> Self {
        ThreadError::Cache(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PersistError>;
