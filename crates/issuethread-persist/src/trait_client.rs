use crate::error::Result;

/// Key-value storage that survives page loads.
///
/// Implementations hold the bearer token and the serialized profile of the
/// visitor. Engine and transport share one instance.
pub trait IdentityCache: Send + Sync {
    /// Read a value, `None` if the key was never set or was removed
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
