use std::sync::Arc;

use issuethread_types::UserIdentity;

use crate::error::Result;
use crate::trait_client::IdentityCache;

pub const ACCESS_TOKEN_KEY: &str = "issuethread.access_token";
pub const USER_KEY: &str = "issuethread.user";

/// Typed view over an [`IdentityCache`] using the fixed keys.
#[derive(Clone)]
pub struct IdentityStore {
    cache: Arc<dyn IdentityCache>,
}

impl IdentityStore {
    pub fn new(cache: Arc<dyn IdentityCache>) -> Self {
        Self { cache }
    }

    pub fn access_token(&self) -> Result<Option<String>> {
        Ok(self
            .cache
            .get(ACCESS_TOKEN_KEY)?
            .filter(|token| !token.trim().is_empty()))
    }

    pub fn set_access_token(&self, token: &str) -> Result<()> {
        self.cache.set(ACCESS_TOKEN_KEY, token)
    }

    /// Cached profile, marked `from_cache`.
    ///
    /// Only returned when a token is also cached. A profile that no longer parses
    /// is removed.
    pub fn cached_user(&self) -> Result<Option<UserIdentity>> {
        if self.access_token()?.is_none() {
            return Ok(None);
        }
        let Some(raw) = self.cache.get(USER_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str::<UserIdentity>(&raw) {
            Ok(mut user) => {
                user.from_cache = true;
                Ok(Some(user))
            }
            Err(e) => {
                tracing::warn!("Dropping unreadable cached profile: {}", e);
                self.cache.remove(USER_KEY)?;
                Ok(None)
            }
        }
    }

    pub fn store_user(&self, user: &UserIdentity) -> Result<()> {
        let mut stored = user.clone();
        stored.from_cache = false;
        let raw = serde_json::to_string(&stored)?;
        self.cache.set(USER_KEY, &raw)
    }

    /// Forget token and profile
    pub fn clear(&self) -> Result<()> {
        self.cache.remove(ACCESS_TOKEN_KEY)?;
        self.cache.remove(USER_KEY)
    }
}
