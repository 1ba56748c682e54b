use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{PersistError, Result};
use crate::trait_client::IdentityCache;

/// Process-local cache, lost on exit
#[derive(Debug, Default)]
pub struct MemoryIdentityCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryIdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl IdentityCache for MemoryIdentityCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| PersistError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| PersistError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| PersistError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}
