//! Client-side key/value storage, the desktop counterpart of a browser's `localStorage`.
//!
//! The REST client reads the auth token from here on every request. The UI seeds and persists
//! it through `eframe::Storage`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::warn;

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

pub trait TokenStorage: Send + Sync + std::fmt::Debug {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: String);

    fn remove(&self, key: &str);

    fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.set(TOKEN_KEY, token.into());
        storage
    }

    pub fn shared(self) -> Arc<dyn TokenStorage> {
        Arc::new(self)
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.inner.read() {
            Ok(map) => map.get(key).cloned(),
            Err(_) => {
                warn!("MemoryStorage: lock poisoned, treating {key} as absent");
                None
            }
        }
    }

    fn set(&self, key: &str, value: String) {
        match self.inner.write() {
            Ok(mut map) => {
                map.insert(key.to_owned(), value);
            }
            Err(_) => warn!("MemoryStorage: lock poisoned, dropping write to {key}"),
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.inner.write() {
            map.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_storage_has_no_token() {
        assert_eq!(MemoryStorage::new().token(), None);
    }

    #[test]
    fn token_round_trips_under_fixed_key() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "abc".to_owned());
        assert_eq!(storage.get("token").as_deref(), Some("abc"));
        assert_eq!(storage.token().as_deref(), Some("abc"));

        storage.remove(TOKEN_KEY);
        assert_eq!(storage.token(), None);
    }

    #[test]
    fn empty_token_counts_as_missing() {
        assert_eq!(MemoryStorage::with_token("").token(), None);
    }
}
