//! Key-Value store wrapper with automatic serialization.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::store::{FileStore, KeyValueStore, MemoryStore};
use crate::CacheError;

/// Type-safe cache over a [`KeyValueStore`] backend.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Clones share the same backend.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

impl Cache {
    /// Open an in-memory cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open_default();
    /// ```
    pub fn open_default() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Open a cache persisted in `dir`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open("~/.local/share/lustre")?;
    /// ```
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        Ok(Self::with_store(FileStore::open(dir)?))
    }

    /// Wrap an arbitrary backend.
    pub fn with_store(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Cart> = cache.get("cart:guest")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("cart:guest", &cart)?;
    /// ```
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        ids: Vec<String>,
    }

    #[test]
    fn test_typed_roundtrip() {
        let cache = Cache::open_default();
        let snap = Snapshot {
            ids: vec!["p1".to_string()],
        };
        cache.set("wishlist", &snap).unwrap();

        let loaded: Option<Snapshot> = cache.get("wishlist").unwrap();
        assert_eq!(loaded, Some(snap));
    }

    #[test]
    fn test_get_wrong_shape_is_error() {
        let cache = Cache::open_default();
        cache.set("wishlist", &42).unwrap();

        let loaded: Result<Option<Snapshot>, _> = cache.get("wishlist");
        assert!(matches!(loaded, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_clones_share_backend() {
        let cache = Cache::open_default();
        let other = cache.clone();
        cache.set("k", &"v").unwrap();
        assert!(other.exists("k").unwrap());
    }
}
