//! Plumbing shared by the cart and wishlist stores: change notification and
//! snapshot persistence.

use std::fmt;

#[cfg(feature = "storage")]
use serde::{de::DeserializeOwned, Serialize};

use crate::error::CommerceError;

/// Handle returned by [`Subscribers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn Fn(&T) + Send>;

/// Observers notified with the new snapshot after every state change.
pub struct Subscribers<T> {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback<T>)>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

impl<T> Subscribers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl Fn(&T) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sub, _)| *sub != id);
        self.callbacks.len() != before
    }

    /// Call every subscriber in subscription order.
    pub fn notify(&self, snapshot: &T) {
        for (_, callback) in &self.callbacks {
            callback(snapshot);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

/// Where a store keeps its snapshot between sessions.
pub trait Persist<T>: Send {
    /// The saved snapshot, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<T>, CommerceError>;

    fn save(&self, snapshot: &T) -> Result<(), CommerceError>;
}

/// Keeps nothing; every session starts empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPersist;

impl<T> Persist<T> for NoPersist {
    fn load(&self) -> Result<Option<T>, CommerceError> {
        Ok(None)
    }

    fn save(&self, _snapshot: &T) -> Result<(), CommerceError> {
        Ok(())
    }
}

/// Snapshot stored as JSON under one key of a [`lustre_cache::Cache`].
#[cfg(feature = "storage")]
#[derive(Debug, Clone)]
pub struct CachePersist {
    cache: lustre_cache::Cache,
    key: String,
}

#[cfg(feature = "storage")]
impl CachePersist {
    pub fn new(cache: lustre_cache::Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(feature = "storage")]
impl<T: Serialize + DeserializeOwned> Persist<T> for CachePersist {
    fn load(&self) -> Result<Option<T>, CommerceError> {
        Ok(self.cache.get(&self.key)?)
    }

    fn save(&self, snapshot: &T) -> Result<(), CommerceError> {
        Ok(self.cache.set(&self.key, snapshot)?)
    }
}

/// Restore a snapshot, falling back to the default when nothing is saved or
/// the saved copy is unreadable.
pub(crate) fn restore<T: Default>(backend: &dyn Persist<T>, what: &str) -> T {
    match backend.load() {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => T::default(),
        Err(error) => {
            tracing::warn!(store = what, %error, "discarding unreadable saved state");
            T::default()
        }
    }
}

/// Save a snapshot. Failures are logged and otherwise ignored.
pub(crate) fn save<T>(backend: &dyn Persist<T>, snapshot: &T, what: &str) {
    if let Err(error) = backend.save(snapshot) {
        tracing::warn!(store = what, %error, "failed to persist state");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_subscribe_notify_unsubscribe() {
        let mut subs: Subscribers<u32> = Subscribers::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let counter = seen.clone();
        let id = subs.subscribe(move |v| {
            counter.fetch_add(*v as usize, Ordering::SeqCst);
        });

        subs.notify(&3);
        assert_eq!(seen.load(Ordering::SeqCst), 3);

        assert!(subs.unsubscribe(id));
        assert!(!subs.unsubscribe(id));
        subs.notify(&3);
        assert_eq!(seen.load(Ordering::SeqCst), 3);
        assert!(subs.is_empty());
    }

    #[test]
    fn test_no_persist_loads_nothing() {
        let backend = NoPersist;
        let loaded: Option<Vec<u8>> = backend.load().unwrap();
        assert!(loaded.is_none());
        assert!(Persist::<Vec<u8>>::save(&backend, &vec![1]).is_ok());
    }

    #[cfg(feature = "storage")]
    #[test]
    fn test_cache_persist_round_trip() {
        let backend = CachePersist::new(lustre_cache::Cache::open_default(), "test:list");
        let empty: Option<Vec<String>> = backend.load().unwrap();
        assert!(empty.is_none());

        backend.save(&vec!["a".to_string()]).unwrap();
        let loaded: Option<Vec<String>> = backend.load().unwrap();
        assert_eq!(loaded, Some(vec!["a".to_string()]));
    }
}
