//! Type-safe key-value storage for persisted storefront state.
//!
//! Provides a simple, ergonomic API for keeping small JSON snapshots (cart,
//! wishlist) across sessions, either in memory or in a directory on disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use lustre_cache::Cache;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Wishlist {
//!     ids: Vec<String>,
//! }
//!
//! let cache = Cache::open("/tmp/lustre")?;
//!
//! // Store a value
//! cache.set("wishlist:guest", &wishlist)?;
//!
//! // Retrieve a value
//! let wishlist: Option<Wishlist> = cache.get("wishlist:guest")?;
//!
//! // Delete a value
//! cache.delete("wishlist:guest")?;
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
