//! Async storefront services for Lustre.
//!
//! Everything here talks to the network or runs on the clock:
//!
//! - **Source**: [`ProductSource`] and its HTTP implementation
//! - **Feed**: page-level fetch state with retry and load-more
//! - **Search**: last-query-wins search observed through a `watch` channel
//! - **Timers**: cancellable timers, the carousel, and toasts
//! - **Images**: resolving product image identifiers to URLs
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lustre_storefront::prelude::*;
//!
//! let client = FetchClient::new().with_base_url("https://api.lustre.shop");
//! let source = Arc::new(HttpProductSource::new(client));
//!
//! let mut feed = ProductFeed::new(source.clone());
//! if let FetchState::Ready(page) = feed.load(ProductQuery::new().with_limit(20)).await {
//!     println!("{} products", page.len());
//! }
//!
//! let mut search = SearchPipeline::new(source, vec!["Serum".into()]);
//! search.submit("rose");
//! let state = search.settled().await;
//! ```

pub mod carousel;
pub mod failure;
pub mod feed;
pub mod images;
pub mod search;
pub mod source;
pub mod timer;
pub mod toast;

pub use carousel::Carousel;
pub use failure::FetchFailure;
pub use feed::{FetchState, ProductFeed};
pub use images::{CdnImageResolver, ImageResolver};
pub use search::{SearchPipeline, SearchState, SearchView};
pub use source::{get_products, HttpProductSource, ProductSource};
pub use timer::CancellableTimer;
pub use toast::{Toast, ToastId, ToastKind, Toaster};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Carousel, CancellableTimer, CdnImageResolver, FetchFailure, FetchState,
        HttpProductSource, ImageResolver, ProductFeed, ProductSource, SearchPipeline,
        SearchState, SearchView, Toaster,
    };
    pub use lustre_commerce::prelude::*;
    pub use lustre_data::{FetchClient, FetchError, TimeoutConfig};
}
