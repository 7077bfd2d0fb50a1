//! Storefront domain types and client-side logic for Lustre.
//!
//! This crate holds everything a storefront decides without talking to the
//! network:
//!
//! - **Catalog**: product records as the API sends them, and the flattened
//!   view shape cards render
//! - **Listing**: client-side sort and the show-more truncation
//! - **Search**: collection queries, pagination, lenient page decoding
//! - **Cart**: cart and wishlist with persisted, observable stores
//!
//! # Example
//!
//! ```rust,ignore
//! use lustre_commerce::prelude::*;
//!
//! let page = ProductPage::from_json(&body)?;
//! let mut listing = Listing::new(map_products(&page.products));
//! listing.set_sort(SortKey::Rating);
//!
//! for product in listing.visible() {
//!     println!("{} {}", product.name, product.price);
//! }
//!
//! let mut cart = CartStore::new();
//! cart.add_item(CartItem::from(&page.products[0]), 1)?;
//! println!("Subtotal: {}", cart.cart().subtotal()?);
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod store;

pub mod cart;
pub mod catalog;
pub mod listing;
pub mod search;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{
        map_products, AttributeValue, CategoryAttributes, MerchandisingFlags, ProductRecord,
        ProductShape, ProductType, ProductView,
    };

    // Listing
    pub use crate::listing::{Listing, SortKey, Sortable, DEFAULT_VISIBLE};

    // Search
    pub use crate::search::{PageInfo, ProductPage, ProductQuery};

    // Cart
    pub use crate::cart::{
        Cart, CartItem, CartStore, CheckoutSummary, Wishlist, WishlistItem, WishlistStore,
        MAX_QUANTITY_PER_ITEM,
    };

    // Stores
    pub use crate::store::{NoPersist, Persist, SubscriptionId, Subscribers};
    #[cfg(feature = "storage")]
    pub use crate::store::CachePersist;
}
