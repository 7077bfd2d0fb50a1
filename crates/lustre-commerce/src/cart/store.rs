//! Session stores for the cart and the wishlist.
//!
//! Each action mutates the in-memory state, persists the new snapshot, then
//! notifies subscribers with it. A persistence failure is logged and does
//! not undo the action.

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartItem, Wishlist, WishlistItem};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use crate::store::{self, NoPersist, Persist, SubscriptionId, Subscribers};

/// Storage key of the saved cart.
pub const CART_STORAGE_KEY: &str = "cart:guest";
/// Storage key of the saved wishlist.
pub const WISHLIST_STORAGE_KEY: &str = "wishlist:guest";

/// What was bought when checkout completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub items: Vec<CartItem>,
    pub item_count: i64,
    pub subtotal: Money,
}

pub struct CartStore {
    cart: Cart,
    backend: Box<dyn Persist<Cart>>,
    subscribers: Subscribers<Cart>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// An empty cart that is not saved anywhere.
    pub fn new() -> Self {
        Self::with_backend(NoPersist)
    }

    /// Restore the cart from `backend` and save every change back to it.
    pub fn with_backend(backend: impl Persist<Cart> + 'static) -> Self {
        let cart = store::restore(&backend, "cart");
        Self {
            cart,
            backend: Box::new(backend),
            subscribers: Subscribers::new(),
        }
    }

    /// Cart kept under [`CART_STORAGE_KEY`] in `cache`.
    #[cfg(feature = "storage")]
    pub fn open(cache: lustre_cache::Cache) -> Self {
        Self::with_backend(store::CachePersist::new(cache, CART_STORAGE_KEY))
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn subscribe(&mut self, callback: impl Fn(&Cart) + Send + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn add_item(&mut self, item: CartItem, quantity: i64) -> Result<(), CommerceError> {
        self.cart.add_item(item, quantity)?;
        self.commit();
        Ok(())
    }

    /// No-op when the id is not in the cart.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let removed = self.cart.remove_item(id);
        if removed {
            self.commit();
        }
        removed
    }

    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<bool, CommerceError> {
        let changed = self.cart.update_quantity(id, quantity)?;
        if changed {
            self.commit();
        }
        Ok(changed)
    }

    pub fn clear(&mut self) {
        self.cart.clear();
        self.commit();
    }

    /// Empty the cart and return what was in it.
    pub fn complete_checkout(&mut self) -> Result<CheckoutSummary, CommerceError> {
        if self.cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        let summary = CheckoutSummary {
            item_count: self.cart.item_count(),
            subtotal: self.cart.subtotal()?,
            items: std::mem::take(&mut self.cart.items),
        };
        tracing::debug!(
            items = summary.item_count,
            subtotal = %summary.subtotal,
            "checkout completed"
        );
        self.commit();
        Ok(summary)
    }

    fn commit(&mut self) {
        store::save(self.backend.as_ref(), &self.cart, "cart");
        self.subscribers.notify(&self.cart);
    }
}

pub struct WishlistStore {
    wishlist: Wishlist,
    backend: Box<dyn Persist<Wishlist>>,
    subscribers: Subscribers<Wishlist>,
}

impl std::fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistStore")
            .field("wishlist", &self.wishlist)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}

impl Default for WishlistStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WishlistStore {
    pub fn new() -> Self {
        Self::with_backend(NoPersist)
    }

    pub fn with_backend(backend: impl Persist<Wishlist> + 'static) -> Self {
        let wishlist = store::restore(&backend, "wishlist");
        Self {
            wishlist,
            backend: Box::new(backend),
            subscribers: Subscribers::new(),
        }
    }

    #[cfg(feature = "storage")]
    pub fn open(cache: lustre_cache::Cache) -> Self {
        Self::with_backend(store::CachePersist::new(cache, WISHLIST_STORAGE_KEY))
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn subscribe(&mut self, callback: impl Fn(&Wishlist) + Send + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// No-op when the id is already saved.
    pub fn add_item(&mut self, item: WishlistItem) -> bool {
        let added = self.wishlist.add_item(item);
        if added {
            self.commit();
        }
        added
    }

    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let removed = self.wishlist.remove_item(id);
        if removed {
            self.commit();
        }
        removed
    }

    pub fn toggle(&mut self, item: WishlistItem) -> bool {
        let saved = self.wishlist.toggle(item);
        self.commit();
        saved
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.wishlist.contains(id)
    }

    fn commit(&mut self) {
        store::save(self.backend.as_ref(), &self.wishlist, "wishlist");
        self.subscribers.notify(&self.wishlist);
    }
}
