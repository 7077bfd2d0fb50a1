//! Cart module.
//!
//! Contains the shopping cart, the wishlist, and the session stores that
//! persist them and notify subscribers.

mod cart;
mod store;
mod wishlist;

pub use cart::{Cart, CartItem, MAX_QUANTITY_PER_ITEM};
pub use store::{CartStore, CheckoutSummary, WishlistStore, CART_STORAGE_KEY, WISHLIST_STORAGE_KEY};
pub use wishlist::{Wishlist, WishlistItem};
