//! Wishlist: a set of saved products in the order they were saved.

use serde::{Deserialize, Serialize};

use crate::catalog::{ProductRecord, ProductView};
use crate::ids::ProductId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
}

impl From<&ProductRecord> for WishlistItem {
    fn from(p: &ProductRecord) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            brand: p.brand.clone(),
            price: p.price,
            image: p.image.clone(),
        }
    }
}

impl From<&ProductView> for WishlistItem {
    fn from(p: &ProductView) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            brand: p.brand.clone(),
            price: p.price,
            image: p.image.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    pub items: Vec<WishlistItem>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save an item. Returns `false` if its id was already saved.
    pub fn add_item(&mut self, item: WishlistItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Returns `false` if the id was not saved.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() != before
    }

    /// Add if absent, remove if present. Returns whether the item is now saved.
    pub fn toggle(&mut self, item: WishlistItem) -> bool {
        if self.remove_item(&item.id) {
            false
        } else {
            self.items.push(item);
            true
        }
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|i| &i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductType;

    fn item(id: &str) -> WishlistItem {
        WishlistItem::from(&ProductRecord::new(id, id, "Aura", 40.0, ProductType::Perfume))
    }

    #[test]
    fn test_set_semantics() {
        let mut list = Wishlist::new();
        assert!(list.add_item(item("a")));
        assert!(!list.add_item(item("a")));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut list = Wishlist::new();
        assert!(list.toggle(item("a")));
        assert!(list.contains(&ProductId::new("a")));
        assert!(!list.toggle(item("a")));
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut list = Wishlist::new();
        for id in ["a", "b", "c"] {
            list.add_item(item(id));
        }
        assert!(list.remove_item(&ProductId::new("b")));
        assert!(!list.remove_item(&ProductId::new("b")));

        let ids: Vec<&str> = list.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
