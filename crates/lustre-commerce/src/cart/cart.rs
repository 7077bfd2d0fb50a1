//! Cart and cart item types.

use serde::{Deserialize, Serialize};

use crate::catalog::{ProductRecord, ProductView};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// Maximum quantity allowed per cart item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 99;

/// Product projection captured when the shopper adds it to the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub quantity: i64,
}

impl CartItem {
    /// Unit price in cents.
    pub fn unit_price(&self) -> Money {
        Money::from_decimal(self.price)
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price()
            .checked_mul(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

impl From<&ProductRecord> for CartItem {
    fn from(p: &ProductRecord) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            brand: p.brand.clone(),
            price: p.price,
            image: p.image.clone(),
            quantity: 1,
        }
    }
}

impl From<&ProductView> for CartItem {
    fn from(p: &ProductView) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            brand: p.brand.clone(),
            price: p.price,
            image: p.image.clone(),
            quantity: 1,
        }
    }
}

/// A shopping cart, in the order items were first added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of an item.
    ///
    /// An id already in the cart has its quantity increased; the stored
    /// name, brand, price and image are kept. Fails if the quantity is not
    /// positive or the result would exceed [`MAX_QUANTITY_PER_ITEM`].
    pub fn add_item(&mut self, item: CartItem, quantity: i64) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            existing.quantity = new_quantity;
            return Ok(());
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        self.items.push(CartItem { quantity, ..item });
        Ok(())
    }

    /// Set an item's quantity. Zero or less removes it.
    ///
    /// Returns `false` if the id is not in the cart.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(id));
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        match self.items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove an item. Returns `false` if it was not in the cart.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.items.iter().try_fold(Money::zero(), |acc, item| {
            acc.checked_add(item.line_total()?)
                .ok_or(CommerceError::Overflow)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductType;

    fn lipstick() -> CartItem {
        let record = ProductRecord::new("lip-1", "Velvet Lip", "Rouge", 24.5, ProductType::Makeup);
        CartItem::from(&record)
    }

    fn mascara() -> CartItem {
        let record = ProductRecord::new("eye-1", "Lash Lift", "Rouge", 18.0, ProductType::Makeup);
        CartItem::from(&record)
    }

    #[test]
    fn test_add_same_id_increments() {
        let mut cart = Cart::new();
        cart.add_item(lipstick(), 1).unwrap();
        cart.add_item(lipstick(), 2).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[test]
    fn test_add_keeps_first_order() {
        let mut cart = Cart::new();
        cart.add_item(lipstick(), 1).unwrap();
        cart.add_item(mascara(), 1).unwrap();
        cart.add_item(lipstick(), 1).unwrap();

        let ids: Vec<&str> = cart.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["lip-1", "eye-1"]);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_quantity_limits() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add_item(lipstick(), 0),
            Err(CommerceError::InvalidQuantity(0))
        ));
        assert!(matches!(
            cart.add_item(lipstick(), 100),
            Err(CommerceError::QuantityExceedsLimit(100, 99))
        ));

        cart.add_item(lipstick(), 98).unwrap();
        assert!(cart.add_item(lipstick(), 2).is_err());
        assert_eq!(cart.items[0].quantity, 98);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add_item(lipstick(), 1).unwrap();
        let id = ProductId::new("lip-1");

        assert!(cart.update_quantity(&id, 5).unwrap());
        assert_eq!(cart.get(&id).unwrap().quantity, 5);

        assert!(cart.update_quantity(&id, 0).unwrap());
        assert!(cart.is_empty());

        assert!(!cart.update_quantity(&id, 2).unwrap());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(mascara(), 1).unwrap();
        assert!(!cart.remove_item(&ProductId::new("nope")));
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_subtotal() {
        let mut cart = Cart::new();
        cart.add_item(lipstick(), 2).unwrap();
        cart.add_item(mascara(), 1).unwrap();

        assert_eq!(cart.subtotal().unwrap(), Money::new(6700));
    }
}
