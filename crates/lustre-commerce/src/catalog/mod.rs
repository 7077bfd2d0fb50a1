//! Product catalog module.
//!
//! Contains the product record as the API returns it and the mapper that
//! flattens it for display.

mod attribute;
mod product;
mod view;

pub use attribute::{AttributeValue, CategoryAttributes};
pub use product::{MerchandisingFlags, ProductRecord, ProductType};
pub use view::{map_products, ProductShape, ProductView};
