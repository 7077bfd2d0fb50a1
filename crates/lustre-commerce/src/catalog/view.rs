//! Mapping from product records to the flattened shape cards and detail
//! views render.
//!
//! Every list-valued attribute is reduced to its first element; an empty list
//! becomes absent. The reduction is lossy and always takes index 0. The view
//! serializes to JSON that is itself a valid [`ProductRecord`], and mapping a
//! view again returns it unchanged.

use serde::{Deserialize, Serialize};

use crate::catalog::{AttributeValue, MerchandisingFlags, ProductRecord, ProductType};
use crate::ids::ProductId;

/// View-ready product with scalar attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    pub in_stock: bool,
    #[serde(flatten)]
    pub flags: MerchandisingFlags,
    pub category: String,
    pub product_type: ProductType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_concern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub rating: f64,
    pub review_count: u32,
}

/// Anything that can be mapped to a [`ProductView`].
pub trait ProductShape {
    fn to_view(&self) -> ProductView;
}

impl ProductShape for ProductRecord {
    fn to_view(&self) -> ProductView {
        let attrs = &self.attributes;
        ProductView {
            id: self.id.clone(),
            name: self.name.clone(),
            brand: self.brand.clone(),
            description: self.description.clone(),
            price: self.price,
            original_price: self.original_price,
            discount: self.discount,
            in_stock: self.in_stock,
            flags: self.flags,
            category: self.category.clone(),
            product_type: self.product_type,
            skin_type: scalar(&attrs.skin_type),
            season: scalar(&attrs.season),
            hair_type: scalar(&attrs.hair_type),
            hair_concern: scalar(&attrs.hair_concern),
            skin_tone: scalar(&attrs.skin_tone),
            finish: scalar(&attrs.finish),
            image: self.image.clone(),
            images: self.images.clone(),
            rating: self.rating,
            review_count: self.review_count,
        }
    }
}

impl ProductShape for ProductView {
    fn to_view(&self) -> ProductView {
        self.clone()
    }
}

impl From<&ProductRecord> for ProductView {
    fn from(record: &ProductRecord) -> Self {
        record.to_view()
    }
}

fn scalar(value: &Option<AttributeValue>) -> Option<String> {
    value.as_ref().and_then(|v| v.first()).map(str::to_string)
}

/// Map a slice of records, preserving order.
pub fn map_products<P: ProductShape>(items: &[P]) -> Vec<ProductView> {
    items.iter().map(ProductShape::to_view).collect()
}

impl ProductView {
    /// Labels for the badges shown on a product card.
    pub fn badges(&self) -> Vec<&'static str> {
        self.flags.labels()
    }

    /// First non-empty image: the main image, then the gallery.
    pub fn primary_image(&self) -> Option<&str> {
        std::iter::once(self.image.as_str())
            .chain(self.images.iter().map(String::as_str))
            .find(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CategoryAttributes;

    fn serum() -> ProductRecord {
        let mut record =
            ProductRecord::new("sk-1", "Hydra Serum", "Lumen", 32.0, ProductType::Skincare);
        record.attributes = CategoryAttributes {
            skin_type: Some(AttributeValue::from(vec!["Oily", "Dry"])),
            season: Some(AttributeValue::Many(Vec::new())),
            finish: Some(AttributeValue::from("Dewy")),
            ..Default::default()
        };
        record.flags.is_new = true;
        record
    }

    #[test]
    fn test_list_attribute_takes_first() {
        let view = serum().to_view();
        assert_eq!(view.skin_type.as_deref(), Some("Oily"));
    }

    #[test]
    fn test_empty_list_becomes_absent() {
        let view = serum().to_view();
        assert_eq!(view.season, None);
        assert_eq!(view.hair_type, None);
    }

    #[test]
    fn test_scalar_passes_through() {
        let view = serum().to_view();
        assert_eq!(view.finish.as_deref(), Some("Dewy"));
        assert!(view.flags.is_new);
        assert_eq!(view.price, 32.0);
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let once = serum().to_view();
        let twice = once.to_view();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_view_json_is_a_valid_record() {
        let once = serum().to_view();
        let json = serde_json::to_string(&once).unwrap();

        let reparsed: ProductRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(reparsed.to_view(), once);
    }

    #[test]
    fn test_map_products_preserves_order() {
        let a = ProductRecord::new("a", "A", "B", 1.0, ProductType::Hair);
        let b = ProductRecord::new("b", "B", "B", 2.0, ProductType::Hair);
        let views = map_products(&[a, b]);
        let ids: Vec<&str> = views.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_primary_image_falls_back_to_gallery() {
        let mut record = serum();
        record.images = vec!["".into(), "side.jpg".into()];
        assert_eq!(record.to_view().primary_image(), Some("side.jpg"));

        record.image = "front.jpg".into();
        assert_eq!(record.to_view().primary_image(), Some("front.jpg"));
    }
}
