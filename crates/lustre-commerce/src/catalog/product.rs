//! The product record returned by the catalog API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::CategoryAttributes;
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Top-level product line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Makeup,
    Skincare,
    #[serde(alias = "fragrance")]
    Perfume,
    #[serde(alias = "haircare")]
    Hair,
}

impl ProductType {
    pub const ALL: [ProductType; 4] = [
        ProductType::Makeup,
        ProductType::Skincare,
        ProductType::Perfume,
        ProductType::Hair,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Makeup => "makeup",
            ProductType::Skincare => "skincare",
            ProductType::Perfume => "perfume",
            ProductType::Hair => "hair",
        }
    }

    /// Storefront section title for this product line.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductType::Makeup => "Makeup",
            ProductType::Skincare => "Skincare",
            ProductType::Perfume => "Fragrance",
            ProductType::Hair => "Haircare",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "makeup" => Ok(ProductType::Makeup),
            "skincare" => Ok(ProductType::Skincare),
            "perfume" | "fragrance" => Ok(ProductType::Perfume),
            "hair" | "haircare" => Ok(ProductType::Hair),
            other => Err(CommerceError::Validation(format!(
                "unknown product type '{}'",
                other
            ))),
        }
    }
}

/// Independent merchandising flags. Any combination is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MerchandisingFlags {
    pub is_new: bool,
    pub is_sale: bool,
    pub is_trending: bool,
    pub luxury: bool,
    pub cruelty_free: bool,
    pub vegan: bool,
    pub clean_beauty: bool,
    pub dermatologist_recommended: bool,
    pub salon_professional: bool,
    pub long_lasting: bool,
}

impl MerchandisingFlags {
    /// Human-readable labels for every set flag, in a fixed order.
    pub fn labels(&self) -> Vec<&'static str> {
        [
            (self.is_new, "New"),
            (self.is_sale, "Sale"),
            (self.is_trending, "Trending"),
            (self.luxury, "Luxury"),
            (self.cruelty_free, "Cruelty-Free"),
            (self.vegan, "Vegan"),
            (self.clean_beauty, "Clean Beauty"),
            (self.dermatologist_recommended, "Dermatologist Recommended"),
            (self.salon_professional, "Salon Professional"),
            (self.long_lasting, "Long-Lasting"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect()
    }
}

fn default_in_stock() -> bool {
    true
}

/// A product as returned by the catalog API.
///
/// Read-only on the client. Required fields are `id`, `name`, `brand`,
/// `price` and `productType`; everything else has an explicit default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub price: f64,
    /// Pre-discount price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Discount percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,

    #[serde(flatten)]
    pub flags: MerchandisingFlags,

    #[serde(default)]
    pub category: String,
    pub product_type: ProductType,
    #[serde(flatten)]
    pub attributes: CategoryAttributes,

    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
}

impl ProductRecord {
    /// Create a record with the required fields; everything else defaulted.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        brand: impl Into<String>,
        price: f64,
        product_type: ProductType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: brand.into(),
            description: None,
            price,
            original_price: None,
            discount: None,
            in_stock: true,
            flags: MerchandisingFlags::default(),
            category: String::new(),
            product_type,
            attributes: CategoryAttributes::default(),
            image: String::new(),
            images: Vec::new(),
            rating: 0.0,
            review_count: 0,
        }
    }

    /// Reject records whose numbers cannot be displayed or sorted sensibly.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.id.as_str().trim().is_empty() {
            return Err(CommerceError::Validation("empty product id".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(CommerceError::Validation(format!(
                "product {} has an empty name",
                self.id
            )));
        }
        check_amount(&self.id, "price", self.price)?;
        if let Some(original) = self.original_price {
            check_amount(&self.id, "originalPrice", original)?;
        }
        check_amount(&self.id, "rating", self.rating)?;
        Ok(())
    }

    /// On sale when flagged, or when the original price is above the price.
    pub fn is_on_sale(&self) -> bool {
        self.flags.is_sale
            || self
                .original_price
                .map(|original| original > self.price)
                .unwrap_or(false)
    }

    /// Discount percentage: the API value, else derived from the original price.
    pub fn discount_percentage(&self) -> Option<f64> {
        self.discount.or_else(|| {
            self.original_price.and_then(|original| {
                if original > self.price && original > 0.0 {
                    Some((original - self.price) / original * 100.0)
                } else {
                    None
                }
            })
        })
    }
}

fn check_amount(id: &ProductId, field: &str, value: f64) -> Result<(), CommerceError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CommerceError::Validation(format!(
            "product {} has invalid {}: {}",
            id, field, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AttributeValue;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": "sk-12",
            "name": "Hydra Serum",
            "brand": "Lumen",
            "price": 32.5,
            "originalPrice": 40,
            "inStock": false,
            "isNew": true,
            "vegan": true,
            "category": "serums",
            "productType": "skincare",
            "skinType": ["Oily", "Dry"],
            "finish": "Dewy",
            "image": "serum.jpg",
            "rating": 4.6,
            "reviewCount": 312,
            "somethingElse": 1
        }"#;

        let record: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_str(), "sk-12");
        assert_eq!(record.original_price, Some(40.0));
        assert!(!record.in_stock);
        assert!(record.flags.is_new && record.flags.vegan);
        assert!(!record.flags.luxury);
        assert_eq!(record.product_type, ProductType::Skincare);
        assert_eq!(
            record.attributes.skin_type,
            Some(AttributeValue::Many(vec!["Oily".into(), "Dry".into()]))
        );
        assert_eq!(record.attributes.finish, Some(AttributeValue::One("Dewy".into())));
        assert_eq!(record.review_count, 312);
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let json = r#"{"id":"m1","name":"Lip Tint","brand":"Rosa","price":9,"productType":"makeup"}"#;
        let record: ProductRecord = serde_json::from_str(json).unwrap();

        assert!(record.in_stock);
        assert_eq!(record.description, None);
        assert_eq!(record.flags, MerchandisingFlags::default());
        assert!(record.images.is_empty());
        assert_eq!(record.rating, 0.0);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let json = r#"{"id":"m1","name":"Lip Tint","price":9,"productType":"makeup"}"#;
        assert!(serde_json::from_str::<ProductRecord>(json).is_err());
    }

    #[test]
    fn test_product_type_aliases() {
        let t: ProductType = serde_json::from_str(r#""fragrance""#).unwrap();
        assert_eq!(t, ProductType::Perfume);
        assert_eq!("Haircare".parse::<ProductType>().unwrap(), ProductType::Hair);
        assert!("shoes".parse::<ProductType>().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let mut record = ProductRecord::new("x", "X", "B", -1.0, ProductType::Makeup);
        assert!(record.validate().is_err());

        record.price = f64::NAN;
        assert!(record.validate().is_err());

        record.price = 0.0;
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_discount_percentage() {
        let mut record = ProductRecord::new("x", "X", "B", 30.0, ProductType::Perfume);
        assert_eq!(record.discount_percentage(), None);
        assert!(!record.is_on_sale());

        record.original_price = Some(40.0);
        assert!(record.is_on_sale());
        assert!((record.discount_percentage().unwrap() - 25.0).abs() < 1e-9);

        record.discount = Some(10.0);
        assert_eq!(record.discount_percentage(), Some(10.0));
    }

    #[test]
    fn test_flag_labels() {
        let flags = MerchandisingFlags {
            is_trending: true,
            vegan: true,
            ..Default::default()
        };
        assert_eq!(flags.labels(), vec!["Trending", "Vegan"]);
    }
}
