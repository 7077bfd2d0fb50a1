//! Client-side sort orders for product listings.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{ProductRecord, ProductView};
use crate::error::CommerceError;

/// Sort options offered on listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Keep the order the server returned.
    #[default]
    Featured,
    #[serde(rename = "price-asc")]
    PriceLowToHigh,
    #[serde(rename = "price-desc")]
    PriceHighToLow,
    /// Highest rated first.
    Rating,
    /// Most reviewed first.
    Reviews,
    /// New arrivals first, otherwise fetch order.
    Newest,
    /// Trending first, otherwise fetch order.
    Trending,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Featured,
        SortKey::PriceLowToHigh,
        SortKey::PriceHighToLow,
        SortKey::Rating,
        SortKey::Reviews,
        SortKey::Newest,
        SortKey::Trending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceLowToHigh => "price-asc",
            SortKey::PriceHighToLow => "price-desc",
            SortKey::Rating => "rating",
            SortKey::Reviews => "reviews",
            SortKey::Newest => "newest",
            SortKey::Trending => "trending",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::PriceLowToHigh => "Price: Low to High",
            SortKey::PriceHighToLow => "Price: High to Low",
            SortKey::Rating => "Rating",
            SortKey::Reviews => "Reviews",
            SortKey::Newest => "Newest",
            SortKey::Trending => "Trending",
        }
    }

    /// Compare two items under this key. `Equal` means "keep fetch order".
    pub fn compare<T: Sortable + ?Sized>(&self, a: &T, b: &T) -> Ordering {
        match self {
            SortKey::Featured => Ordering::Equal,
            SortKey::PriceLowToHigh => a.price().total_cmp(&b.price()),
            SortKey::PriceHighToLow => b.price().total_cmp(&a.price()),
            SortKey::Rating => b.rating().total_cmp(&a.rating()),
            SortKey::Reviews => b.review_count().cmp(&a.review_count()),
            // true sorts before false
            SortKey::Newest => b.is_new().cmp(&a.is_new()),
            SortKey::Trending => b.is_trending().cmp(&a.is_trending()),
        }
    }

    /// Stable in-place sort: ties keep their relative order.
    pub fn sort<T: Sortable>(&self, items: &mut [T]) {
        if *self == SortKey::Featured {
            return;
        }
        items.sort_by(|a, b| self.compare(a, b));
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for SortKey {
    type Err = CommerceError;

    /// Accepts wire names (`price-asc`) and display names (`Price: Low to High`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        SortKey::ALL
            .into_iter()
            .find(|k| {
                k.as_str().eq_ignore_ascii_case(needle)
                    || k.display_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| CommerceError::Validation(format!("unknown sort key '{}'", needle)))
    }
}

/// Fields the listing sorts on.
pub trait Sortable {
    fn price(&self) -> f64;
    fn rating(&self) -> f64;
    fn review_count(&self) -> u32;
    fn is_new(&self) -> bool;
    fn is_trending(&self) -> bool;
}

impl Sortable for ProductRecord {
    fn price(&self) -> f64 {
        self.price
    }
    fn rating(&self) -> f64 {
        self.rating
    }
    fn review_count(&self) -> u32 {
        self.review_count
    }
    fn is_new(&self) -> bool {
        self.flags.is_new
    }
    fn is_trending(&self) -> bool {
        self.flags.is_trending
    }
}

impl Sortable for ProductView {
    fn price(&self) -> f64 {
        self.price
    }
    fn rating(&self) -> f64 {
        self.rating
    }
    fn review_count(&self) -> u32 {
        self.review_count
    }
    fn is_new(&self) -> bool {
        self.flags.is_new
    }
    fn is_trending(&self) -> bool {
        self.flags.is_trending
    }
}
