//! Product collection query builder.

use serde::{Deserialize, Serialize};

use crate::catalog::ProductType;
use crate::search::PageInfo;

/// Largest page size a client may request.
pub const MAX_LIMIT: u32 = 100;

/// Parameters for a product collection request.
///
/// Equality is structural, so a retry can be checked to re-issue the
/// identical request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Free-text filter.
    pub query: Option<String>,
    /// Maximum record count.
    pub limit: Option<u32>,
    /// Page to fetch (1-indexed).
    pub page: Option<u32>,
    /// Category slug filter.
    pub category: Option<String>,
    /// Product line filter.
    pub product_type: Option<ProductType>,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text filter. Blank text clears it.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        let q = q.trim();
        self.query = (!q.is_empty()).then(|| q.to_string());
        self
    }

    /// Set the page size, clamped to `1..=MAX_LIMIT`.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.clamp(1, MAX_LIMIT));
        self
    }

    /// Set the page (1-indexed).
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page.max(1));
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = (!category.trim().is_empty()).then_some(category);
        self
    }

    pub fn with_product_type(mut self, product_type: ProductType) -> Self {
        self.product_type = Some(product_type);
        self
    }

    /// The free-text filter, if any.
    pub fn text(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The query for the page after `info`, if the server reported one.
    pub fn next_page(&self, info: &PageInfo) -> Option<ProductQuery> {
        if !info.has_next_page {
            return None;
        }
        let page = info.page.checked_add(1)?;
        Some(self.clone().with_page(page))
    }

    /// Query-string parameters in a fixed order.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(q) = &self.query {
            pairs.push(("q".to_string(), q.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category".to_string(), category.clone()));
        }
        if let Some(product_type) = self.product_type {
            pairs.push(("productType".to_string(), product_type.as_str().to_string()));
        }
        pairs
    }

    /// Stable key identifying this query, e.g. for logging.
    pub fn cache_key(&self) -> String {
        format!(
            "products:{}:{}:{}:{}:{}",
            self.query
                .as_deref()
                .map(|q| q.to_lowercase().replace(' ', "_"))
                .unwrap_or_else(|| "*".to_string()),
            self.category.as_deref().unwrap_or("all"),
            self.product_type.map(|t| t.as_str()).unwrap_or("all"),
            self.page.unwrap_or(1),
            self.limit.map(|l| l.to_string()).unwrap_or_else(|| "default".to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let query = ProductQuery::new()
            .with_query("  red lipstick ")
            .with_limit(500)
            .with_page(0)
            .with_product_type(ProductType::Makeup);

        assert_eq!(query.text(), Some("red lipstick"));
        assert_eq!(query.limit, Some(MAX_LIMIT));
        assert_eq!(query.page, Some(1));
    }

    #[test]
    fn test_blank_query_is_none() {
        let query = ProductQuery::new().with_query("   ");
        assert_eq!(query.text(), None);
        assert!(query.to_query_pairs().is_empty());
    }

    #[test]
    fn test_query_pairs_order() {
        let query = ProductQuery::new()
            .with_category("lips")
            .with_query("gloss")
            .with_page(2)
            .with_limit(20)
            .with_product_type(ProductType::Perfume);

        let keys: Vec<String> = query.to_query_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["limit", "page", "q", "category", "productType"]);
        assert_eq!(query.to_query_pairs()[4].1, "perfume");
    }

    #[test]
    fn test_next_page() {
        let query = ProductQuery::new().with_limit(10);
        let info = PageInfo::new(1, 10, 25);
        let next = query.next_page(&info).unwrap();
        assert_eq!(next.page, Some(2));
        assert_eq!(next.limit, Some(10));

        let last = PageInfo::new(3, 10, 25);
        assert_eq!(query.next_page(&last), None);
    }

    #[test]
    fn test_next_page_at_max_page() {
        let info: PageInfo =
            serde_json::from_str(r#"{"page":4294967295,"limit":100000,"hasNextPage":true}"#)
                .unwrap();
        assert!(info.has_next_page);
        assert_eq!(ProductQuery::new().next_page(&info), None);
    }

    #[test]
    fn test_cache_key() {
        let query = ProductQuery::new().with_query("Rose Oil").with_page(2);
        assert_eq!(query.cache_key(), "products:rose_oil:all:all:2:default");
    }
}
