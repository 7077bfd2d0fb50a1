//! Collection responses and the pagination descriptor.

use serde::{Deserialize, Serialize};

use crate::catalog::ProductRecord;
use crate::error::CommerceError;

/// Pagination descriptor for one fetched page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPageInfo", rename_all = "camelCase")]
pub struct PageInfo {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub limit: u32,
    /// Total number of items across all pages.
    pub total: u32,
    /// Total number of pages.
    pub total_pages: u32,
    /// Whether another page can be requested.
    pub has_next_page: bool,
}

impl PageInfo {
    /// Derive pagination from page, page size and total.
    pub fn new(page: u32, limit: u32, total: u32) -> Self {
        let page = page.max(1);
        let total_pages = if total == 0 || limit == 0 {
            1
        } else {
            total.div_ceil(limit)
        };

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next_page: page < total_pages,
        }
    }

    /// A single page holding `count` items.
    pub fn single(count: u32) -> Self {
        Self::new(1, count, count)
    }

    /// 1-indexed number of the first item on this page; 0 when empty.
    pub fn start_item(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            self.page
                .saturating_sub(1)
                .saturating_mul(self.limit)
                .saturating_add(1)
                .min(self.total)
        }
    }

    /// 1-indexed number of the last item on this page.
    pub fn end_item(&self) -> u32 {
        self.page.saturating_mul(self.limit).min(self.total)
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::single(0)
    }
}

/// Wire form; every field is optional and `hasNextPage` wins when present.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPageInfo {
    page: Option<u32>,
    #[serde(alias = "perPage")]
    limit: Option<u32>,
    total: Option<u32>,
    total_pages: Option<u32>,
    has_next_page: Option<bool>,
}

impl From<RawPageInfo> for PageInfo {
    fn from(raw: RawPageInfo) -> Self {
        let page = raw.page.unwrap_or(1).max(1);
        let limit = raw.limit.unwrap_or(0);
        let total = raw.total.unwrap_or(0);
        let mut info = PageInfo::new(page, limit, total);
        if let Some(total_pages) = raw.total_pages {
            info.total_pages = total_pages.max(1);
            info.has_next_page = page < info.total_pages;
        }
        if let Some(has_next) = raw.has_next_page {
            info.has_next_page = has_next;
        }
        info
    }
}

/// One page of products as returned by the collection endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProductPage {
    /// Records in server order.
    pub products: Vec<ProductRecord>,
    pub pagination: PageInfo,
    /// Records dropped because they failed to decode or validate.
    #[serde(skip)]
    pub skipped: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBody {
    Page {
        #[serde(alias = "records", alias = "data", alias = "items")]
        products: Vec<serde_json::Value>,
        #[serde(default)]
        pagination: Option<PageInfo>,
    },
    List(Vec<serde_json::Value>),
}

impl ProductPage {
    pub fn new(products: Vec<ProductRecord>, pagination: PageInfo) -> Self {
        Self {
            products,
            pagination,
            skipped: 0,
        }
    }

    /// Decode a collection response body.
    ///
    /// Accepts `{"products": [...], "pagination": {...}}` (also under
    /// `records`, `data` or `items`) or a bare array. A record that fails to
    /// decode or validate is skipped and logged; the rest of the page is
    /// kept. Only a body that is not a collection at all is an error.
    pub fn from_json(body: &[u8]) -> Result<Self, CommerceError> {
        let (raw_products, pagination) = match serde_json::from_slice::<RawBody>(body)? {
            RawBody::Page {
                products,
                pagination,
            } => (products, pagination),
            RawBody::List(products) => (products, None),
        };

        let mut products = Vec::with_capacity(raw_products.len());
        let mut skipped = 0;
        for (index, value) in raw_products.into_iter().enumerate() {
            match decode_record(value) {
                Ok(record) => products.push(record),
                Err(error) => {
                    skipped += 1;
                    tracing::warn!(index, %error, "skipping malformed product record");
                }
            }
        }

        let pagination = pagination.unwrap_or_else(|| PageInfo::single(products.len() as u32));
        Ok(Self {
            products,
            pagination,
            skipped,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }
}

fn decode_record(value: serde_json::Value) -> Result<ProductRecord, CommerceError> {
    let record: ProductRecord = serde_json::from_value(value)?;
    record.validate()?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_info_basics() {
        let p = PageInfo::new(2, 10, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next_page);
        assert_eq!(p.start_item(), 11);
        assert_eq!(p.end_item(), 20);

        let last = PageInfo::new(5, 10, 45);
        assert!(!last.has_next_page);
        assert_eq!(last.end_item(), 45);
    }

    #[test]
    fn test_page_info_empty() {
        let p = PageInfo::single(0);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next_page);
        assert_eq!(p.start_item(), 0);
    }

    #[test]
    fn test_page_info_huge_values_saturate() {
        let p: PageInfo = serde_json::from_str(
            r#"{"page":4294967295,"limit":100000,"total":500,"hasNextPage":true}"#,
        )
        .unwrap();
        assert_eq!(p.start_item(), 500);
        assert_eq!(p.end_item(), 500);
    }

    #[test]
    fn test_page_info_wire_has_next_wins() {
        let p: PageInfo =
            serde_json::from_str(r#"{"page":1,"limit":20,"total":20,"hasNextPage":true}"#).unwrap();
        assert!(p.has_next_page);

        let p: PageInfo = serde_json::from_str(r#"{"page":2,"totalPages":3}"#).unwrap();
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next_page);
    }

    #[test]
    fn test_decode_page_keeps_server_order() {
        let body = br#"{
            "products": [
                {"id":"b","name":"B","brand":"X","price":2,"productType":"hair"},
                {"id":"a","name":"A","brand":"X","price":1,"productType":"hair"}
            ],
            "pagination": {"page":1,"limit":2,"total":4,"totalPages":2,"hasNextPage":true}
        }"#;
        let page = ProductPage::from_json(body).unwrap();
        let ids: Vec<&str> = page.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(page.pagination.has_next_page);
        assert_eq!(page.skipped, 0);
    }

    #[test]
    fn test_decode_skips_malformed_records() {
        let body = br#"{"records": [
            {"id":"ok","name":"Fine","brand":"X","price":5,"productType":"makeup"},
            {"id":"no-brand","name":"Broken","price":5,"productType":"makeup"},
            {"id":"neg","name":"Negative","brand":"X","price":-3,"productType":"makeup"},
            "not an object"
        ]}"#;
        let page = ProductPage::from_json(body).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.products[0].id.as_str(), "ok");
        assert_eq!(page.skipped, 3);
        assert!(!page.pagination.has_next_page);
    }

    #[test]
    fn test_decode_bare_array_and_empty() {
        let page = ProductPage::from_json(b"[]").unwrap();
        assert!(page.is_empty());

        let page = ProductPage::from_json(br#"{"products": []}"#).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_decode_rejects_non_collection() {
        assert!(ProductPage::from_json(br#"{"error":"boom"}"#).is_err());
        assert!(ProductPage::from_json(b"<html>").is_err());
    }
}
