//! In-memory product source shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use lustre_commerce::prelude::*;
use lustre_data::FetchError;
use lustre_storefront::ProductSource;

pub fn product(id: &str, name: &str, price: f64, rating: f64) -> ProductRecord {
    let mut record = ProductRecord::new(id, name, "Lustre", price, ProductType::Makeup);
    record.rating = rating;
    record
}

/// Serves a fixed catalog, filtered by name and paginated by `limit`/`page`.
#[derive(Default)]
pub struct MemorySource {
    catalog: Vec<ProductRecord>,
    delays: HashMap<String, Duration>,
    failures_left: AtomicUsize,
    calls: Mutex<Vec<ProductQuery>>,
}

impl MemorySource {
    pub fn new(catalog: Vec<ProductRecord>) -> Self {
        Self {
            catalog,
            ..Default::default()
        }
    }

    /// Delay responses for queries with this exact text.
    pub fn with_delay(mut self, text: &str, delay: Duration) -> Self {
        self.delays.insert(text.to_string(), delay);
        self
    }

    /// Fail the next `n` list requests with a network error.
    pub fn fail_next(&self, n: usize) {
        self.failures_left.store(n, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<ProductQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductSource for MemorySource {
    async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, FetchError> {
        self.calls.lock().unwrap().push(query.clone());

        if let Some(delay) = query.text().and_then(|t| self.delays.get(t)) {
            tokio::time::sleep(*delay).await;
        }

        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(FetchError::Network("connection refused".to_string()));
        }

        let needle = query.text().map(str::to_lowercase);
        let matching: Vec<ProductRecord> = self
            .catalog
            .iter()
            .filter(|p| match &needle {
                Some(n) => p.name.to_lowercase().contains(n),
                None => true,
            })
            .cloned()
            .collect();

        let total = matching.len() as u32;
        let limit = query.limit.unwrap_or(total.max(1));
        let page = query.page.unwrap_or(1);
        let products = matching
            .into_iter()
            .skip(((page - 1) * limit) as usize)
            .take(limit as usize)
            .collect();

        Ok(ProductPage::new(products, PageInfo::new(page, limit, total)))
    }

    async fn get_product(&self, id: &ProductId) -> Result<ProductRecord, FetchError> {
        self.catalog
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| FetchError::HttpError {
                status: 404,
                message: "Not Found".to_string(),
            })
    }
}
