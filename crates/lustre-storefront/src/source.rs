//! Product fetch service.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use lustre_commerce::catalog::ProductRecord;
use lustre_commerce::search::{ProductPage, ProductQuery};
use lustre_commerce::ProductId;
use lustre_data::{FetchClient, FetchError};
use serde::Deserialize;

/// Read-only access to the remote product catalog.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch one page of the collection, in server order.
    async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, FetchError>;

    /// Fetch a single product.
    async fn get_product(&self, id: &ProductId) -> Result<ProductRecord, FetchError>;
}

#[async_trait]
impl<S: ProductSource + ?Sized> ProductSource for Arc<S> {
    async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, FetchError> {
        (**self).list_products(query).await
    }

    async fn get_product(&self, id: &ProductId) -> Result<ProductRecord, FetchError> {
        (**self).get_product(id).await
    }
}

/// Fetch several products concurrently. Results line up with `ids`.
pub async fn get_products<S: ProductSource + ?Sized>(
    source: &S,
    ids: &[ProductId],
) -> Vec<Result<ProductRecord, FetchError>> {
    join_all(ids.iter().map(|id| source.get_product(id))).await
}

/// [`ProductSource`] backed by the storefront HTTP API.
///
/// - `GET {base}/products?limit=&page=&q=&category=&productType=`
/// - `GET {base}/products/{id}`
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    client: FetchClient,
}

/// Single-product bodies come bare or wrapped.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProductBody {
    Wrapped {
        #[serde(alias = "data")]
        product: ProductRecord,
    },
    Bare(ProductRecord),
}

impl HttpProductSource {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &FetchClient {
        &self.client
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, FetchError> {
        let response = self
            .client
            .get("/products")
            .query_pairs(query.to_query_pairs())
            .send()
            .await?
            .error_for_status()?;

        let page = ProductPage::from_json(&response.body)
            .map_err(|e| FetchError::ParseError(e.to_string()))?;
        tracing::debug!(
            key = %query.cache_key(),
            count = page.len(),
            skipped = page.skipped,
            has_next = page.pagination.has_next_page,
            "fetched product page"
        );
        Ok(page)
    }

    async fn get_product(&self, id: &ProductId) -> Result<ProductRecord, FetchError> {
        let response = self
            .client
            .get(format!("/products/{}", id))
            .send()
            .await?
            .error_for_status()?;

        let record = match response.json::<ProductBody>()? {
            ProductBody::Wrapped { product } => product,
            ProductBody::Bare(product) => product,
        };
        record
            .validate()
            .map_err(|e| FetchError::ParseError(e.to_string()))?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_body_shapes() {
        let bare = r#"{"id":"p1","name":"Oil","brand":"B","price":9,"productType":"hair"}"#;
        let wrapped = format!(r#"{{"product":{}}}"#, bare);

        for body in [bare.to_string(), wrapped] {
            let record = match serde_json::from_str::<ProductBody>(&body).unwrap() {
                ProductBody::Wrapped { product } => product,
                ProductBody::Bare(product) => product,
            };
            assert_eq!(record.id.as_str(), "p1");
        }
    }

    #[tokio::test]
    async fn test_unreachable_api_is_network_failure() {
        let client = FetchClient::new().with_base_url("http://127.0.0.1:9");
        let source = HttpProductSource::new(client);

        let err = source
            .list_products(&ProductQuery::new().with_limit(8))
            .await
            .unwrap_err();
        assert!(err.is_network_failure(), "unexpected error: {:?}", err);
    }
}
