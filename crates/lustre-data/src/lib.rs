//! HTTP client utilities for the Lustre storefront.
//!
//! GET-only client over `reqwest`: a base URL, default headers and
//! per-client timeouts, with fully-buffered responses.
//!
//! # Example
//!
//! ```rust,ignore
//! use lustre_data::FetchClient;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Product {
//!     id: String,
//!     name: String,
//!     price: f64,
//! }
//!
//! let client = FetchClient::new().with_base_url("https://api.example.com");
//!
//! let product: Product = client
//!     .get("/products/123")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;
mod timeout;

use std::collections::HashMap;
use std::time::Duration;

pub use error::FetchError;
pub use request::Request;
pub use response::Response;
pub use timeout::TimeoutConfig;

/// HTTP client for making outbound requests.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    timeout: TimeoutConfig,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client with default timeouts.
    pub fn new() -> Self {
        let timeout = TimeoutConfig::default();
        Self::with_timeout(timeout).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to an unconfigured HTTP client");
            Self {
                http: reqwest::Client::new(),
                base_url: None,
                default_headers: HashMap::new(),
                timeout,
            }
        })
    }

    /// Create a client enforcing the given timeouts.
    pub fn with_timeout(timeout: TimeoutConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout.connect)
            .timeout(timeout.total)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: None,
            default_headers: HashMap::new(),
            timeout,
        })
    }

    /// Timeouts applied to every request from this client.
    pub fn timeout(&self) -> TimeoutConfig {
        self.timeout
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Configured base URL.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Start a GET request. Relative paths are joined to the base URL.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !is_absolute(&url) => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
            _ => url,
        };

        let request = self
            .default_headers
            .iter()
            .fold(Request::new(full_url), |req, (k, v)| req.header(k.clone(), v.clone()));

        ClientRequestBuilder {
            http: self.http.clone(),
            timeout: self.timeout.total,
            request,
        }
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    timeout: Duration,
    request: Request,
}

impl ClientRequestBuilder {
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request = self.request.header(key, value);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request = self.request.query(key, value);
        self
    }

    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.request = self.request.query_pairs(pairs);
        self
    }

    /// The request that would be sent.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Send the request and buffer the full response.
    ///
    /// Non-2xx statuses still come back as a `Response`; call
    /// [`Response::error_for_status`] to turn them into errors.
    pub async fn send(self) -> Result<Response, FetchError> {
        let Request {
            url,
            headers,
            query,
        } = self.request;
        let timeout = self.timeout;

        tracing::debug!(%url, ?query, "GET");

        let request = headers.iter().fold(
            self.http.get(&url).timeout(timeout).query(&query),
            |req, (k, v)| req.header(k.as_str(), v.as_str()),
        );
        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?
            .to_vec();

        tracing::debug!(%url, status, bytes = body.len(), "response");
        Ok(Response::new(status, headers, body))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Response, TimeoutConfig};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_join() {
        let client = FetchClient::new().with_base_url("https://api.example.com/v1/");
        let req = client.get("/products");
        assert_eq!(req.request().url(), "https://api.example.com/v1/products");

        let req = client.get("products/p1");
        assert_eq!(req.request().url(), "https://api.example.com/v1/products/p1");
    }

    #[test]
    fn test_absolute_url_bypasses_base() {
        let client = FetchClient::new().with_base_url("https://api.example.com");
        let req = client.get("https://cdn.example.com/x.json");
        assert_eq!(req.request().url(), "https://cdn.example.com/x.json");
    }

    #[test]
    fn test_default_headers_applied() {
        let client = FetchClient::new().with_default_header("Accept", "application/json");
        let req = client.get("https://api.example.com/products");
        assert_eq!(
            req.request().header_value("Accept"),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_failure() {
        let client =
            FetchClient::with_timeout(TimeoutConfig::from_total(Duration::from_millis(500)))
                .unwrap();
        // Port 9 on loopback is the discard service; nothing listens there in CI.
        let err = client.get("http://127.0.0.1:9/products").send().await.unwrap_err();
        assert!(err.is_network_failure(), "unexpected error: {:?}", err);
    }
    /// Accepts connections and never writes a response.
    async fn silent_listener() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{}/products", addr)
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let url = silent_listener().await;
        let client =
            FetchClient::with_timeout(TimeoutConfig::from_total(Duration::from_millis(300)))
                .unwrap();
        let err = client.get(url).send().await.unwrap_err();
        assert_eq!(err, FetchError::Timeout(Duration::from_millis(300)));
        assert!(err.is_network_failure());
    }

    #[tokio::test]
    async fn test_default_client_times_out() {
        let client = FetchClient::new();
        assert_eq!(client.timeout(), TimeoutConfig::default());

        let url = silent_listener().await;
        let result = tokio::time::timeout(
            TimeoutConfig::default().total + Duration::from_secs(3),
            client.get(url).send(),
        )
        .await
        .expect("default client should give up on its own");
        assert!(matches!(result, Err(FetchError::Timeout(_))));
    }
}
