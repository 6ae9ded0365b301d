//! REST client for the catalog `product` resource.
//!
//! [`ProductApi`] is the seam the controllers depend on; [`HttpProductApi`]
//! implements it with [`reqwest`] against `{base_url}/api/product`.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::error::{CatalogError, CatalogResult};
use super::model::{Product, ProductId, ProductPayload};
use crate::core::config::ApiConfig;

/// Path of the collection endpoint, relative to the base URL.
pub const COLLECTION_PATH: &str = "/api/product";

/// The five REST operations of the product resource.
///
/// Read operations return raw JSON so callers can normalize inconsistent
/// shapes; write operations return the echoed product when the server sends
/// one.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// `GET /api/product`
    async fn list_products(&self) -> CatalogResult<Value>;

    /// `GET /api/product/{id}`
    async fn get_product(&self, id: ProductId) -> CatalogResult<Value>;

    /// `POST /api/product`
    async fn create_product(&self, payload: &ProductPayload) -> CatalogResult<Option<Product>>;

    /// `PUT /api/product/{id}`
    async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> CatalogResult<Option<Product>>;

    /// `DELETE /api/product/{id}`
    async fn delete_product(&self, id: ProductId) -> CatalogResult<()>;
}

/// HTTP implementation of [`ProductApi`].
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProductApi {
    /// Create a client from API configuration.
    pub fn new(config: &ApiConfig) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// The configured base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, COLLECTION_PATH)
    }

    fn item_url(&self, id: ProductId) -> String {
        format!("{}{}/{}", self.base_url, COLLECTION_PATH, id)
    }

    /// Turn a non-2xx response into [`CatalogError::Server`].
    async fn ensure_success(response: reqwest::Response) -> CatalogResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = server_message(&body).unwrap_or_else(|| {
            format!("The server rejected the request ({}).", status.as_u16())
        });
        warn!(status = status.as_u16(), "Catalog API error: {}", message);
        Err(CatalogError::server(status.as_u16(), message))
    }

    async fn read_json(response: reqwest::Response) -> CatalogResult<Value> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<Value>().await?)
    }

    /// Decode an optional echoed product; empty or `null` bodies are `None`.
    async fn read_echo(response: reqwest::Response) -> CatalogResult<Option<Product>> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str::<Option<Product>>(&body) {
            Ok(product) => Ok(product),
            Err(e) => {
                // The write already succeeded on the server.
                warn!("Ignoring undecodable product echo: {}", e);
                Ok(None)
            }
        }
    }
}

/// Extract the human-readable message from an error body.
///
/// Looks for `message`, then `error` (Spring's default error shape).
pub fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"].iter().find_map(|key| {
        value
            .get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

#[async_trait]
impl ProductApi for HttpProductApi {
    #[instrument(skip(self))]
    async fn list_products(&self) -> CatalogResult<Value> {
        let url = self.collection_url();
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id: ProductId) -> CatalogResult<Value> {
        let url = self.item_url(id);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    #[instrument(skip_all)]
    async fn create_product(&self, payload: &ProductPayload) -> CatalogResult<Option<Product>> {
        let url = self.collection_url();
        debug!("POST {}", url);
        let response = self.client.post(&url).json(payload).send().await?;
        Self::read_echo(response).await
    }

    #[instrument(skip(self, payload))]
    async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> CatalogResult<Option<Product>> {
        let url = self.item_url(id);
        debug!("PUT {}", url);
        let response = self.client.put(&url).json(payload).send().await?;
        Self::read_echo(response).await
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: ProductId) -> CatalogResult<()> {
        let url = self.item_url(id);
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
