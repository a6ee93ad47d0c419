//! `reqwest`-backed catalog client.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use super::{Catalog, CatalogError};
use crate::model::{CatalogProduct, ProductId, Stock};

/// Body of `GET /stock/{id}`. Only `amount` is required.
#[derive(Debug, Deserialize)]
struct StockBody {
    amount: u32,
}

/// Catalog client for the `/stock/{id}` and `/products/{id}` endpoints.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCatalog {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:3333`).
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: Url) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a client that reuses an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Resolves `{base}/{collection}/{id}`, keeping any path prefix of the base.
    fn endpoint(&self, collection: &str, id: ProductId) -> Result<Url, CatalogError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join(&format!("{collection}/{id}"))?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    #[instrument(skip(self))]
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        let url = self.endpoint("stock", id)?;
        debug!(%url, "Fetching stock");
        let body: StockBody = self.get_json(url).await?;
        Ok(Stock {
            id,
            amount: body.amount,
        })
    }

    #[instrument(skip(self))]
    async fn product(&self, id: ProductId) -> Result<CatalogProduct, CatalogError> {
        let url = self.endpoint("products", id)?;
        debug!(%url, "Fetching product");
        self.get_json(url).await
    }
}
