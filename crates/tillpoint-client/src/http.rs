//! # HTTP Backend
//!
//! [`PosBackend`] over HTTP/JSON with `reqwest`.
//!
//! ## Endpoint Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base_url = http://localhost:8080     products = /products  pos = /pos │
//! │                                                                         │
//! │  GET    /products?search=milk        list_products(Some("milk"))       │
//! │  GET    /products/{id}               get_product                        │
//! │  POST   /products/add                add_standard                       │
//! │  POST   /products/add-perishable     add_perishable                     │
//! │  PUT    /products/{id}               update_product                     │
//! │  DELETE /products/{id}               delete_product                     │
//! │  POST   /pos/checkout                checkout                           │
//! │                                                                         │
//! │  2xx ──► Ok (bodies of add / update / delete are ignored)              │
//! │  else ─► ClientError::Backend { status, body: <response text> }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ids are appended as single path segments, so they are percent-encoded
//! and can never escape the product collection.

use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use tillpoint_core::{Product, ProductPayload, SaleReceipt, TransactionRequest};

use crate::backend::PosBackend;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, ConfigError};

/// REST backend client.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    products: Url,
    pos: Url,
}

impl HttpBackend {
    /// Builds the client from a validated configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base = config.base_url()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(HttpBackend {
            http: builder.build()?,
            products: endpoint(&base, config.backend.products_path.split('/'))?,
            pos: endpoint(&base, config.backend.pos_path.split('/'))?,
        })
    }

    fn product_url(&self, segment: &str) -> ClientResult<Url> {
        Ok(endpoint(&self.products, [segment])?)
    }
}

/// Appends non-empty path segments to `base`.
fn endpoint<'a>(base: &Url, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, ConfigError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ConfigError::InvalidUrl(format!("{} cannot be a base URL", base)))?
        .pop_if_empty()
        .extend(segments.into_iter().filter(|s| !s.is_empty()));
    Ok(url)
}

/// Passes a success response through, turns anything else into
/// [`ClientError::Backend`] with the response text.
async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), body = %body, "Backend rejected request");
    Err(ClientError::Backend {
        status: status.as_u16(),
        body,
    })
}

impl PosBackend for HttpBackend {
    async fn list_products(&self, search: Option<&str>) -> ClientResult<Vec<Product>> {
        let mut url = self.products.clone();
        if let Some(term) = search {
            url.query_pairs_mut().append_pair("search", term);
        }

        debug!(url = %url, "GET products");
        let response = ensure_success(self.http.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn get_product(&self, id: &str) -> ClientResult<Product> {
        let url = self.product_url(id)?;

        debug!(url = %url, "GET product");
        let response = ensure_success(self.http.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn add_standard(&self, payload: &ProductPayload) -> ClientResult<()> {
        let url = self.product_url("add")?;

        debug!(url = %url, name = %payload.name, "POST standard product");
        ensure_success(self.http.post(url).json(payload).send().await?).await?;
        Ok(())
    }

    async fn add_perishable(&self, payload: &ProductPayload) -> ClientResult<()> {
        let url = self.product_url("add-perishable")?;

        debug!(url = %url, name = %payload.name, "POST perishable product");
        ensure_success(self.http.post(url).json(payload).send().await?).await?;
        Ok(())
    }

    async fn update_product(&self, id: &str, payload: &ProductPayload) -> ClientResult<()> {
        let url = self.product_url(id)?;

        debug!(url = %url, "PUT product");
        ensure_success(self.http.put(url).json(payload).send().await?).await?;
        Ok(())
    }

    async fn delete_product(&self, id: &str) -> ClientResult<()> {
        let url = self.product_url(id)?;

        debug!(url = %url, "DELETE product");
        ensure_success(self.http.delete(url).send().await?).await?;
        Ok(())
    }

    async fn checkout(&self, request: &TransactionRequest) -> ClientResult<SaleReceipt> {
        let url = endpoint(&self.pos, ["checkout"])?;

        debug!(url = %url, items = request.items.len(), "POST checkout");
        let response = ensure_success(self.http.post(url).json(request).send().await?).await?;
        Ok(response.json().await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
