//! # Backend Seam
//!
//! The operations Tillpoint needs from the REST backend, as a trait.
//!
//! ```text
//! InventoryClient ─┐
//! lookup ──────────┼──► PosBackend ──┬──► HttpBackend (reqwest, production)
//! Register ────────┘                 └──► FakeBackend (tests, records calls)
//! ```
//!
//! Every method maps to exactly one request. A non-success status comes
//! back as [`ClientError::Backend`](crate::ClientError::Backend) carrying
//! the response body; connection and decoding problems come back as
//! [`ClientError::Transport`](crate::ClientError::Transport).

use tillpoint_core::{Product, ProductPayload, SaleReceipt, TransactionRequest};

use crate::error::ClientResult;

/// Product and POS endpoints of the backend.
#[allow(async_fn_in_trait)]
pub trait PosBackend {
    /// `GET {products}` or `GET {products}?search=<term>`.
    async fn list_products(&self, search: Option<&str>) -> ClientResult<Vec<Product>>;

    /// `GET {products}/{id}`.
    async fn get_product(&self, id: &str) -> ClientResult<Product>;

    /// `POST {products}/add`.
    async fn add_standard(&self, payload: &ProductPayload) -> ClientResult<()>;

    /// `POST {products}/add-perishable`.
    async fn add_perishable(&self, payload: &ProductPayload) -> ClientResult<()>;

    /// `PUT {products}/{id}`.
    async fn update_product(&self, id: &str, payload: &ProductPayload) -> ClientResult<()>;

    /// `DELETE {products}/{id}`.
    async fn delete_product(&self, id: &str) -> ClientResult<()>;

    /// `POST {pos}/checkout`.
    async fn checkout(&self, request: &TransactionRequest) -> ClientResult<SaleReceipt>;
}
