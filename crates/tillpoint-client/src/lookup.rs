//! # Product Lookup
//!
//! Resolves what the cashier typed into the add-to-cart form to a product.
//!
//! ## Lookup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Add-to-Cart Lookup                                   │
//! │                                                                         │
//! │  Key "p1"                                                              │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  GET /products/p1 ──── 2xx ──────────────────────────► product         │
//! │     │                                                                   │
//! │     │ non-2xx (404, 400, ...)                                          │
//! │     ▼                                                                   │
//! │  GET /products?search=p1                                               │
//! │     │                                                                   │
//! │     ├── first result with id == key ─────────────────► product         │
//! │     ├── IdOrName: first with name == key (any case) ─► product         │
//! │     └── nothing ─────────────────────────────────────► NotFound        │
//! │                                                                         │
//! │  Transport errors on either request propagate unchanged.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use tillpoint_core::Product;

use crate::backend::PosBackend;
use crate::error::{ClientError, ClientResult};

/// How search results are matched against the lookup key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPolicy {
    /// Only an exact id match counts.
    IdOnly,

    /// Exact id first, then a case-insensitive name match.
    #[default]
    IdOrName,
}

impl fmt::Display for LookupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupPolicy::IdOnly => write!(f, "id_only"),
            LookupPolicy::IdOrName => write!(f, "id_or_name"),
        }
    }
}

impl FromStr for LookupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "id_only" | "id" => Ok(LookupPolicy::IdOnly),
            "id_or_name" | "name" => Ok(LookupPolicy::IdOrName),
            other => Err(format!(
                "Unknown lookup policy: '{}'. Valid options: id_only, id_or_name",
                other
            )),
        }
    }
}

impl LookupPolicy {
    /// Picks the matching product out of search results.
    pub fn select(&self, key: &str, candidates: Vec<Product>) -> Option<Product> {
        let by_id = candidates.iter().position(|p| p.id == key);
        let index = match (by_id, self) {
            (Some(i), _) => Some(i),
            (None, LookupPolicy::IdOnly) => None,
            (None, LookupPolicy::IdOrName) => {
                let key = key.to_lowercase();
                candidates.iter().position(|p| p.name.to_lowercase() == key)
            }
        };
        index.and_then(|i| candidates.into_iter().nth(i))
    }
}

/// Resolves `key` to a product.
///
/// `key` is expected to be trimmed and non-empty already.
pub async fn resolve_product<B: PosBackend>(
    backend: &B,
    key: &str,
    policy: LookupPolicy,
) -> ClientResult<Product> {
    match backend.get_product(key).await {
        Ok(product) => return Ok(product),
        Err(ClientError::Backend { status, .. }) => {
            debug!(key = %key, status, "Exact fetch missed, falling back to search");
        }
        Err(e) => return Err(e),
    }

    let candidates = match backend.list_products(Some(key)).await {
        Ok(candidates) => candidates,
        Err(ClientError::Backend { status, body }) => {
            warn!(key = %key, status, body = %body, "Search fallback rejected");
            return Err(ClientError::NotFound(key.to_string()));
        }
        Err(e) => return Err(e),
    };

    policy
        .select(key, candidates)
        .ok_or_else(|| ClientError::NotFound(key.to_string()))
}
