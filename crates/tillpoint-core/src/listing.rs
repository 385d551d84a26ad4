//! # Product Listing
//!
//! Turns the products returned by the backend into table rows, and models
//! the three things a product table can show.
//!
//! ```text
//! GET /products ──► Ok([])        ──► ProductListing::Empty   "No products found."
//!               ──► Ok([p, ...])  ──► ProductListing::Table   one row per product
//!               ──► Err(_)        ──► ProductListing::Failed  "Error loading products. ..."
//! ```

use serde::Serialize;

use crate::types::{Product, ProductKind};
use crate::SHORT_ID_LEN;

/// Placeholder for an empty product table.
pub const NO_PRODUCTS_MESSAGE: &str = "No products found.";

/// Placeholder for a product table that could not be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Error loading products. Check backend connectivity.";

/// Shortens an identifier for display: the first 8 characters followed by
/// `...` when the id is longer than that.
///
/// ```rust
/// use tillpoint_core::short_id;
///
/// assert_eq!(short_id("0f9c2a7e-4b1d-4c55"), "0f9c2a7e...");
/// assert_eq!(short_id("42"), "42");
/// ```
pub fn short_id(id: &str) -> String {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((cut, _)) => format!("{}...", &id[..cut]),
        None => id.to_string(),
    }
}

/// One rendered row of the product table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    /// Full id, kept for follow-up actions (edit, delete).
    pub id: String,
    pub short_id: String,
    pub name: String,
    /// Price with two decimals, e.g. `"$9.99"`.
    pub price: String,
    pub quantity: i64,
    pub kind: ProductKind,
    /// `"Expires: <date>"` for perishables, `"N/A"` otherwise.
    pub details: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        let kind = product.kind();
        let details = match (kind, product.expiry_date.as_deref()) {
            (ProductKind::Perishable, Some(date)) => format!("Expires: {}", date.trim()),
            _ => "N/A".to_string(),
        };

        ProductRow {
            id: product.id.clone(),
            short_id: short_id(&product.id),
            name: product.name.clone(),
            price: product.price.to_string(),
            quantity: product.quantity_or_default(),
            kind,
            details,
        }
    }
}

/// Outcome of a list or search request, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "rows", rename_all = "snake_case")]
pub enum ProductListing {
    Table(Vec<ProductRow>),
    Empty,
    Failed,
}

impl ProductListing {
    pub fn from_products(products: &[Product]) -> Self {
        if products.is_empty() {
            return ProductListing::Empty;
        }
        ProductListing::Table(products.iter().map(ProductRow::from).collect())
    }

    /// Placeholder text for the non-table states.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            ProductListing::Table(_) => None,
            ProductListing::Empty => Some(NO_PRODUCTS_MESSAGE),
            ProductListing::Failed => Some(LOAD_FAILED_MESSAGE),
        }
    }

    pub fn rows(&self) -> &[ProductRow] {
        match self {
            ProductListing::Table(rows) => rows,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::money::Money;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("abcdefgh"), "abcdefgh");
        assert_eq!(short_id("abcdefghi"), "abcdefgh...");
        assert_eq!(short_id(""), "");
    }

    #[test]
    fn test_row_for_standard_product() {
        let product = Product::standard("0f9c2a7e-4b1d", "Widget", Money::from_cents(999));
        let row = ProductRow::from(&product);

        assert_eq!(row.short_id, "0f9c2a7e...");
        assert_eq!(row.price, "$9.99");
        assert_eq!(row.quantity, 0);
        assert_eq!(row.kind.label(), "Standard");
        assert_eq!(row.details, "N/A");
    }

    #[test]
    fn test_row_for_perishable_product() {
        let mut product = Product::perishable(
            "p2",
            "Yogurt",
            Money::from_cents(225),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        );
        product.quantity = Some(12);

        let row = ProductRow::from(&product);
        assert_eq!(row.kind, ProductKind::Perishable);
        assert_eq!(row.details, "Expires: 2025-01-31");
        assert_eq!(row.quantity, 12);
    }

    #[test]
    fn test_listing_states() {
        assert_eq!(ProductListing::from_products(&[]), ProductListing::Empty);
        assert_eq!(
            ProductListing::Empty.placeholder(),
            Some("No products found.")
        );
        assert_eq!(
            ProductListing::Failed.placeholder(),
            Some("Error loading products. Check backend connectivity.")
        );

        let listing =
            ProductListing::from_products(&[Product::standard("p1", "Widget", Money::zero())]);
        assert_eq!(listing.placeholder(), None);
        assert_eq!(listing.rows().len(), 1);
    }
}
