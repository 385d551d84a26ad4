//! # Validation Module
//!
//! Input validation for everything the cashier types before a request is
//! built.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Terminal                                                     │
//! │  ├── Argument parsing (numbers, dates)                                 │
//! │  └── Immediate usage errors                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (business rules)                                 │
//! │  ├── Names, prices, quantities, expiry dates                           │
//! │  └── Runs BEFORE any network call                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Its own rules; failures come back as response text                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tillpoint_core::validation::{validate_lookup_key, validate_quantity};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert_eq!(validate_lookup_key("  p1 ").unwrap(), "p1");
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{ProductDraft, ProductKind};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
///
/// ```rust
/// use tillpoint_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Widget").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    Ok(())
}

/// Normalizes a search query: `None` for a blank query (list
/// everything), the trimmed term otherwise. Length is left to the backend.
pub fn normalize_search_query(query: Option<&str>) -> Option<String> {
    query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
}

/// Validates the product id or name typed into the add-to-cart form.
///
/// ## Returns
/// The trimmed key.
pub fn validate_lookup_key(key: &str) -> ValidationResult<String> {
    let key = key.trim();

    if key.is_empty() {
        return Err(ValidationError::required("product id"));
    }

    Ok(key.to_string())
}

/// Parses an expiry date typed as `YYYY-MM-DD`.
pub fn parse_expiry_date(input: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::invalid_format("expiry date", "expected YYYY-MM-DD")
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity added to the cart.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  POS: Add to Cart                                                       │
/// │                                                                         │
/// │  User enters quantity: 0                                                │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(0) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       └── OK → resolve the product                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock quantity on a product form (zero allowed).
pub fn validate_stock_quantity(qty: Option<i64>) -> ValidationResult<()> {
    match qty {
        Some(q) if q < 0 => Err(ValidationError::Negative {
            field: "quantity".to_string(),
        }),
        _ => Ok(()),
    }
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates a whole product form before it is submitted.
///
/// ## Rules
/// - Name, price and stock quantity as above
/// - Perishable forms additionally need an expiry date
pub fn validate_product_draft(kind: ProductKind, draft: &ProductDraft) -> ValidationResult<()> {
    validate_product_name(&draft.name)?;
    validate_price(draft.price)?;
    validate_stock_quantity(draft.quantity)?;

    if kind == ProductKind::Perishable && draft.expiry_date.is_none() {
        return Err(ValidationError::required("expiry date"));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Widget").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_ok());
    }

    #[test]
    fn test_normalize_search_query() {
        assert_eq!(normalize_search_query(None), None);
        assert_eq!(normalize_search_query(Some("  ")), None);
        assert_eq!(
            normalize_search_query(Some(" milk ")),
            Some("milk".to_string())
        );
        let long = "w".repeat(101);
        assert_eq!(normalize_search_query(Some(&long)), Some(long.clone()));
    }

    #[test]
    fn test_validate_lookup_key() {
        assert_eq!(validate_lookup_key(" p1 ").unwrap(), "p1");
        assert!(validate_lookup_key("").is_err());
        assert!(validate_lookup_key("\t").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1000).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(999)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_parse_expiry_date() {
        assert_eq!(
            parse_expiry_date("2025-02-28").unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert!(parse_expiry_date("28/02/2025").is_err());
        assert!(parse_expiry_date("2025-02-30").is_err());
    }

    #[test]
    fn test_perishable_draft_requires_expiry() {
        let draft = ProductDraft::new("Yogurt", Money::from_cents(225));
        assert!(validate_product_draft(ProductKind::Standard, &draft).is_ok());
        assert_eq!(
            validate_product_draft(ProductKind::Perishable, &draft),
            Err(ValidationError::required("expiry date"))
        );

        let dated = draft.with_expiry(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert!(validate_product_draft(ProductKind::Perishable, &dated).is_ok());
    }

    #[test]
    fn test_draft_rejects_negative_stock() {
        let draft = ProductDraft::new("Widget", Money::from_cents(100)).with_quantity(-2);
        assert!(validate_product_draft(ProductKind::Standard, &draft).is_err());
    }
}
