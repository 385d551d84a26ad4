//! # Domain Types
//!
//! Types exchanged with the product and POS endpoints, plus the drafts the
//! cashier fills in before anything is sent.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────────┐  │
//! │  │    Product      │   │ TransactionReq.  │   │    SaleReceipt      │  │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────────  │  │
//! │  │  id (opaque)    │   │  items[]         │   │  id                 │  │
//! │  │  name           │   │  totalAmount     │   │  totalAmount        │  │
//! │  │  price          │   │  payment         │   │  status?            │  │
//! │  │  quantity?      │   └──────────────────┘   └─────────────────────┘  │
//! │  │  expiryDate?    │                                                    │
//! │  └─────────────────┘   ┌──────────────────┐   ┌─────────────────────┐  │
//! │                        │  ProductDraft    │   │   PaymentMethod     │  │
//! │  ┌─────────────────┐   │  (form input)    │   │  Cash               │  │
//! │  │  ProductKind    │   │        │         │   │  Card               │  │
//! │  │  Standard       │   │        ▼         │   │  Mobile             │  │
//! │  │  Perishable     │   │  ProductPayload  │   └─────────────────────┘  │
//! │  └─────────────────┘   └──────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Conventions
//! Field names are camelCase. Amounts are JSON numbers in major units and
//! become [`Money`] on arrival. Product identifiers are opaque: the backend
//! may send them as strings or numbers, they are always held as `String`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::money::{self, Money};

// =============================================================================
// Product Kind
// =============================================================================

/// Whether a product carries an expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// No expiry date.
    Standard,
    /// Has a non-empty expiry date.
    Perishable,
}

impl ProductKind {
    /// Label shown in the "Type" column.
    pub fn label(&self) -> &'static str {
        match self {
            ProductKind::Standard => "Standard",
            ProductKind::Perishable => "Perishable",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as returned by the backend.
///
/// The client only ever holds transient copies for display and editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Unit price.
    #[serde(default, with = "money::as_major_units")]
    pub price: Money,

    /// Stock on hand, absent for products that never recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    /// Expiry date as sent by the backend (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
}

impl Product {
    /// Builds a standard product.
    pub fn standard(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            quantity: None,
            expiry_date: None,
        }
    }

    /// Builds a perishable product.
    pub fn perishable(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        expiry_date: NaiveDate,
    ) -> Self {
        Product {
            expiry_date: Some(expiry_date.format("%Y-%m-%d").to_string()),
            ..Product::standard(id, name, price)
        }
    }

    /// Perishable when an expiry date is present and non-empty.
    pub fn kind(&self) -> ProductKind {
        match self.expiry_date.as_deref() {
            Some(date) if !date.trim().is_empty() => ProductKind::Perishable,
            _ => ProductKind::Standard,
        }
    }

    /// Stock on hand, defaulting to zero.
    #[inline]
    pub fn quantity_or_default(&self) -> i64 {
        self.quantity.unwrap_or(0)
    }

    /// Parsed expiry date, if present and well formed.
    pub fn expiry(&self) -> Option<NaiveDate> {
        self.expiry_date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok())
    }
}

/// Accepts identifiers sent as JSON strings or numbers.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Unsigned(id) => id.to_string(),
        RawId::Signed(id) => id.to_string(),
    })
}

// =============================================================================
// Product Draft & Payload
// =============================================================================

/// What the cashier typed into an add or edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Money,
    pub quantity: Option<i64>,
    pub expiry_date: Option<NaiveDate>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        ProductDraft {
            name: name.into(),
            price,
            quantity: None,
            expiry_date: None,
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_expiry(mut self, expiry_date: NaiveDate) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    /// Pre-fills an edit form from a listed product.
    pub fn from_product(product: &Product) -> Self {
        ProductDraft {
            name: product.name.clone(),
            price: product.price,
            quantity: product.quantity,
            expiry_date: product.expiry(),
        }
    }
}

/// JSON body for the add, add-perishable and update endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,

    #[serde(with = "money::as_major_units")]
    pub price: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
}

impl ProductPayload {
    /// Builds the body for a draft. The expiry date is only carried for
    /// perishable forms; the standard form has no such field.
    pub fn for_kind(kind: ProductKind, draft: &ProductDraft) -> Self {
        ProductPayload {
            name: draft.name.trim().to_string(),
            price: draft.price,
            quantity: draft.quantity,
            expiry_date: match kind {
                ProductKind::Standard => None,
                ProductKind::Perishable => draft.expiry_date,
            },
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    Mobile,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::Mobile => write!(f, "mobile"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" | "credit" | "debit" => Ok(PaymentMethod::Card),
            "mobile" | "wallet" => Ok(PaymentMethod::Mobile),
            other => Err(ValidationError::invalid_format(
                "payment method",
                format!("unknown method '{}', expected cash, card or mobile", other),
            )),
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// Payment part of a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub method: PaymentMethod,

    #[serde(with = "money::as_major_units")]
    pub amount_paid: Money,
}

/// One line of a checkout, priced at the cart snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    pub product_id: String,
    pub quantity: i64,

    #[serde(with = "money::as_major_units")]
    pub price: Money,
}

/// Body posted to the checkout endpoint. Never retained after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub items: Vec<TransactionItem>,

    #[serde(with = "money::as_major_units")]
    pub total_amount: Money,

    pub payment: PaymentInfo,
}

/// What the backend returns for a completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleReceipt {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(default, with = "money::as_major_units")]
    pub total_amount: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
