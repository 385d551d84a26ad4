//! # tillpoint-core: Pure Business Logic for Tillpoint
//!
//! This crate holds every rule of the inventory / point-of-sale client that
//! can be expressed without touching the network or the terminal.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tillpoint Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Terminal (apps/terminal)                     │   │
//! │  │    Inventory table ──► Edit form ──► Cart ──► Checkout          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tillpoint-client                             │   │
//! │  │    Session, InventoryClient, Register, HttpBackend             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tillpoint-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐  │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │validation│ │listing │  │   │
//! │  │   │ Product │ │  Money  │ │  Cart   │ │  rules   │ │  rows  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire and domain types (Product, drafts, transactions)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart lines, derived totals, checkout gating
//! - [`listing`] - Product table rows and listing outcomes
//! - [`view`] - Inventory / POS view toggle
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use tillpoint_core::{Cart, Money, Product};
//!
//! let widget = Product::standard("p1", "Widget", Money::from_cents(999));
//!
//! let mut cart = Cart::new();
//! cart.add(&widget, 2).unwrap();
//! cart.add(&widget, 3).unwrap();
//!
//! assert_eq!(cart.lines().len(), 1);
//! assert_eq!(cart.total(), Money::from_cents(4995));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod listing;
pub mod money;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartEntry, CartLine, CartView, EMPTY_CART_MESSAGE};
pub use error::{CoreError, CoreResult, ValidationError};
pub use listing::{
    short_id, ProductListing, ProductRow, LOAD_FAILED_MESSAGE, NO_PRODUCTS_MESSAGE,
};
pub use money::Money;
pub use types::*;
pub use view::{View, ViewState};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of leading identifier characters shown in tables and notices.
pub const SHORT_ID_LEN: usize = 8;
