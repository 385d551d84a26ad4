//! # Register
//!
//! The POS side of a session: cart, quantity input and checkout.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Complete Sale Flow                               │
//! │                                                                         │
//! │  1. ADD ITEMS                                                           │
//! │     cart p1 2 ──► lookup ──► Cart::add ──► quantity input back to 1    │
//! │     cart p1 3 ──► lookup ──► same line, quantity 5                     │
//! │                                                                         │
//! │  2. RENDER                                                              │
//! │     "5 x Widget  $49.95"   Total: $49.95   Amount paid: 49.95          │
//! │                                                                         │
//! │  3. CHECKOUT                                                            │
//! │     checkout cash 50 ──► empty? underpaid? ──► POST /pos/checkout      │
//! │                                                   │                     │
//! │                                   2xx ◄───────────┴──────────► non-2xx │
//! │                                    │                              │     │
//! │                              cart cleared                  cart kept    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use tillpoint_core::validation::{validate_lookup_key, validate_quantity};
use tillpoint_core::{Cart, CartView, Money, PaymentMethod, SaleReceipt};

use crate::backend::PosBackend;
use crate::error::ClientResult;
use crate::lookup::{resolve_product, LookupPolicy};

/// Value the quantity input returns to after each add.
pub const DEFAULT_QUANTITY: i64 = 1;

#[derive(Debug, Clone)]
pub struct Register {
    cart: Cart,
    quantity_input: i64,
    lookup_policy: LookupPolicy,
}

impl Register {
    pub fn new(lookup_policy: LookupPolicy) -> Self {
        Register {
            cart: Cart::new(),
            quantity_input: DEFAULT_QUANTITY,
            lookup_policy,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current value of the quantity input.
    pub fn quantity_input(&self) -> i64 {
        self.quantity_input
    }

    pub fn set_quantity_input(&mut self, quantity: i64) {
        self.quantity_input = quantity;
    }

    pub fn render(&self) -> CartView {
        self.cart.view()
    }

    /// Resolves `key` and adds `quantity` of it to the cart.
    ///
    /// Blank keys and non-positive quantities are rejected before any
    /// request. A failed lookup leaves the cart untouched.
    pub async fn add_to_cart<B: PosBackend>(
        &mut self,
        backend: &B,
        key: &str,
        quantity: i64,
    ) -> ClientResult<CartView> {
        debug!(key = %key, quantity, "add_to_cart");

        let key = validate_lookup_key(key)?;
        validate_quantity(quantity)?;

        let product = resolve_product(backend, &key, self.lookup_policy).await?;
        self.cart.add(&product, quantity)?;

        info!(
            product_id = %product.id,
            quantity,
            items = self.cart.total_quantity(),
            "Added to cart"
        );
        self.quantity_input = DEFAULT_QUANTITY;
        Ok(self.render())
    }

    /// Submits the cart. `amount_paid` defaults to the pre-filled total.
    ///
    /// The cart is cleared only when the backend accepts the sale.
    pub async fn checkout<B: PosBackend>(
        &mut self,
        backend: &B,
        method: PaymentMethod,
        amount_paid: Option<Money>,
    ) -> ClientResult<SaleReceipt> {
        let amount_paid = amount_paid.unwrap_or_else(|| self.render().payment_prefill);
        debug!(method = %method, amount_paid = %amount_paid, "checkout");

        let request = self.cart.prepare_checkout(method, amount_paid)?;
        let receipt = backend.checkout(&request).await?;

        info!(
            sale_id = %receipt.id,
            total = %request.total_amount,
            items = request.items.len(),
            "Sale completed"
        );
        self.cart.clear();
        Ok(receipt)
    }
}
