//! # Cart
//!
//! The client-side shopping cart of one POS session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Cashier Action           Cart Method              State Change         │
//! │  ──────────────           ───────────              ────────────         │
//! │                                                                         │
//! │  Add product ────────────► add() ─────────────────► push or qty += n   │
//! │                                                                         │
//! │  Look at cart ───────────► view() ────────────────► (read only)        │
//! │                                                                         │
//! │  Pay ────────────────────► prepare_checkout() ────► (read only)        │
//! │                                                                         │
//! │  Sale accepted ──────────► clear() ───────────────► lines.clear()      │
//! │                                                                         │
//! │  NOTE: the total is never stored. Every read sums the lines again.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PaymentInfo, PaymentMethod, Product, TransactionItem, TransactionRequest};
use crate::validation::validate_quantity;

/// Placeholder shown in place of an empty cart.
pub const EMPTY_CART_MESSAGE: &str = "Cart is empty.";

/// An item in the shopping cart.
///
/// ## Design Notes
/// - `product_id`: Reference to the backend product (not owned)
/// - `name` / `price`: Frozen copy of the product at the moment it was
///   first added. Later price changes on the backend do not touch the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub price: Money,
    pub quantity: i64,
}

impl CartLine {
    /// Creates a cart line from a product and quantity, freezing the price.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity,
        }
    }

    /// Line total (price × quantity).
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }

    fn checked_line_total(&self) -> Option<Money> {
        self.price.checked_multiply_quantity(self.quantity)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product increases
///   the quantity)
/// - Every quantity is > 0
/// - Every line total and the cart total fit in cents
/// - Insertion order is display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - If product already in cart: increases quantity, keeps the snapshot
    /// - If product not in cart: appends a new line
    /// - Non-positive quantity: rejected, cart untouched
    /// - Quantity or total too large to count in cents: rejected with
    ///   [`CoreError::AmountOutOfRange`], cart untouched
    pub fn add(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        let existing = self.lines.iter().position(|l| l.product_id == product.id);
        let candidate = match existing {
            Some(index) => {
                let line = &self.lines[index];
                let merged = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(|| out_of_range(quantity, &line.name))?;
                CartLine {
                    quantity: merged,
                    ..line.clone()
                }
            }
            None => CartLine::from_product(product, quantity),
        };

        let others = self
            .lines
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != existing)
            .map(|(_, l)| l);
        checked_total(others.chain(std::iter::once(&candidate)))
            .ok_or_else(|| out_of_range(quantity, &candidate.name))?;

        match existing {
            Some(index) => self.lines[index] = candidate,
            None => self.lines.push(candidate),
        }
        Ok(())
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Σ price × quantity over the current lines.
    pub fn total(&self) -> Money {
        checked_total(self.lines.iter())
            .unwrap_or_else(|| self.lines.iter().map(CartLine::line_total).sum())
    }

    /// Builds the display model of the cart.
    pub fn view(&self) -> CartView {
        let total = self.total();
        CartView {
            entries: self.lines.iter().map(CartEntry::from).collect(),
            total,
            payment_prefill: total,
        }
    }

    /// Gates a checkout and builds the transaction body.
    ///
    /// ## User Workflow
    /// ```text
    /// checkout(cash, $50.00)
    ///      │
    ///      ├── cart empty?          → CoreError::EmptyCart
    ///      ├── $50.00 < total?      → CoreError::InsufficientPayment
    ///      │
    ///      ▼
    /// TransactionRequest { items, totalAmount, payment }
    /// ```
    ///
    /// No change is computed: `amount_paid` is sent as tendered.
    pub fn prepare_checkout(
        &self,
        method: PaymentMethod,
        amount_paid: Money,
    ) -> CoreResult<TransactionRequest> {
        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let total = self.total();
        if amount_paid < total {
            return Err(CoreError::InsufficientPayment {
                paid: amount_paid,
                total,
            });
        }

        Ok(TransactionRequest {
            items: self
                .lines
                .iter()
                .map(|l| TransactionItem {
                    product_id: l.product_id.clone(),
                    quantity: l.quantity,
                    price: l.price,
                })
                .collect(),
            total_amount: total,
            payment: PaymentInfo {
                method,
                amount_paid,
            },
        })
    }
}

fn checked_total<'a>(mut lines: impl Iterator<Item = &'a CartLine>) -> Option<Money> {
    lines.try_fold(Money::zero(), |total, line| {
        total.checked_add(line.checked_line_total()?)
    })
}

fn out_of_range(quantity: i64, name: &str) -> CoreError {
    CoreError::AmountOutOfRange(format!("{} x {}", quantity, name))
}

// =============================================================================
// Cart View
// =============================================================================

/// One rendered cart entry: "`quantity` x `name`" and its line amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub quantity: i64,
    pub name: String,
    pub amount: Money,
}

impl CartEntry {
    /// Left-hand label, e.g. `"5 x Widget"`.
    pub fn label(&self) -> String {
        format!("{} x {}", self.quantity, self.name)
    }
}

impl From<&CartLine> for CartEntry {
    fn from(line: &CartLine) -> Self {
        CartEntry {
            quantity: line.quantity,
            name: line.name.clone(),
            amount: line.line_total(),
        }
    }
}

/// Snapshot of the cart for rendering.
///
/// An empty view shows [`EMPTY_CART_MESSAGE`], a zero total and a `0.00`
/// payment field; otherwise the payment field is pre-filled with the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub entries: Vec<CartEntry>,
    pub total: Money,
    pub payment_prefill: Money,
}

impl CartView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product::standard("p1", "Widget", Money::from_cents(999))
    }

    #[test]
    fn test_cart_add_line() {
        let mut cart = Cart::new();
        cart.add(&widget(), 2).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total(), Money::from_cents(1998));
    }

    #[test]
    fn test_same_product_accumulates_quantity() {
        let mut cart = Cart::new();
        cart.add(&widget(), 2).unwrap();
        cart.add(&widget(), 3).unwrap();

        assert_eq!(
            cart.lines(),
            &[CartLine {
                product_id: "p1".to_string(),
                name: "Widget".to_string(),
                price: Money::from_cents(999),
                quantity: 5,
            }]
        );
        assert_eq!(cart.total(), Money::from_cents(4995));
    }

    #[test]
    fn test_price_snapshot_survives_repricing() {
        let mut cart = Cart::new();
        cart.add(&widget(), 1).unwrap();

        let mut repriced = widget();
        repriced.price = Money::from_cents(1500);
        cart.add(&repriced, 1).unwrap();

        let line = &cart.lines()[0];
        assert_eq!(line.price, Money::from_cents(999));
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_non_positive_quantity_leaves_cart_untouched() {
        let mut cart = Cart::new();
        cart.add(&widget(), 1).unwrap();

        assert!(cart.add(&widget(), 0).is_err());
        assert!(cart.add(&widget(), -4).is_err());
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_quantity_too_large_to_price_leaves_cart_untouched() {
        let mut cart = Cart::new();
        cart.add(&widget(), 2).unwrap();
        let before = cart.clone();

        let err = cart.add(&widget(), i64::MAX / 100).unwrap_err();
        assert_eq!(
            err,
            CoreError::AmountOutOfRange("92233720368547758 x Widget".to_string())
        );
        assert!(cart.add(&widget(), i64::MAX).is_err());

        let gadget = Product::standard("p2", "Gadget", Money::from_cents(250));
        assert!(cart.add(&gadget, i64::MAX / 250 + 1).is_err());

        assert_eq!(cart, before);
        assert_eq!(cart.view().total, Money::from_cents(1998));
    }

    #[test]
    fn test_total_tracks_every_mutation() {
        let mut cart = Cart::new();
        let gadget = Product::standard("p2", "Gadget", Money::from_cents(250));

        cart.add(&widget(), 1).unwrap();
        cart.add(&gadget, 4).unwrap();
        cart.add(&widget(), 1).unwrap();

        let expected: Money = cart.lines().iter().map(|l| l.price * l.quantity).sum();
        assert_eq!(cart.total(), expected);
        assert_eq!(cart.total(), Money::from_cents(2998));

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_view_lists_lines_in_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&widget(), 5).unwrap();
        cart.add(&Product::standard("p2", "Gadget", Money::from_cents(250)), 1).unwrap();

        let view = cart.view();
        assert_eq!(view.entries[0].label(), "5 x Widget");
        assert_eq!(view.entries[0].amount.to_string(), "$49.95");
        assert_eq!(view.entries[1].label(), "1 x Gadget");
        assert_eq!(view.total, Money::from_cents(5245));
        assert_eq!(view.payment_prefill, view.total);
    }

    #[test]
    fn test_empty_view() {
        let view = Cart::new().view();
        assert!(view.is_empty());
        assert_eq!(view.total, Money::zero());
        assert_eq!(view.payment_prefill.amount_string(), "0.00");
    }

    #[test]
    fn test_checkout_rejects_empty_cart() {
        let cart = Cart::new();
        assert_eq!(
            cart.prepare_checkout(PaymentMethod::Cash, Money::from_cents(100)),
            Err(CoreError::EmptyCart)
        );
    }

    #[test]
    fn test_checkout_rejects_underpayment() {
        let mut cart = Cart::new();
        cart.add(&widget(), 5).unwrap();

        let err = cart
            .prepare_checkout(PaymentMethod::Cash, Money::from_cents(4994))
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientPayment {
                paid: Money::from_cents(4994),
                total: Money::from_cents(4995),
            }
        );
    }

    #[test]
    fn test_checkout_builds_transaction() {
        let mut cart = Cart::new();
        cart.add(&widget(), 5).unwrap();

        let request = cart
            .prepare_checkout(PaymentMethod::Card, Money::from_cents(4995))
            .unwrap();
        assert_eq!(request.total_amount, Money::from_cents(4995));
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].quantity, 5);
        assert_eq!(request.payment.amount_paid, Money::from_cents(4995));
        assert_eq!(request.payment.method, PaymentMethod::Card);
    }
}
