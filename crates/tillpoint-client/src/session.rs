//! # Session
//!
//! One cashier's session: the active view, the inventory client, the
//! register and the current notice, all owned by a single value.
//!
//! ## Handler Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session Handler Flow                               │
//! │                                                                         │
//! │  Terminal command                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Session::create_product / update_product / add_to_cart / ...         │
//! │       │                                                                 │
//! │       ├──► InventoryClient / Register ──► PosBackend (one request)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok  ──► Notice::success("Product added successfully!")                │
//! │  Err ──► Notice::error(...)                                            │
//! │            ├── local error      → its own message                      │
//! │            ├── Backend {body}   → "Failed to ...: <body>"              │
//! │            └── Transport        → generic sentence, detail logged      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Terminal re-renders listing / cart / notice                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers never return errors. Whatever happened is in the notice.

use std::time::Duration;

use tracing::{debug, error};

use tillpoint_core::{
    CartView, Money, PaymentMethod, ProductDraft, ProductKind, ProductListing, SaleReceipt, View,
    ViewState, SHORT_ID_LEN,
};

use crate::backend::PosBackend;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::inventory::{Deletion, EditForm, InventoryClient};
use crate::notice::Notice;
use crate::register::Register;

/// Notice text shown when the add-to-cart form is incomplete.
pub const INVALID_CART_INPUT: &str = "Please enter a valid Product ID and Quantity.";

pub struct Session<B: PosBackend> {
    backend: B,
    view: ViewState,
    inventory: InventoryClient,
    register: Register,
    notice: Option<Notice>,
    notice_ttl: Duration,
}

impl<B: PosBackend> Session<B> {
    /// Builds a session without touching the backend.
    pub fn new(backend: B, config: &ClientConfig) -> Self {
        Session {
            backend,
            view: ViewState::new(),
            inventory: InventoryClient::new(config.dismiss_delay()),
            register: Register::new(config.lookup_policy()),
            notice: None,
            notice_ttl: config.notice_ttl(),
        }
    }

    /// Builds a session and performs the initial switch to the inventory
    /// view, which loads the first listing.
    pub async fn open(backend: B, config: &ClientConfig) -> Self {
        let mut session = Self::new(backend, config);
        session.switch_view(View::Inventory).await;
        session
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn active_view(&self) -> View {
        self.view.active()
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn listing(&self) -> &ProductListing {
        self.inventory.listing()
    }

    pub fn inventory(&self) -> &InventoryClient {
        &self.inventory
    }

    pub fn edit_form(&self) -> Option<&EditForm> {
        self.inventory.edit_form()
    }

    pub fn register(&self) -> &Register {
        &self.register
    }

    /// Sets the quantity used by the next add that gives none. It returns
    /// to 1 after every successful add.
    pub fn set_quantity_input(&mut self, quantity: i64) {
        self.register.set_quantity_input(quantity);
    }

    pub fn render_cart(&self) -> CartView {
        self.register.render()
    }

    /// The current notice, unless it has expired.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| !n.is_expired())
    }

    /// Takes the current notice so it is shown only once.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take().filter(|n| !n.is_expired())
    }

    fn succeed(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::success(message, self.notice_ttl));
    }

    fn fail(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::error(message, self.notice_ttl));
    }

    /// Error notice for a failed request.
    fn fail_request(&mut self, err: ClientError, rejected: &str, unreachable: &str) {
        let message = match err {
            ClientError::Backend { body, .. } => format!("{}: {}", rejected, body),
            ClientError::Transport(e) => {
                error!(error = %e, "{}", unreachable);
                unreachable.to_string()
            }
            other => other.to_string(),
        };
        self.fail(message);
    }

    // =========================================================================
    // View Controller
    // =========================================================================

    /// Activates a view. Entering the inventory view reloads the listing.
    pub async fn switch_view(&mut self, target: View) {
        debug!(view = ?target, "switch_view");
        if self.view.switch(target) {
            self.inventory.list_products(&self.backend, None).await;
        }
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    pub async fn list_products(&mut self, search: Option<&str>) -> ProductListing {
        self.inventory.list_products(&self.backend, search).await
    }

    pub async fn create_product(&mut self, kind: ProductKind, draft: &ProductDraft) -> bool {
        match self
            .inventory
            .create_product(&self.backend, kind, draft)
            .await
        {
            Ok(()) => {
                self.succeed("Product added successfully!");
                true
            }
            Err(e) => {
                self.fail_request(
                    e,
                    "Failed to add product",
                    "An error occurred while adding the product.",
                );
                false
            }
        }
    }

    /// Opens the edit form for a listed product, by full or shortened id.
    pub fn open_edit(&mut self, key: &str) -> Option<&EditForm> {
        let Some(product) = self.inventory.find_listed(key).cloned() else {
            self.fail(ClientError::NotFound(key.trim().to_string()).to_string());
            return None;
        };
        Some(self.inventory.open_edit(&product))
    }

    pub fn close_edit(&mut self) {
        self.inventory.close_edit();
    }

    /// Submits the edit form. On success the confirmation notice is set and
    /// the form is still open; follow with
    /// [`Session::dismiss_edit_after_delay`] once the notice is shown. On
    /// failure the form stays open.
    pub async fn update_product(&mut self, id: &str, draft: &ProductDraft) -> bool {
        match self
            .inventory
            .update_product(&self.backend, id, draft)
            .await
        {
            Ok(()) => {
                self.succeed("Product updated successfully!");
                true
            }
            Err(e) => {
                self.fail_request(
                    e,
                    "Failed to update product",
                    "An error occurred during update.",
                );
                false
            }
        }
    }

    /// Closes the edit form for `id` after the configured dismiss delay.
    pub async fn dismiss_edit_after_delay(&mut self, id: &str) {
        self.inventory.dismiss_edit_after_delay(id).await;
    }

    pub async fn delete_product(&mut self, id: &str, confirm: impl FnOnce(&str) -> bool) -> bool {
        match self
            .inventory
            .delete_product(&self.backend, id, confirm)
            .await
        {
            Ok(Deletion::Deleted) => {
                self.succeed("Product deleted successfully!");
                true
            }
            Ok(Deletion::Declined) => false,
            Err(e) => {
                self.fail_request(
                    e,
                    "Failed to delete product",
                    "An error occurred during deletion.",
                );
                false
            }
        }
    }

    // =========================================================================
    // Cart / Checkout
    // =========================================================================

    pub async fn add_to_cart(&mut self, key: &str, quantity: i64) -> CartView {
        match self.register.add_to_cart(&self.backend, key, quantity).await {
            Ok(view) => view,
            Err(e) => {
                match e {
                    ClientError::Validation(_) | ClientError::Core(_) => {
                        self.fail(INVALID_CART_INPUT)
                    }
                    ClientError::NotFound(key) => {
                        self.fail(ClientError::NotFound(key).to_string())
                    }
                    other => {
                        error!(error = %other, key = %key, "Error fetching single product");
                        self.fail(ClientError::NotFound(key.trim().to_string()).to_string());
                    }
                }
                self.register.render()
            }
        }
    }

    /// Submits the cart. `amount_paid` defaults to the pre-filled total.
    pub async fn checkout(
        &mut self,
        method: PaymentMethod,
        amount_paid: Option<Money>,
    ) -> Option<SaleReceipt> {
        match self
            .register
            .checkout(&self.backend, method, amount_paid)
            .await
        {
            Ok(receipt) => {
                let id: String = receipt.id.chars().take(SHORT_ID_LEN).collect();
                self.succeed(format!(
                    "Sale Completed! ID: {}... Total: {}",
                    id, receipt.total_amount
                ));
                Some(receipt)
            }
            Err(e) => {
                self.fail_request(
                    e,
                    "Checkout Failed",
                    "An error occurred during the checkout process.",
                );
                None
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
