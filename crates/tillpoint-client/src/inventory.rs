//! # Inventory Client
//!
//! Product CRUD against the backend, plus the state of the edit form.
//!
//! ## Inventory Workflows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Inventory Operations                                 │
//! │                                                                         │
//! │  Action          Local checks            Request            Afterwards │
//! │  ──────          ────────────            ───────            ────────── │
//! │                                                                         │
//! │  list / search   query length            GET                listing    │
//! │                                                                         │
//! │  add standard    name, price, qty        POST /add          refresh    │
//! │                                                                         │
//! │  add perishable  + expiry date           POST /add-perish.  refresh    │
//! │                                                                         │
//! │  update          edit target == id       PUT /{id}          refresh,   │
//! │                  name, price, qty, exp.                     wait,      │
//! │                                                             close form │
//! │                                                                         │
//! │  delete          cashier confirms        DELETE /{id}       refresh    │
//! │                                                                         │
//! │  A failed local check sends nothing.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use tillpoint_core::validation::{normalize_search_query, validate_product_draft};
use tillpoint_core::{short_id, Product, ProductDraft, ProductKind, ProductListing, ProductPayload};

use crate::backend::PosBackend;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Edit Form
// =============================================================================

/// The update form, pre-filled from a listed product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub product_id: String,
    /// Kind of the product being edited. Decides whether an expiry date is
    /// required and sent.
    pub kind: ProductKind,
    pub draft: ProductDraft,
}

impl EditForm {
    pub fn for_product(product: &Product) -> Self {
        EditForm {
            product_id: product.id.clone(),
            kind: product.kind(),
            draft: ProductDraft::from_product(product),
        }
    }

    /// Form heading, e.g. `"Update Product: Widget"`.
    pub fn title(&self) -> String {
        format!("Update Product: {}", self.draft.name)
    }
}

/// Heading of an add form.
pub fn add_form_title(kind: ProductKind) -> &'static str {
    match kind {
        ProductKind::Standard => "Add New Standard Product",
        ProductKind::Perishable => "Add New Perishable Product",
    }
}

/// What happened to a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Deletion {
    Deleted,
    /// The cashier declined the confirmation. Nothing was sent.
    Declined,
}

/// Confirmation prompt shown before a delete.
pub fn delete_prompt(id: &str) -> String {
    format!("Are you sure you want to delete product ID: {}?", short_id(id))
}

// =============================================================================
// Inventory Client
// =============================================================================

/// Inventory side of a session.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    edit: Option<EditForm>,
    listed: Vec<Product>,
    listing: ProductListing,
    dismiss_delay: Duration,
}

impl InventoryClient {
    pub fn new(dismiss_delay: Duration) -> Self {
        InventoryClient {
            edit: None,
            listed: Vec::new(),
            listing: ProductListing::Empty,
            dismiss_delay,
        }
    }

    /// The most recent listing.
    pub fn listing(&self) -> &ProductListing {
        &self.listing
    }

    /// Products behind the most recent listing.
    pub fn listed(&self) -> &[Product] {
        &self.listed
    }

    /// Finds a listed product by full id, or by the shortened id shown in
    /// the table (with or without the trailing `...`).
    pub fn find_listed(&self, key: &str) -> Option<&Product> {
        let key = key.trim();
        if let Some(product) = self.listed.iter().find(|p| p.id == key) {
            return Some(product);
        }

        let prefix = key.trim_end_matches("...");
        if prefix.is_empty() {
            return None;
        }
        let mut matches = self.listed.iter().filter(|p| p.id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(product), None) => Some(product),
            _ => None,
        }
    }

    pub fn edit_form(&self) -> Option<&EditForm> {
        self.edit.as_ref()
    }

    // =========================================================================
    // List
    // =========================================================================

    /// Lists or searches products. Never fails: request problems become
    /// [`ProductListing::Failed`] and are logged.
    pub async fn list_products<B: PosBackend>(
        &mut self,
        backend: &B,
        search: Option<&str>,
    ) -> ProductListing {
        debug!(search = ?search, "list_products");

        let term = normalize_search_query(search);
        match backend.list_products(term.as_deref()).await {
            Ok(products) => {
                info!(count = products.len(), "Products loaded");
                self.listing = ProductListing::from_products(&products);
                self.listed = products;
            }
            Err(e) => {
                error!(error = %e, "Error fetching products");
                self.listing = ProductListing::Failed;
                self.listed.clear();
            }
        }

        self.listing.clone()
    }

    async fn refresh<B: PosBackend>(&mut self, backend: &B) {
        self.list_products(backend, None).await;
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Submits an add form of the given kind.
    pub async fn create_product<B: PosBackend>(
        &mut self,
        backend: &B,
        kind: ProductKind,
        draft: &ProductDraft,
    ) -> ClientResult<()> {
        debug!(kind = %kind, name = %draft.name, "create_product");

        validate_product_draft(kind, draft)?;
        let payload = ProductPayload::for_kind(kind, draft);

        match kind {
            ProductKind::Standard => backend.add_standard(&payload).await?,
            ProductKind::Perishable => backend.add_perishable(&payload).await?,
        }

        info!(kind = %kind, name = %payload.name, "Product added");
        self.refresh(backend).await;
        Ok(())
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Opens the edit form for a product.
    pub fn open_edit(&mut self, product: &Product) -> &EditForm {
        debug!(id = %product.id, "open_edit");
        self.edit.insert(EditForm::for_product(product))
    }

    pub fn close_edit(&mut self) {
        self.edit = None;
    }

    /// Submits the edit form.
    ///
    /// ## User Workflow
    /// ```text
    /// edit <id> ──► form open ──► update ──► PUT ──► 2xx
    ///                                                 │
    ///                                                 ├─► refresh (once)
    ///                                                 └─► Ok, form still open
    ///
    /// caller shows the confirmation ──► dismiss_edit_after_delay ──► closed
    /// ```
    /// On any failure the form stays open.
    pub async fn update_product<B: PosBackend>(
        &mut self,
        backend: &B,
        id: &str,
        draft: &ProductDraft,
    ) -> ClientResult<()> {
        debug!(id = %id, name = %draft.name, "update_product");

        let kind = match &self.edit {
            Some(form) if form.product_id == id => form.kind,
            _ => return Err(ClientError::NoEditTarget { id: id.to_string() }),
        };

        validate_product_draft(kind, draft)?;
        let payload = ProductPayload::for_kind(kind, draft);
        backend.update_product(id, &payload).await?;

        info!(id = %id, name = %payload.name, "Product updated");
        self.refresh(backend).await;
        Ok(())
    }

    /// Waits the dismiss delay, then closes the edit form if it still
    /// belongs to `id`.
    pub async fn dismiss_edit_after_delay(&mut self, id: &str) {
        tokio::time::sleep(self.dismiss_delay).await;
        if self.edit.as_ref().is_some_and(|form| form.product_id == id) {
            debug!(id = %id, "Edit form dismissed");
            self.close_edit();
        }
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Deletes a product once `confirm` accepts the prompt.
    pub async fn delete_product<B: PosBackend>(
        &mut self,
        backend: &B,
        id: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> ClientResult<Deletion> {
        debug!(id = %id, "delete_product");

        if !confirm(&delete_prompt(id)) {
            debug!(id = %id, "Delete declined");
            return Ok(Deletion::Declined);
        }

        backend.delete_product(id).await?;

        info!(id = %id, "Product deleted");
        if self.edit.as_ref().is_some_and(|form| form.product_id == id) {
            warn!(id = %id, "Deleted product was open for editing");
            self.close_edit();
        }
        self.refresh(backend).await;
        Ok(Deletion::Deleted)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tillpoint_core::Money;

    use super::*;
    use crate::fake::FakeBackend;

    fn catalog() -> Vec<Product> {
        vec![
            Product::standard("0f9c2a7e-4b1d", "Widget", Money::from_cents(999)),
            Product::perishable(
                "5d1b7c2e-0000",
                "Yogurt",
                Money::from_cents(225),
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            ),
        ]
    }

    fn count(calls: &[String], call: &str) -> usize {
        calls.iter().filter(|c| c.as_str() == call).count()
    }

    #[tokio::test]
    async fn test_list_builds_table() {
        let backend = FakeBackend::with_products(catalog());
        let mut inventory = InventoryClient::new(Duration::from_millis(500));

        let listing = inventory.list_products(&backend, None).await;
        assert_eq!(listing.rows().len(), 2);
        assert_eq!(listing.rows()[1].details, "Expires: 2025-01-31");

        let listing = inventory.list_products(&backend, Some("  yog ")).await;
        assert_eq!(listing.rows().len(), 1);
        assert_eq!(backend.calls(), vec!["list", "list yog"]);

        let listing = inventory.list_products(&backend, Some("bread")).await;
        assert_eq!(listing, ProductListing::Empty);
    }

    #[tokio::test]
    async fn test_long_search_term_is_sent_as_typed() {
        let backend = FakeBackend::with_products(catalog());
        let mut inventory = InventoryClient::new(Duration::from_millis(500));
        let term = "w".repeat(101);

        let listing = inventory.list_products(&backend, Some(&term)).await;

        assert_eq!(listing, ProductListing::Empty);
        assert_eq!(backend.calls(), vec![format!("list {}", term)]);
    }

    #[tokio::test]
    async fn test_list_failure_becomes_placeholder() {
        let backend = FakeBackend::with_products(catalog());
        backend.go_offline();
        let mut inventory = InventoryClient::new(Duration::from_millis(500));

        let listing = inventory.list_products(&backend, None).await;
        assert_eq!(listing, ProductListing::Failed);
        assert!(inventory.listed().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name_without_request() {
        let backend = FakeBackend::new();
        let mut inventory = InventoryClient::new(Duration::from_millis(500));

        let draft = ProductDraft::new("   ", Money::from_cents(999));
        let err = inventory
            .create_product(&backend, ProductKind::Standard, &draft)
            .await
            .unwrap_err();

        assert!(err.is_local());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_perishable_requires_expiry() {
        let backend = FakeBackend::new();
        let mut inventory = InventoryClient::new(Duration::from_millis(500));

        let draft = ProductDraft::new("Yogurt", Money::from_cents(225));
        assert!(inventory
            .create_product(&backend, ProductKind::Perishable, &draft)
            .await
            .is_err());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_posts_then_refreshes() {
        let backend = FakeBackend::new();
        let mut inventory = InventoryClient::new(Duration::from_millis(500));

        let draft = ProductDraft::new("Yogurt", Money::from_cents(225))
            .with_expiry(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        inventory
            .create_product(&backend, ProductKind::Perishable, &draft)
            .await
            .unwrap();

        assert_eq!(backend.calls(), vec!["add-perishable Yogurt", "list"]);
        assert_eq!(inventory.listing().rows()[0].kind, ProductKind::Perishable);
    }

    #[tokio::test]
    async fn test_update_requires_open_form() {
        let backend = FakeBackend::with_products(catalog());
        let mut inventory = InventoryClient::new(Duration::from_millis(500));

        let draft = ProductDraft::new("Widget", Money::from_cents(1099));
        let err = inventory
            .update_product(&backend, "0f9c2a7e-4b1d", &draft)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NoEditTarget { .. }));

        inventory.open_edit(&catalog()[1]);
        let err = inventory
            .update_product(&backend, "0f9c2a7e-4b1d", &draft)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NoEditTarget { .. }));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_refreshes_once_then_dismisses_after_delay() {
        let backend = FakeBackend::with_products(catalog());
        let mut inventory = InventoryClient::new(Duration::from_millis(500));
        let widget = catalog()[0].clone();

        let form = inventory.open_edit(&widget);
        assert_eq!(form.title(), "Update Product: Widget");
        let draft = ProductDraft::new("Widget", Money::from_cents(1099)).with_quantity(7);

        let started = tokio::time::Instant::now();
        inventory
            .update_product(&backend, &widget.id, &draft)
            .await
            .unwrap();

        assert!(started.elapsed() < Duration::from_millis(500));
        assert!(inventory.edit_form().is_some());

        let calls = backend.calls();
        assert_eq!(count(&calls, "update 0f9c2a7e-4b1d"), 1);
        assert_eq!(count(&calls, "list"), 1);
        assert_eq!(inventory.listing().rows()[0].price, "$10.99");

        inventory.dismiss_edit_after_delay(&widget.id).await;
        assert!(started.elapsed() >= Duration::from_millis(500));
        assert!(inventory.edit_form().is_none());
        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_leaves_another_products_form_open() {
        let mut inventory = InventoryClient::new(Duration::from_millis(500));
        inventory.open_edit(&catalog()[1]);

        inventory.dismiss_edit_after_delay("0f9c2a7e-4b1d").await;
        assert_eq!(inventory.edit_form().unwrap().product_id, "5d1b7c2e-0000");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_update_keeps_form_open() {
        let backend = FakeBackend::with_products(catalog());
        backend.reject_with(400, "Price must be positive");
        let mut inventory = InventoryClient::new(Duration::from_millis(500));
        let widget = catalog()[0].clone();
        inventory.open_edit(&widget);

        let draft = ProductDraft::from_product(&widget);
        let err = inventory
            .update_product(&backend, &widget.id, &draft)
            .await
            .unwrap_err();

        assert_eq!(err.backend_body(), Some("Price must be positive"));
        assert!(inventory.edit_form().is_some());
        assert_eq!(backend.calls(), vec!["update 0f9c2a7e-4b1d"]);
    }

    #[tokio::test]
    async fn test_perishable_edit_needs_expiry() {
        let backend = FakeBackend::with_products(catalog());
        let mut inventory = InventoryClient::new(Duration::from_millis(500));
        let yogurt = catalog()[1].clone();
        inventory.open_edit(&yogurt);

        let draft = ProductDraft::new("Yogurt", Money::from_cents(250));
        assert!(inventory
            .update_product(&backend, &yogurt.id, &draft)
            .await
            .unwrap_err()
            .is_local());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let backend = FakeBackend::with_products(catalog());
        let mut inventory = InventoryClient::new(Duration::from_millis(500));

        let mut asked = String::new();
        let outcome = inventory
            .delete_product(&backend, "0f9c2a7e-4b1d", |prompt| {
                asked = prompt.to_string();
                false
            })
            .await
            .unwrap();

        assert_eq!(outcome, Deletion::Declined);
        assert_eq!(asked, "Are you sure you want to delete product ID: 0f9c2a7e...?");
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_delete_refreshes() {
        let backend = FakeBackend::with_products(catalog());
        let mut inventory = InventoryClient::new(Duration::from_millis(500));

        let outcome = inventory
            .delete_product(&backend, "0f9c2a7e-4b1d", |_| true)
            .await
            .unwrap();

        assert_eq!(outcome, Deletion::Deleted);
        assert_eq!(backend.calls(), vec!["delete 0f9c2a7e-4b1d", "list"]);
        assert_eq!(inventory.listed().len(), 1);
    }

    #[tokio::test]
    async fn test_find_listed_by_short_id() {
        let backend = FakeBackend::with_products(catalog());
        let mut inventory = InventoryClient::new(Duration::from_millis(500));
        inventory.list_products(&backend, None).await;

        assert_eq!(inventory.find_listed("0f9c2a7e...").unwrap().name, "Widget");
        assert_eq!(inventory.find_listed("5d1b7c2e-0000").unwrap().name, "Yogurt");
        assert!(inventory.find_listed("...").is_none());
        assert!(inventory.find_listed("ffff").is_none());
    }
}
