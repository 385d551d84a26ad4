//! In-memory [`PosBackend`] for tests. Records every call it receives.

use std::sync::Mutex;

use tillpoint_core::{Product, ProductPayload, SaleReceipt, TransactionRequest};

use crate::backend::PosBackend;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    products: Mutex<Vec<Product>>,
    calls: Mutex<Vec<String>>,
    offline: Mutex<bool>,
    rejection: Mutex<Option<(u16, String)>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        FakeBackend {
            products: Mutex::new(products),
            ..Self::default()
        }
    }

    /// Calls received so far, e.g. `["list", "get p1", "add Widget"]`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.lock().unwrap().clone()
    }

    /// Every following request fails before reaching the backend.
    pub fn go_offline(&self) {
        *self.offline.lock().unwrap() = true;
    }

    /// Every following add, update, delete and checkout is answered with
    /// `status` and `body`.
    pub fn reject_with(&self, status: u16, body: &str) {
        *self.rejection.lock().unwrap() = Some((status, body.to_string()));
    }

    fn record(&self, call: String) -> ClientResult<()> {
        self.calls.lock().unwrap().push(call);
        if *self.offline.lock().unwrap() {
            return Err(transport_error());
        }
        Ok(())
    }

    fn check_rejection(&self) -> ClientResult<()> {
        match self.rejection.lock().unwrap().clone() {
            Some((status, body)) => Err(ClientError::Backend { status, body }),
            None => Ok(()),
        }
    }

    fn insert(&self, payload: &ProductPayload) {
        let mut products = self.products.lock().unwrap();
        let id = format!("{:08x}-fake-{}", products.len() + 1, products.len() + 1);
        products.push(Product {
            id,
            name: payload.name.clone(),
            price: payload.price,
            quantity: payload.quantity,
            expiry_date: payload.expiry_date.map(|d| d.format("%Y-%m-%d").to_string()),
        });
    }
}

fn not_found() -> ClientError {
    ClientError::Backend {
        status: 404,
        body: "Product not found".to_string(),
    }
}

/// A genuine `reqwest::Error`, produced without touching the network.
pub(crate) fn transport_error() -> ClientError {
    match reqwest::Client::new().get("http://").build() {
        Err(e) => ClientError::Transport(e),
        Ok(_) => unreachable!("an empty host never builds"),
    }
}

impl PosBackend for FakeBackend {
    async fn list_products(&self, search: Option<&str>) -> ClientResult<Vec<Product>> {
        match search {
            Some(term) => self.record(format!("list {}", term))?,
            None => self.record("list".to_string())?,
        }

        let products = self.products();
        Ok(match search {
            Some(term) => {
                let term = term.to_lowercase();
                products
                    .into_iter()
                    .filter(|p| p.id == term || p.name.to_lowercase().contains(&term))
                    .collect()
            }
            None => products,
        })
    }

    async fn get_product(&self, id: &str) -> ClientResult<Product> {
        self.record(format!("get {}", id))?;
        self.products()
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(not_found)
    }

    async fn add_standard(&self, payload: &ProductPayload) -> ClientResult<()> {
        self.record(format!("add {}", payload.name))?;
        self.check_rejection()?;
        self.insert(payload);
        Ok(())
    }

    async fn add_perishable(&self, payload: &ProductPayload) -> ClientResult<()> {
        self.record(format!("add-perishable {}", payload.name))?;
        self.check_rejection()?;
        self.insert(payload);
        Ok(())
    }

    async fn update_product(&self, id: &str, payload: &ProductPayload) -> ClientResult<()> {
        self.record(format!("update {}", id))?;
        self.check_rejection()?;

        let mut products = self.products.lock().unwrap();
        let product = products.iter_mut().find(|p| p.id == id).ok_or_else(not_found)?;
        product.name = payload.name.clone();
        product.price = payload.price;
        product.quantity = payload.quantity;
        product.expiry_date = payload.expiry_date.map(|d| d.format("%Y-%m-%d").to_string());
        Ok(())
    }

    async fn delete_product(&self, id: &str) -> ClientResult<()> {
        self.record(format!("delete {}", id))?;
        self.check_rejection()?;

        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    async fn checkout(&self, request: &TransactionRequest) -> ClientResult<SaleReceipt> {
        self.record(format!("checkout {}", request.total_amount))?;
        self.check_rejection()?;

        Ok(SaleReceipt {
            id: "0f9c2a7e-5d1b-4c55-a3e2-7b8f1c6d9e00".to_string(),
            total_amount: request.total_amount,
            status: Some("COMPLETED".to_string()),
        })
    }
}
