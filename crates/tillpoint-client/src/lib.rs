//! # tillpoint-client: Backend Client for Tillpoint
//!
//! Talks to the inventory / POS REST backend and runs the cashier's
//! session on top of it.
//!
//! ## Module Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          tillpoint-client                               │
//! │                                                                         │
//! │   session ──┬──► inventory ──┐                                          │
//! │             │                ├──► backend (PosBackend) ◄── http         │
//! │             └──► register ───┤                                          │
//! │                     │        │                                          │
//! │                     └──► lookup                                         │
//! │                                                                         │
//! │   config (TOML + env)   notice (expiring messages)   error             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use tillpoint_client::{ClientConfig, HttpBackend, Session};
//!
//! # async fn run() -> Result<(), tillpoint_client::ClientError> {
//! let config = ClientConfig::load(None)?;
//! let backend = HttpBackend::new(&config)?;
//! let mut session = Session::open(backend, &config).await;
//!
//! session.add_to_cart("p1", 2).await;
//! println!("{}", session.render_cart().total);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod http;
pub mod inventory;
pub mod lookup;
pub mod notice;
pub mod register;
pub mod session;

#[cfg(test)]
pub(crate) mod fake;

pub use backend::PosBackend;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ConfigError};
pub use http::HttpBackend;
pub use inventory::{Deletion, EditForm, InventoryClient};
pub use lookup::LookupPolicy;
pub use notice::{Notice, NoticeLevel};
pub use register::Register;
pub use session::Session;
