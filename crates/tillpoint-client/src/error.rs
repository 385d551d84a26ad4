//! # Client Error Types
//!
//! Error types for everything that talks to the backend.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Local          │  │   Lookup        │  │     Remote              │ │
//! │  │  (no request)   │  │                 │  │                         │ │
//! │  │  Validation     │  │  NotFound       │  │  Transport (reqwest)    │ │
//! │  │  Core           │  │                 │  │  Backend {status, body} │ │
//! │  │  NoEditTarget   │  │                 │  │                         │ │
//! │  │  Config         │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session turns each category into a different notice: local errors
//! show their own message, `Backend` shows the response body verbatim and
//! `Transport` shows a generic sentence while the detail goes to the log.

use thiserror::Error;
use tillpoint_core::{CoreError, ValidationError};

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client error type covering all possible backend interaction failures.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Local Errors
    // =========================================================================
    /// Form input was rejected before a request was built.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Cart or checkout rule violation.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Update submitted for a product that is not open in the edit form.
    #[error("Product {id} is not open for editing")]
    NoEditTarget { id: String },

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    // =========================================================================
    // Lookup Errors
    // =========================================================================
    /// Neither the exact fetch nor the search produced a match.
    #[error("Product with ID {0} not found!")]
    NotFound(String),

    // =========================================================================
    // Remote Errors
    // =========================================================================
    /// Connection, timeout or body decoding failure.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Backend returned {status}: {body}")]
    Backend { status: u16, body: String },
}

impl ClientError {
    /// Returns true if the error was raised before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_)
                | ClientError::Core(_)
                | ClientError::NoEditTarget { .. }
                | ClientError::Config(_)
        )
    }

    /// Response body of a non-success status, if that is what this is.
    pub fn backend_body(&self) -> Option<&str> {
        match self {
            ClientError::Backend { body, .. } => Some(body),
            _ => None,
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors raised while loading or validating [`crate::ClientConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to load config: {0}")]
    LoadFailed(String),
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        ConfigError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}
