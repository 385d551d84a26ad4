//! # Client Configuration
//!
//! Where the backend lives and how the session behaves.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TILLPOINT_BASE_URL=http://10.0.0.5:8080                            │
//! │     TILLPOINT_LOOKUP_POLICY=id_only                                    │
//! │                                                                         │
//! │  2. TOML Config File (--config <path>, or)                             │
//! │     ~/.config/tillpoint/tillpoint.toml (Linux)                         │
//! │     ~/Library/Application Support/dev.tillpoint.tillpoint/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8080, /products, /pos                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # tillpoint.toml
//! [backend]
//! base_url = "http://localhost:8080"
//! products_path = "/products"
//! pos_path = "/pos"
//! request_timeout_secs = 10   # optional, no timeout when absent
//!
//! [ui]
//! dismiss_delay_ms = 500
//! notice_ttl_ms = 3000
//!
//! [cart]
//! lookup_policy = "id_or_name"  # id_or_name | id_only
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::ConfigError;
use crate::lookup::LookupPolicy;

/// Name of the configuration file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "tillpoint.toml";

// =============================================================================
// Backend Settings
// =============================================================================

/// Location of the REST backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Scheme, host and port of the backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the product collection.
    #[serde(default = "default_products_path")]
    pub products_path: String,

    /// Path of the POS resource (checkout lives under it).
    #[serde(default = "default_pos_path")]
    pub pos_path: String,

    /// Per-request timeout. None means requests may wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_products_path() -> String {
    "/products".to_string()
}

fn default_pos_path() -> String {
    "/pos".to_string()
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            base_url: default_base_url(),
            products_path: default_products_path(),
            pos_path: default_pos_path(),
            request_timeout_secs: None,
        }
    }
}

// =============================================================================
// UI Settings
// =============================================================================

/// Timings of the terminal front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSettings {
    /// Pause between a successful update and closing the edit form.
    #[serde(default = "default_dismiss_delay")]
    pub dismiss_delay_ms: u64,

    /// How long a notice stays visible.
    #[serde(default = "default_notice_ttl")]
    pub notice_ttl_ms: u64,
}

fn default_dismiss_delay() -> u64 {
    500
}

fn default_notice_ttl() -> u64 {
    3000
}

impl Default for UiSettings {
    fn default() -> Self {
        UiSettings {
            dismiss_delay_ms: default_dismiss_delay(),
            notice_ttl_ms: default_notice_ttl(),
        }
    }
}

// =============================================================================
// Cart Settings
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSettings {
    /// How the add-to-cart key is matched against search results.
    #[serde(default)]
    pub lookup_policy: LookupPolicy,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub cart: CartSettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (tillpoint.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a configuration from TOML text and validates it.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.backend.base_url;
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(format!(
                "Base URL must start with http:// or https://, got: {}",
                base
            )));
        }
        Url::parse(base)?;

        for (name, path) in [
            ("products_path", &self.backend.products_path),
            ("pos_path", &self.backend.pos_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::Invalid(format!(
                    "{} must start with '/', got: {}",
                    name, path
                )));
            }
        }

        if self.backend.request_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from a variable source (the process environment
    /// in [`ClientConfig::load`]).
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("TILLPOINT_BASE_URL") {
            debug!(url = %url, "Overriding base URL from environment");
            self.backend.base_url = url;
        }

        if let Some(path) = var("TILLPOINT_PRODUCTS_PATH") {
            self.backend.products_path = path;
        }

        if let Some(path) = var("TILLPOINT_POS_PATH") {
            self.backend.pos_path = path;
        }

        if let Some(policy) = var("TILLPOINT_LOOKUP_POLICY") {
            match policy.parse() {
                Ok(parsed) => self.cart.lookup_policy = parsed,
                Err(_) => warn!(policy = %policy, "Unknown lookup policy in environment"),
            }
        }

        if let Some(delay) = var("TILLPOINT_DISMISS_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => self.ui.dismiss_delay_ms = ms,
                Err(_) => warn!(delay = %delay, "Invalid dismiss delay in environment"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "tillpoint", "tillpoint")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Parsed base URL. Only fails on a configuration that skipped
    /// [`ClientConfig::validate`].
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Ok(Url::parse(&self.backend.base_url)?)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.backend.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.ui.dismiss_delay_ms)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.ui.notice_ttl_ms)
    }

    pub fn lookup_policy(&self) -> LookupPolicy {
        self.cart.lookup_policy
    }

    /// Renders the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
