//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BOOKSTORE_DATA_PATH` - Path to the store JSON file
//! - `BOOKSTORE_CURRENCY` - Currency code for price display (default: USD)
//! - `BOOKSTORE_PREFILL_FORM` - Prefill the book form with a sample on mount (default: true)

use std::path::PathBuf;

use bookstore_core::CurrencyCode;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront view configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Store JSON to populate the page from
    pub data_path: Option<PathBuf>,
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
    /// Fill the book form with a sample draft when the view mounts
    pub prefill_form: bool,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            currency: CurrencyCode::default(),
            prefill_form: true,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_path = get_optional_env("BOOKSTORE_DATA_PATH").map(PathBuf::from);
        let currency = parse_currency(
            "BOOKSTORE_CURRENCY",
            &get_env_or_default("BOOKSTORE_CURRENCY", "USD"),
        )?;
        let prefill_form = parse_bool(
            "BOOKSTORE_PREFILL_FORM",
            &get_env_or_default("BOOKSTORE_PREFILL_FORM", "true"),
        )?;

        Ok(Self {
            data_path,
            currency,
            prefill_form,
        })
    }

    /// The store data path, or an error naming the variable that would set it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if no path is configured.
    pub fn require_data_path(&self) -> Result<&PathBuf, ConfigError> {
        self.data_path
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar("BOOKSTORE_DATA_PATH".to_string()))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_currency(key: &str, value: &str) -> Result<CurrencyCode, ConfigError> {
    value
        .parse()
        .map_err(|e: bookstore_core::ParseCurrencyError| {
            ConfigError::InvalidEnvVar(key.to_string(), e.to_string())
        })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
