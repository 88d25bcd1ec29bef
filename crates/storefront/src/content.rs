//! Store data loading.
//!
//! The page is populated from a single JSON document shaped like:
//!
//! ```json
//! {
//!   "name": "Easley's Technical Books",
//!   "location": "Seattle",
//!   "address": "333 st ave seattle",
//!   "hours": "Monday - Friday 9am - 6pm",
//!   "number": 9999999999,
//!   "inventory": [
//!     { "title": "Eloquent JavaScript", "author": "Marjin Haverbeke",
//!       "price": 10.00, "imageUrl": "https://...", "inventory": 10, "reviews": [] }
//!   ]
//! }
//! ```
//!
//! Missing fields default to empty values instead of failing the load.

use std::path::{Path, PathBuf};

use bookstore_core::Store;
use thiserror::Error;

/// Errors from loading store data.
#[derive(Debug, Error)]
pub enum StoreDataError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid store JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load a store record from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON.
pub fn load_store(path: &Path) -> Result<Store, StoreDataError> {
    let content = std::fs::read_to_string(path).map_err(|source| StoreDataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let store = parse_store(&content)?;
    tracing::info!(
        path = %path.display(),
        store = %store.name,
        books = store.inventory.len(),
        "Loaded store data"
    );
    Ok(store)
}

/// Parse a store record from JSON text.
///
/// # Errors
///
/// Returns an error if the text is not valid JSON or has the wrong shape.
pub fn parse_store(json: &str) -> Result<Store, StoreDataError> {
    Ok(serde_json::from_str(json)?)
}
