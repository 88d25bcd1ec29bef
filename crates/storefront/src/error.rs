//! Unified error handling for the storefront view.
//!
//! Provides a unified `ViewError` type. Document, configuration, data
//! loading, and templating errors convert into it with `?`.

use thiserror::Error;

use crate::config::ConfigError;
use crate::content::StoreDataError;
use crate::dom::DomError;

/// Storefront-level error type.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A document operation failed.
    #[error("Document error: {0}")]
    Dom(#[from] DomError),

    /// An event listener failed while handling an interaction.
    #[error("Event handler failed: {0}")]
    Handler(DomError),

    /// The hosting page lacks an element the view needs.
    #[error("Missing page element: #{0}")]
    MissingAnchor(String),

    /// An interaction referred to a list position that does not exist.
    #[error("No book at position {index} (list has {len})")]
    NoSuchItem { index: usize, len: usize },

    /// Page template rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Store data could not be loaded.
    #[error("Store data error: {0}")]
    StoreData(#[from] StoreDataError),
}

/// Result type alias for `ViewError`.
pub type Result<T> = std::result::Result<T, ViewError>;
