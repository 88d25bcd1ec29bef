//! Bookstore Storefront library.
//!
//! Renders a bookstore listing page into an in-memory document and handles
//! the page's interactions: adding books through a form, deleting them, and
//! showing or hiding the form.
//!
//! # Architecture
//!
//! - [`dom`] - Arena-backed document with listeners and HTML serialization
//! - [`page`] - The hosting page skeleton and its fixed elements
//! - [`form`] - Binding between book drafts and the book form
//! - [`render`] - Books, header, and footer into document nodes
//! - [`view`] - The mounted page: listeners, population, interactions
//! - [`content`] - Store data loading
//! - [`config`] - Environment configuration
//!
//! # Example
//!
//! ```rust
//! use bookstore_core::{BookDraft, Store};
//! use bookstore_storefront::config::StorefrontConfig;
//! use bookstore_storefront::view::BookstoreView;
//!
//! let store = Store { name: "Easley's".to_string(), ..Store::default() };
//! let mut view = BookstoreView::from_store(&store, &StorefrontConfig::default())?;
//!
//! view.fill_form(&BookDraft { title: "Dune".to_string(), price: "15".to_string(), ..BookDraft::default() })?;
//! view.submit()?;
//! assert_eq!(view.cards()?[0].price, "$15.00");
//! # Ok::<(), bookstore_storefront::error::ViewError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod dom;
pub mod error;
pub mod form;
pub mod page;
pub mod render;
pub mod view;

pub use error::{Result, ViewError};
pub use view::{BookstoreView, FormState, Interaction};
