//! Record types for the bookstore page.
//!
//! Records are plain values with named fields and no behavior beyond
//! conversion between their text and typed forms.

pub mod book;
pub mod draft;
pub mod id;
pub mod price;
pub mod store;

mod de;

pub use book::{Book, Review};
pub use draft::{BookDraft, FormField};
pub use id::*;
pub use price::{CurrencyCode, ParseCurrencyError, Price};
pub use store::Store;
