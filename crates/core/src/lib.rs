//! Bookstore Core - Shared record types.
//!
//! This crate provides the plain records the bookstore page is built from:
//! - [`Book`] and [`Review`] - a listing entry and its (unrendered) reviews
//! - [`Store`] - static store metadata plus the initial book collection
//! - [`BookDraft`] - the text values of the book form's fields
//! - [`Price`] - a coerced price, including the not-a-number case
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O and no
//! document access. The view layer lives in `bookstore-storefront`.
//!
//! # Modules
//!
//! - [`types`] - Records, price and currency types, newtype IDs
//! - [`coerce`] - Leading-number coercion of form text
//! - [`format`] - Price display formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod coerce;
pub mod format;
pub mod types;

pub use format::{format_price, format_price_in};
pub use types::*;
