//! Price display formatting.
//!
//! ```rust
//! use bookstore_core::{CurrencyCode, format_price, format_price_in};
//!
//! assert_eq!(format_price(22.2), "$22.20");
//! assert_eq!(format_price("15"), "$15.00");
//! assert_eq!(format_price("not a price"), "$NaN");
//! assert_eq!(format_price_in("9.5", CurrencyCode::GBP), "£9.50");
//! ```

use crate::types::{CurrencyCode, Price};

/// Format a price in the default currency (USD).
///
/// Accepts anything convertible to a [`Price`]: decimals, integers, floats,
/// or numeric text. Input without a numeric prefix formats as `$NaN`.
#[must_use]
pub fn format_price(price: impl Into<Price>) -> String {
    format_price_in(price, CurrencyCode::default())
}

/// Format a price with the given currency's symbol and two decimal places.
#[must_use]
pub fn format_price_in(price: impl Into<Price>, currency: CurrencyCode) -> String {
    format!("{}{}", currency.symbol(), price.into())
}
