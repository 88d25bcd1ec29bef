//! Price representation using decimal arithmetic.
//!
//! A [`Price`] is the result of coercing user or source data into a number.
//! Coercion never fails: text without a numeric prefix becomes
//! [`Price::NotANumber`], which formats as `NaN` instead of raising an error.
//!
//! `Display` renders the amount with exactly two decimal places and no
//! currency symbol (`22.2` shows as `22.20`). Pair it with a
//! [`CurrencyCode`] via [`crate::format_price_in`] for the full display string.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::coerce::parse_price;

/// Number of decimal places shown for every price.
pub const DISPLAY_PLACES: u32 = 2;

/// A coerced price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Price {
    /// A finite amount in the currency's standard unit (dollars, not cents).
    Amount(Decimal),
    /// An unbounded amount, produced only by the literal `Infinity`.
    Infinite { negative: bool },
    /// Input that had no numeric prefix, or a field that was absent.
    #[default]
    NotANumber,
}

impl Price {
    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self::Amount(amount)
    }

    /// The finite amount, if there is one.
    #[must_use]
    pub const fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Amount(amount) => Some(*amount),
            Self::Infinite { .. } | Self::NotANumber => None,
        }
    }

    /// Whether coercion failed for this price.
    #[must_use]
    pub const fn is_nan(&self) -> bool {
        matches!(self, Self::NotANumber)
    }

    /// The unformatted value, as it would be typed into a form field.
    ///
    /// Unlike `Display`, trailing zeros are dropped rather than padded:
    /// `22.20` becomes `"22.2"`.
    #[must_use]
    pub fn to_input_value(&self) -> String {
        match self {
            Self::Amount(amount) => amount.normalize().to_string(),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(amount) => {
                let rounded = amount
                    .round_dp_with_strategy(DISPLAY_PLACES, RoundingStrategy::MidpointAwayFromZero);
                write!(f, "{rounded:.2}")
            }
            Self::Infinite { negative: true } => f.write_str("-Infinity"),
            Self::Infinite { negative: false } => f.write_str("Infinity"),
            Self::NotANumber => f.write_str("NaN"),
        }
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self::Amount(amount)
    }
}

impl From<i32> for Price {
    fn from(amount: i32) -> Self {
        Self::Amount(Decimal::from(amount))
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Self::Amount(Decimal::from(amount))
    }
}

impl From<f64> for Price {
    fn from(amount: f64) -> Self {
        if amount.is_nan() {
            Self::NotANumber
        } else if amount.is_infinite() {
            Self::Infinite {
                negative: amount.is_sign_negative(),
            }
        } else {
            // Shortest round-trip text keeps 22.2 from turning into 22.199999...
            parse_price(&amount.to_string())
        }
    }
}

impl From<&str> for Price {
    fn from(text: &str) -> Self {
        parse_price(text)
    }
}

impl From<&String> for Price {
    fn from(text: &String) -> Self {
        parse_price(text)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Amount(amount) => serializer.serialize_str(&amount.to_string()),
            _ => serializer.serialize_str(&self.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

/// Accepts JSON numbers, numeric strings, and `null` (as not-a-number).
struct PriceVisitor;

impl<'de> Visitor<'de> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
        Ok(Price::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
        Ok(Price::Amount(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
        Ok(Price::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
        Ok(parse_price(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Price, E> {
        Ok(Price::NotANumber)
    }

    fn visit_none<E: de::Error>(self) -> Result<Price, E> {
        Ok(Price::NotANumber)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// The symbol prefixed to formatted amounts.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// The three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a currency code is not one of the supported codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported currency code: {0}")]
pub struct ParseCurrencyError(String);

impl FromStr for CurrencyCode {
    type Err = ParseCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(ParseCurrencyError(s.to_string())),
        }
    }
}
