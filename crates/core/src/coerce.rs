//! Leading-number coercion of form text.
//!
//! Form controls only hold text. Price and inventory values are read back
//! leniently: leading whitespace is skipped, the longest numeric prefix
//! counts, trailing characters are ignored, and text with no numeric prefix
//! becomes not-a-number instead of an error.
//!
//! ```rust
//! use bookstore_core::coerce::{parse_integer, parse_price};
//! use bookstore_core::Price;
//!
//! assert_eq!(parse_price("  15abc").to_string(), "15.00");
//! assert_eq!(parse_price("abc"), Price::NotANumber);
//! assert_eq!(parse_integer("3 copies"), Some(3));
//! assert_eq!(parse_integer("many"), None);
//! ```


use rust_decimal::Decimal;

use crate::types::Price;

const INFINITY: &str = "Infinity";

/// Significant digits kept from a literal.
const MAX_DIGITS: usize = 28;

/// Largest scale a [`Decimal`] supports.
const MAX_SCALE: u32 = 28;

/// Coerce text into a [`Price`].
///
/// Accepts an optional sign, digits with at most one decimal point, and an
/// optional exponent (`1.5e2`). `Infinity` is recognised after the sign.
///
/// Every numeric literal yields an amount. Digits past the 28th significant
/// one are truncated, magnitudes above [`Decimal::MAX`] saturate to it, and
/// magnitudes below `1e-28` become zero.
#[must_use]
pub fn parse_price(input: &str) -> Price {
    let (negative, rest) = split_sign(input.trim_start());

    if rest.starts_with(INFINITY) {
        return Price::Infinite { negative };
    }

    let Some(literal) = DecimalLiteral::scan(rest) else {
        return Price::NotANumber;
    };

    let amount = literal.to_decimal();
    if negative && !amount.is_zero() {
        Price::Amount(-amount)
    } else {
        Price::Amount(amount)
    }
}

/// Coerce text into an integer count.
///
/// Accepts an optional sign followed by decimal digits, or a `0x`-prefixed
/// hexadecimal run. Digits stop at the first non-digit, so `"3.7"` is `3`.
/// Returns `None` when there is no digit or the value overflows `i64`.
#[must_use]
pub fn parse_integer(input: &str) -> Option<i64> {
    let (negative, rest) = split_sign(input.trim_start());

    let (radix, rest) = match rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        Some(hex) => (16, hex),
        None => (10, rest),
    };

    let (digits, _) = take_while(rest, |c| c.is_digit(radix));
    if digits.is_empty() {
        return None;
    }

    let magnitude = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// The numeric prefix of a string, split into its parts.
#[derive(Debug, PartialEq, Eq)]
struct DecimalLiteral<'a> {
    integer: &'a str,
    fraction: &'a str,
    exponent: i64,
}

impl<'a> DecimalLiteral<'a> {
    fn scan(input: &'a str) -> Option<Self> {
        let (integer, rest) = take_while(input, |c| c.is_ascii_digit());

        let (fraction, rest) = match rest.strip_prefix('.') {
            Some(after_point) => take_while(after_point, |c| c.is_ascii_digit()),
            None => ("", rest),
        };

        if integer.is_empty() && fraction.is_empty() {
            return None;
        }

        Some(Self {
            integer,
            fraction,
            exponent: scan_exponent(rest),
        })
    }

    /// The literal's magnitude, truncated to what a [`Decimal`] can hold.
    fn to_decimal(&self) -> Decimal {
        let digits = format!("{}{}", self.integer, self.fraction);
        let significant = digits.trim_start_matches('0');
        let trimmed = significant.trim_end_matches('0');
        if trimmed.is_empty() {
            return Decimal::ZERO;
        }

        // value = mantissa * 10^exponent
        let mut mantissa = trimmed;
        let mut exponent = self
            .exponent
            .saturating_add(digit_count(significant.len() - trimmed.len()))
            .saturating_sub(digit_count(self.fraction.len()));

        if mantissa.len() > MAX_DIGITS {
            exponent = exponent.saturating_add(digit_count(mantissa.len() - MAX_DIGITS));
            mantissa = mantissa.get(..MAX_DIGITS).unwrap_or(mantissa);
        }

        let min_exponent = -i64::from(MAX_SCALE);
        if exponent < min_exponent {
            let excess = usize::try_from(min_exponent.saturating_sub(exponent)).unwrap_or(usize::MAX);
            if excess >= mantissa.len() {
                return Decimal::ZERO;
            }
            mantissa = mantissa.get(..mantissa.len() - excess).unwrap_or(mantissa);
            exponent = min_exponent;
        }

        // At most 28 digits, so this always fits.
        let Ok(mut value) = mantissa.parse::<i128>() else {
            return Decimal::MAX;
        };

        if exponent < 0 {
            let scale = u32::try_from(-exponent).unwrap_or(MAX_SCALE);
            return Decimal::try_from_i128_with_scale(value, scale).unwrap_or(Decimal::MAX);
        }

        if exponent > i64::from(MAX_SCALE) + 1 {
            return Decimal::MAX;
        }
        for _ in 0..exponent {
            value = match value.checked_mul(10) {
                Some(next) => next,
                None => return Decimal::MAX,
            };
        }
        Decimal::try_from_i128_with_scale(value, 0).unwrap_or(Decimal::MAX)
    }
}

fn digit_count(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

/// Read an exponent suffix (`e3`, `E-2`, `e+1`). Incomplete suffixes count as
/// no exponent, matching how `1e` or `1e+` read as `1`.
fn scan_exponent(input: &str) -> i64 {
    let Some(rest) = input.strip_prefix(['e', 'E']) else {
        return 0;
    };

    let (negative, rest) = split_sign(rest);
    let (digits, _) = take_while(rest, |c| c.is_ascii_digit());
    if digits.is_empty() {
        return 0;
    }

    // Anything past i64 is out of Decimal range either way.
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    if negative { -magnitude } else { magnitude }
}

fn split_sign(input: &str) -> (bool, &str) {
    if let Some(rest) = input.strip_prefix('-') {
        (true, rest)
    } else {
        (false, input.strip_prefix('+').unwrap_or(input))
    }
}

fn take_while(input: &str, predicate: impl Fn(char) -> bool) -> (&str, &str) {
    let end = input.find(|c: char| !predicate(c)).unwrap_or(input.len());
    input.split_at(end)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn amount(input: &str) -> Decimal {
        match parse_price(input) {
            Price::Amount(value) => value,
            other => panic!("expected an amount for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_price_plain_numbers() {
        assert_eq!(amount("15"), Decimal::from(15));
        assert_eq!(amount("22.20"), Decimal::from_str("22.20").unwrap());
        assert_eq!(amount(".5"), Decimal::from_str("0.5").unwrap());
        assert_eq!(amount("7."), Decimal::from(7));
    }

    #[test]
    fn test_parse_price_ignores_surrounding_text() {
        assert_eq!(amount("  15abc"), Decimal::from(15));
        assert_eq!(amount("12.5.3"), Decimal::from_str("12.5").unwrap());
        assert_eq!(amount("\t9 dollars"), Decimal::from(9));
    }

    #[test]
    fn test_parse_price_signs() {
        assert_eq!(amount("-4.5"), Decimal::from_str("-4.5").unwrap());
        assert_eq!(amount("+4.5"), Decimal::from_str("4.5").unwrap());
        assert!(!amount("-0").is_sign_negative());
    }

    #[test]
    fn test_parse_price_exponent() {
        assert_eq!(amount("1.5e2"), Decimal::from(150));
        assert_eq!(amount("25E-1"), Decimal::from_str("2.5").unwrap());
        assert_eq!(amount("3e"), Decimal::from(3));
        assert_eq!(amount("3e+"), Decimal::from(3));
        assert_eq!(amount("1e-60"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_price_not_a_number() {
        assert_eq!(parse_price(""), Price::NotANumber);
        assert_eq!(parse_price("abc"), Price::NotANumber);
        assert_eq!(parse_price("."), Price::NotANumber);
        assert_eq!(parse_price("-"), Price::NotANumber);
        assert_eq!(parse_price("$15"), Price::NotANumber);
    }

    #[test]
    fn test_parse_price_out_of_range() {
        assert_eq!(amount("0e500"), Decimal::ZERO);
        assert_eq!(amount("0.000e-900"), Decimal::ZERO);
        assert_eq!(amount("1e30"), Decimal::MAX);
        assert_eq!(amount("1e400"), Decimal::MAX);
        assert_eq!(amount("-1e30"), Decimal::MIN);
        assert_eq!(amount("99999999999999999999999999999999"), Decimal::MAX);
        assert_eq!(amount("1e-29"), Decimal::ZERO);
        assert_eq!(amount("5e-28"), Decimal::new(5, 28));
    }

    #[test]
    fn test_parse_price_long_mantissa() {
        assert_eq!(
            parse_price("1234567890123456789012345678901e-5").to_string(),
            "12345678901234567890123456.78"
        );
        assert_eq!(
            amount("0.1234567890123456789012345678901234"),
            Decimal::from_str("0.1234567890123456789012345678").unwrap()
        );
        assert_eq!(amount("1500000000000000000000000000000e-28"), Decimal::from(150));
    }

    #[test]
    fn test_parse_price_infinity() {
        assert_eq!(parse_price("Infinity"), Price::Infinite { negative: false });
        assert_eq!(parse_price(" -Infinityx"), Price::Infinite { negative: true });
        assert_eq!(parse_price("infinity"), Price::NotANumber);
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("3"), Some(3));
        assert_eq!(parse_integer(" 3.7"), Some(3));
        assert_eq!(parse_integer("-12 left"), Some(-12));
        assert_eq!(parse_integer("0x1A"), Some(26));
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("x3"), None);
        assert_eq!(parse_integer("99999999999999999999"), None);
    }

    #[test]
    fn test_decimal_literal_scan() {
        assert_eq!(
            DecimalLiteral::scan("12.50e3kg"),
            Some(DecimalLiteral {
                integer: "12",
                fraction: "50",
                exponent: 3,
            })
        );
        assert_eq!(DecimalLiteral::scan("kg"), None);
    }
}
