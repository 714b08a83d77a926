//! Money
//!
//! Amount type, price parsing and storefront formatting shared by the rest of the crate.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Findable, Money, iso::Currency};
use thiserror::Error;

/// A monetary amount in a statically known ISO currency.
pub type Amount = Money<'static, Currency>;

/// Errors that can occur while parsing a price string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The string was not in the `AMOUNT CURRENCY` form.
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// The currency code is not a known ISO currency.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Look up an ISO currency by its alphabetic code.
///
/// # Errors
///
/// Returns [`PriceError::UnknownCurrency`] if the code is not recognised.
pub fn currency(code: &str) -> Result<&'static Currency, PriceError> {
    Currency::find(code).ok_or_else(|| PriceError::UnknownCurrency(code.to_string()))
}

/// Zero in the given currency.
pub fn zero(currency: &'static Currency) -> Amount {
    Money::from_minor(0, currency)
}

/// Parse a price string such as `"450 LKR"`, `"2.99 GBP"` or `"450 JPY"`.
///
/// The amount is scaled by the currency's exponent, so `"1.5 KWD"` is 1500 fils.
///
/// # Errors
///
/// - [`PriceError::InvalidPrice`]: the string is malformed, has more decimal places than
///   the currency allows, or does not fit in minor units.
/// - [`PriceError::UnknownCurrency`]: the currency code is not recognised.
pub fn parse_price(s: &str) -> Result<Amount, PriceError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(PriceError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| PriceError::InvalidPrice(s.to_string()))?;

    let currency = currency(code)?;

    let minor_units = 10_i64
        .checked_pow(currency.exponent)
        .and_then(|scale| amount.checked_mul(Decimal::from(scale)))
        .filter(|value| value.fract().is_zero())
        .and_then(|value| value.to_i64())
        .ok_or_else(|| PriceError::InvalidPrice(s.to_string()))?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Format an amount the way the storefront shows it, e.g. `Rs. 4,600` or `Rs. 1,234.5`.
///
/// Whole amounts drop their fractional digits; rupees use the `Rs.` label and every
/// other currency falls back to its ISO code.
pub fn format_amount(amount: &Amount) -> String {
    let value = *amount.amount();
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };

    let value = value.abs();
    let whole = value.trunc().normalize();
    let fraction = (value - value.trunc()).normalize();

    let mut formatted = format!(
        "{} {sign}{}",
        currency_label(amount.currency()),
        group_thousands(&whole.to_string())
    );

    if !fraction.is_zero() {
        formatted.push_str(fraction.to_string().trim_start_matches('0'));
    }

    formatted
}

fn currency_label(currency: &Currency) -> &'static str {
    match currency.iso_alpha_code {
        "LKR" => "Rs.",
        other => other,
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.chars().count();
    let mut grouped = String::with_capacity(len + len / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(',');
        }

        grouped.push(ch);
    }

    grouped
}
