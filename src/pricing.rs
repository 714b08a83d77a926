//! Prices

use rusty_money::{Money, MoneyError};
use thiserror::Error;

use crate::{
    items::{CartItem, ItemError},
    money::Amount,
};

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// No items were provided, so currency could not be determined.
    #[error("no items provided; cannot determine currency")]
    NoItems,

    /// A line total could not be computed.
    #[error(transparent)]
    Item(#[from] ItemError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the sum of the line totals of a list of cart items
///
/// # Errors
///
/// - [`TotalPriceError::NoItems`]: No items were provided, so currency could not be determined.
/// - [`TotalPriceError::Item`]: A line total overflowed.
/// - [`TotalPriceError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn total_price(items: &[CartItem]) -> Result<Amount, TotalPriceError> {
    let first = items.first().ok_or(TotalPriceError::NoItems)?;

    let total = items.iter().try_fold(
        Money::from_minor(0, first.unit_price().currency()),
        |acc, item| -> Result<Amount, TotalPriceError> { Ok(acc.add(item.line_total()?)?) },
    )?;

    Ok(total)
}
