//! Cart

use rusty_money::iso::Currency;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    items::CartItem,
    money::{Amount, zero},
    pricing::{TotalPriceError, total_price},
};

/// Errors related to cart construction or totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// An item's currency differs from the cart currency (index, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),
}

/// The lines being checked out, all in one currency.
#[derive(Clone, Debug)]
pub struct Cart {
    items: SmallVec<[CartItem; 4]>,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new, empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: SmallVec::new(),
            currency,
        }
    }

    /// Create a new cart with the given items.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if an item is priced in another currency.
    pub fn with_items(
        items: impl IntoIterator<Item = CartItem>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let items: SmallVec<[CartItem; 4]> = items.into_iter().collect();

        items.iter().enumerate().try_for_each(|(i, item)| {
            let item_currency = item.unit_price().currency();

            if item_currency == currency {
                Ok(())
            } else {
                Err(CartError::CurrencyMismatch(
                    i,
                    item_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ))
            }
        })?;

        Ok(Cart { items, currency })
    }

    /// Sum of the line totals; zero for an empty cart.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if a line total overflows or money arithmetic fails.
    pub fn subtotal(&self) -> Result<Amount, TotalPriceError> {
        if self.is_empty() {
            return Ok(zero(self.currency));
        }

        total_price(&self.items)
    }

    /// Iterate over the items in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
