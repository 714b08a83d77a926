//! Items

use std::num::NonZeroU32;

use rusty_money::Money;
use thiserror::Error;

use crate::money::Amount;

/// Errors raised while building or pricing a cart line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemError {
    /// A line must hold at least one unit.
    #[error("Item {0} has a quantity of zero")]
    ZeroQuantity(u32),

    /// Unit prices can't be negative.
    #[error("Item {0} has a negative unit price")]
    NegativePrice(u32),

    /// Quantity × unit price does not fit in minor units.
    #[error("Line total for item {0} overflowed")]
    LineTotalOverflow(u32),
}

/// A single cart entry with a quantity and unit price.
#[derive(Clone, Debug, PartialEq)]
pub struct CartItem {
    id: u32,
    name: String,
    quantity: NonZeroU32,
    unit_price: Amount,
    image_ref: String,
}

impl CartItem {
    /// Creates a new cart line.
    ///
    /// # Errors
    ///
    /// - [`ItemError::ZeroQuantity`]: `quantity` is zero.
    /// - [`ItemError::NegativePrice`]: `unit_price` is below zero.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        quantity: u32,
        unit_price: Amount,
        image_ref: impl Into<String>,
    ) -> Result<Self, ItemError> {
        let quantity = NonZeroU32::new(quantity).ok_or(ItemError::ZeroQuantity(id))?;

        if unit_price.to_minor_units() < 0 {
            return Err(ItemError::NegativePrice(id));
        }

        Ok(Self {
            id,
            name: name.into(),
            quantity,
            unit_price,
            image_ref: image_ref.into(),
        })
    }

    /// Returns the item id
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of units
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Returns the price of a single unit
    pub fn unit_price(&self) -> &Amount {
        &self.unit_price
    }

    /// Returns the image reference
    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    /// Quantity × unit price.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::LineTotalOverflow`] if the product does not fit in minor units.
    pub fn line_total(&self) -> Result<Amount, ItemError> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity.get()))
            .ok_or(ItemError::LineTotalOverflow(self.id))?;

        Ok(Money::from_minor(minor, self.unit_price.currency()))
    }
}
