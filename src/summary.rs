//! Order summary
//!
//! The financial breakdown shown next to the checkout form and handed to the payment
//! screen: `total = subtotal + shipping - discount`, with the discount never allowed to
//! push the total below zero.

use std::io;

use rusty_money::{MoneyError, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::Cart,
    money::{Amount, format_amount, zero},
    pricing::TotalPriceError,
};

/// Errors that can occur when building an order summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Error calculating the cart subtotal.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Shipping fees and discounts can't be negative.
    #[error("{0} must not be negative")]
    Negative(&'static str),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Subtotal, shipping, discount and total for one order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrderSummary {
    subtotal: Amount,
    shipping: Amount,
    discount: Amount,
    total: Amount,
}

impl OrderSummary {
    /// Summarise `cart` with a shipping fee and an optional discount.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if the subtotal can't be calculated, an amount is negative,
    /// or the amounts are in different currencies.
    pub fn calculate(
        cart: &Cart,
        shipping: Amount,
        discount: Option<Amount>,
    ) -> Result<Self, SummaryError> {
        Self::from_parts(cart.subtotal()?, shipping, discount)
    }

    /// Build a summary from an already known subtotal.
    ///
    /// A discount larger than `subtotal + shipping` is reduced to exactly that, so the total
    /// bottoms out at zero.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if an amount is negative or the currencies differ.
    pub fn from_parts(
        subtotal: Amount,
        shipping: Amount,
        discount: Option<Amount>,
    ) -> Result<Self, SummaryError> {
        let discount = discount.unwrap_or_else(|| zero(subtotal.currency()));

        ensure_non_negative(&subtotal, "Subtotal")?;
        ensure_non_negative(&shipping, "Shipping")?;
        ensure_non_negative(&discount, "Discount")?;

        let gross = subtotal.add(shipping)?;
        let total = gross.sub(discount)?;

        if total.to_minor_units() < 0 {
            return Ok(Self {
                subtotal,
                shipping,
                discount: gross,
                total: zero(gross.currency()),
            });
        }

        Ok(Self {
            subtotal,
            shipping,
            discount,
            total,
        })
    }

    /// Sum of the line totals
    pub fn subtotal(&self) -> Amount {
        self.subtotal
    }

    /// Shipping fee
    pub fn shipping(&self) -> Amount {
        self.shipping
    }

    /// Discount actually applied
    pub fn discount(&self) -> Amount {
        self.discount
    }

    /// Amount payable
    pub fn total(&self) -> Amount {
        self.total
    }

    /// Currency used for all monetary values.
    pub fn currency(&self) -> &'static Currency {
        self.subtotal.currency()
    }

    /// Writes the cart lines and totals as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if a line total can't be computed or the output can't be written.
    pub fn write_to(&self, mut out: impl io::Write, cart: &Cart) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Price"]);

        for item in cart.iter() {
            let line_total = item.line_total().map_err(TotalPriceError::from)?;

            builder.push_record([
                format!("#{:<3}", item.id()),
                item.name().to_string(),
                item.quantity().to_string(),
                format_amount(&line_total),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..4), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)?;

        for (label, value) in self.lines() {
            writeln!(out, " {label:<10}{value:>20}").map_err(|_err| SummaryError::IO)?;
        }

        Ok(())
    }

    /// Label/value rows for the totals block. Shipping shows as "Free" when zero and the
    /// discount row is omitted when there is no discount.
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        let mut lines = vec![("Subtotal", format_amount(&self.subtotal))];

        lines.push((
            "Shipping",
            if self.shipping.to_minor_units() == 0 {
                "Free".to_string()
            } else {
                format_amount(&self.shipping)
            },
        ));

        if self.discount.to_minor_units() > 0 {
            lines.push(("Discount", format!("- {}", format_amount(&self.discount))));
        }

        lines.push(("Total", format_amount(&self.total)));

        lines
    }
}

fn ensure_non_negative(amount: &Amount, what: &'static str) -> Result<(), SummaryError> {
    if amount.to_minor_units() < 0 {
        Err(SummaryError::Negative(what))
    } else {
        Ok(())
    }
}
