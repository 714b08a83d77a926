//! Promotions
//!
//! Promo codes map a normalized, user-entered string to a fixed discount. The table is
//! built once from store configuration and never mutated afterwards; [`entry`] holds the
//! per-session state machine that applies a code from the table.

use std::fmt;

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::money::Amount;

pub mod entry;

/// Errors raised while building a promo code table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromoTableError {
    /// The code is empty once trimmed.
    #[error("Promo code keys must not be empty")]
    EmptyCode,

    /// Two keys normalize to the same code.
    #[error("Duplicate promo code: {0}")]
    DuplicateCode(String),

    /// Discounts must be strictly positive.
    #[error("Promo code {0} must have a positive discount")]
    NonPositiveDiscount(String),

    /// A discount is priced in another currency (code, discount currency, table currency).
    #[error("Promo code {0} has currency {1}, but the store uses {2}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// A trimmed, lower-cased promo code.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PromoCode(String);

impl PromoCode {
    /// Normalize raw user input. Returns `None` if nothing is left after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let code = raw.trim().to_lowercase();

        if code.is_empty() { None } else { Some(Self(code)) }
    }

    /// The normalized code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Displays upper-cased, the way an applied code is shown back to the customer.
impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_uppercase())
    }
}

/// Static lookup from promo code to fixed discount.
#[derive(Clone, Debug)]
pub struct PromoCodeTable {
    codes: FxHashMap<PromoCode, Amount>,
    currency: &'static Currency,
}

impl PromoCodeTable {
    /// An empty table; every code is invalid.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            codes: FxHashMap::default(),
            currency,
        }
    }

    /// Build a table from `(code, discount)` pairs.
    ///
    /// # Errors
    ///
    /// Returns a [`PromoTableError`] if a code is empty or duplicated once normalized, or a
    /// discount is not positive or not in `currency`.
    pub fn with_codes<S: AsRef<str>>(
        codes: impl IntoIterator<Item = (S, Amount)>,
        currency: &'static Currency,
    ) -> Result<Self, PromoTableError> {
        let mut table = Self::new(currency);

        for (raw, discount) in codes {
            table.insert(raw.as_ref(), discount)?;
        }

        Ok(table)
    }

    fn insert(&mut self, raw: &str, discount: Amount) -> Result<(), PromoTableError> {
        let code = PromoCode::parse(raw).ok_or(PromoTableError::EmptyCode)?;

        if discount.currency() != self.currency {
            return Err(PromoTableError::CurrencyMismatch(
                code.0,
                discount.currency().iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if discount.to_minor_units() <= 0 {
            return Err(PromoTableError::NonPositiveDiscount(code.0));
        }

        if self.codes.contains_key(&code) {
            return Err(PromoTableError::DuplicateCode(code.0));
        }

        self.codes.insert(code, discount);

        Ok(())
    }

    /// The fixed discount for a code, if it exists.
    pub fn discount_for(&self, code: &PromoCode) -> Option<Amount> {
        self.codes.get(code).copied()
    }

    /// Number of codes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table has no codes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Currency of every discount in the table.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
