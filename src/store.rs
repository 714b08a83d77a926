//! Store configuration
//!
//! Everything the checkout needs to know about the shop that never changes during a
//! session: promo codes, bank details for transfers, the `WhatsApp` number, pickup
//! branches, districts, the shipping fee and the sample cart. It is read once from YAML
//! and shared immutably afterwards.

use std::{fs, path::Path};

use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::iso::Currency;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{Cart, CartError},
    checkout::delivery::Branch,
    items::{CartItem, ItemError},
    money::{self, Amount, PriceError, parse_price},
    payment::bank::BankDetails,
    promotions::{PromoCodeTable, PromoTableError},
};

/// The configuration shipped with the crate.
pub const BUILTIN_STORE_YAML: &str = include_str!("../fixtures/store.yml");

/// Store configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file
    #[error("Failed to read store configuration: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A price or currency could not be parsed
    #[error(transparent)]
    Price(#[from] PriceError),

    /// The promo code table is invalid
    #[error(transparent)]
    PromoTable(#[from] PromoTableError),

    /// A sample cart line is invalid
    #[error(transparent)]
    Item(#[from] ItemError),

    /// The sample cart mixes currencies
    #[error(transparent)]
    Cart(#[from] CartError),

    /// An amount is not in the store currency (what, found, expected)
    #[error("{0} has currency {1}, but the store uses {2}")]
    CurrencyMismatch(&'static str, &'static str, &'static str),

    /// Two branches share an id
    #[error("Duplicate branch id: {0}")]
    DuplicateBranch(String),

    /// The `WhatsApp` number must be digits only, in international form
    #[error("Invalid WhatsApp number: {0}")]
    InvalidWhatsAppNumber(String),
}

#[derive(Debug, Deserialize)]
struct StoreFixture {
    store: StoreSection,
    bank: BankDetails,
    #[serde(default)]
    promo_codes: FxHashMap<String, String>,
    #[serde(default)]
    branches: Vec<Branch>,
    #[serde(default)]
    districts: Vec<String>,
    #[serde(default)]
    cart: Vec<CartItemFixture>,
}

#[derive(Debug, Deserialize)]
struct StoreSection {
    name: String,
    currency: String,
    shipping_fee: Option<String>,
    whatsapp_number: String,
}

#[derive(Debug, Deserialize)]
struct CartItemFixture {
    id: u32,
    name: String,
    quantity: u32,
    price: String,
    #[serde(default)]
    image: String,
}

/// Immutable store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    name: String,
    currency: &'static Currency,
    shipping_fee: Amount,
    whatsapp_number: String,
    bank: BankDetails,
    promo_codes: PromoCodeTable,
    branches: Vec<Branch>,
    districts: Vec<String>,
    cart: Cart,
}

impl StoreConfig {
    /// Parse the configuration shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in YAML is invalid.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_yaml(BUILTIN_STORE_YAML)
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        debug!(path = %path.display(), "loading store configuration");

        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Parse a configuration from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a price is invalid, amounts are not in the
    /// store currency, a promo code or branch id is duplicated, or the `WhatsApp` number is
    /// not all digits.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let fixture: StoreFixture = serde_norway::from_str(contents)?;

        fixture.try_into()
    }

    /// Store display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store currency
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Flat shipping fee applied to every order
    pub fn shipping_fee(&self) -> Amount {
        self.shipping_fee
    }

    /// `WhatsApp` number payment slips are sent to
    pub fn whatsapp_number(&self) -> &str {
        &self.whatsapp_number
    }

    /// Bank account for transfers
    pub fn bank(&self) -> &BankDetails {
        &self.bank
    }

    /// Promo code lookup table
    pub fn promo_codes(&self) -> &PromoCodeTable {
        &self.promo_codes
    }

    /// Branches available for store pickup
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Find a pickup branch by id.
    pub fn branch(&self, id: &str) -> Option<&Branch> {
        self.branches.iter().find(|branch| branch.id == id)
    }

    /// Districts offered in the address form
    pub fn districts(&self) -> &[String] {
        &self.districts
    }

    /// Whether `district` is one of the configured districts.
    pub fn has_district(&self, district: &str) -> bool {
        self.districts.iter().any(|known| known == district)
    }

    /// The cart being checked out
    pub fn cart(&self) -> &Cart {
        &self.cart
    }
}

impl TryFrom<StoreFixture> for StoreConfig {
    type Error = ConfigError;

    fn try_from(fixture: StoreFixture) -> Result<Self, Self::Error> {
        let currency = money::currency(&fixture.store.currency)?;

        let shipping_fee = match fixture.store.shipping_fee.as_deref() {
            Some(fee) => in_currency(parse_price(fee)?, currency, "Shipping fee")?,
            None => money::zero(currency),
        };

        let whatsapp_number = fixture.store.whatsapp_number;

        if whatsapp_number.is_empty() || !whatsapp_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidWhatsAppNumber(whatsapp_number));
        }

        let promo_codes = fixture
            .promo_codes
            .iter()
            .map(|(code, price)| Ok((code.as_str(), parse_price(price)?)))
            .collect::<Result<Vec<_>, PriceError>>()?;

        let promo_codes = PromoCodeTable::with_codes(promo_codes, currency)?;

        let mut seen = FxHashSet::default();

        for branch in &fixture.branches {
            if !seen.insert(branch.id.as_str()) {
                return Err(ConfigError::DuplicateBranch(branch.id.clone()));
            }
        }

        let items = fixture
            .cart
            .into_iter()
            .map(|line| {
                let price = parse_price(&line.price)?;

                Ok(CartItem::new(
                    line.id,
                    line.name,
                    line.quantity,
                    price,
                    line.image,
                )?)
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let cart = Cart::with_items(items, currency)?;

        Ok(Self {
            name: fixture.store.name,
            currency,
            shipping_fee,
            whatsapp_number,
            bank: fixture.bank,
            promo_codes,
            branches: fixture.branches,
            districts: fixture.districts,
            cart,
        })
    }
}

fn in_currency(
    amount: Amount,
    currency: &'static Currency,
    what: &'static str,
) -> Result<Amount, ConfigError> {
    if amount.currency() == currency {
        Ok(amount)
    } else {
        Err(ConfigError::CurrencyMismatch(
            what,
            amount.currency().iso_alpha_code,
            currency.iso_alpha_code,
        ))
    }
}
