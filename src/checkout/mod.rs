//! Checkout screen
//!
//! Collects contact, shipping and billing details and the delivery preference, shows the
//! live order summary with its promo code box, and on confirmation produces the summary
//! handed to the payment screen.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cart::Cart,
    checkout::{
        delivery::{Branch, DeliveryOption},
        form::{CheckoutForm, FormField},
    },
    money::Amount,
    promotions::entry::{PromoCodeEntry, PromoCodeError},
    store::StoreConfig,
    summary::{OrderSummary, SummaryError},
};

pub mod delivery;
pub mod form;

/// Errors raised by checkout form interactions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// No form field has this name.
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    /// Billing fields can't be edited while billing follows shipping.
    #[error("Field {0} is hidden while billing is the same as shipping")]
    BillingSameAsShipping(&'static str),

    /// The district is not in the configured list.
    #[error("Unknown district: {0}")]
    UnknownDistrict(String),

    /// No branch has this id.
    #[error("Unknown branch: {0}")]
    UnknownBranch(String),

    /// A branch can only be chosen for store pickup.
    #[error("Store pickup is not selected")]
    PickupNotSelected,
}

/// State of the checkout screen for one session.
#[derive(Debug)]
pub struct CheckoutScreen {
    config: Arc<StoreConfig>,
    form: CheckoutForm,
    delivery: DeliveryOption,
    hidden_branch: Option<String>,
    promo: PromoCodeEntry,
}

impl CheckoutScreen {
    /// A blank checkout screen for the configured cart.
    pub fn new(config: Arc<StoreConfig>) -> Self {
        Self {
            config,
            form: CheckoutForm::default(),
            delivery: DeliveryOption::default(),
            hidden_branch: None,
            promo: PromoCodeEntry::new(),
        }
    }

    /// Set a form field.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::UnknownDistrict`]: a district field is set to a value outside the
    ///   configured list (blank clears it).
    /// - [`CheckoutError::BillingSameAsShipping`]: a billing field while billing follows
    ///   shipping.
    pub fn set_field(
        &mut self,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<(), CheckoutError> {
        let value = value.into();

        if field.is_district() && !value.is_empty() && !self.config.has_district(&value) {
            return Err(CheckoutError::UnknownDistrict(value));
        }

        self.form.set_field(field, value)
    }

    /// Set a form field by its input name, e.g. `"postalCode"`.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::UnknownField`] for an unknown name, otherwise as
    /// [`CheckoutScreen::set_field`].
    pub fn set_field_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), CheckoutError> {
        self.set_field(name.parse()?, value)
    }

    /// Toggle "same as shipping address".
    pub fn set_same_as_shipping(&mut self, same: bool) {
        self.form.set_same_as_shipping(same);
    }

    /// The form as typed so far.
    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    /// Deliver to the shipping address. A chosen pickup branch is remembered for when
    /// pickup is chosen again.
    pub fn choose_home_delivery(&mut self) {
        if let DeliveryOption::StorePickup { branch } = &mut self.delivery {
            self.hidden_branch = branch.take();
        }

        self.delivery = DeliveryOption::HomeDelivery;
    }

    /// Collect from a branch. Keeps a branch already chosen.
    pub fn choose_store_pickup(&mut self) {
        if !self.delivery.is_pickup() {
            self.delivery = DeliveryOption::StorePickup {
                branch: self.hidden_branch.take(),
            };
        }
    }

    /// Choose the pickup branch.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::PickupNotSelected`]: delivery is not store pickup.
    /// - [`CheckoutError::UnknownBranch`]: no configured branch has this id.
    pub fn select_branch(&mut self, id: &str) -> Result<&Branch, CheckoutError> {
        let DeliveryOption::StorePickup { branch } = &mut self.delivery else {
            return Err(CheckoutError::PickupNotSelected);
        };

        let found = self
            .config
            .branch(id)
            .ok_or_else(|| CheckoutError::UnknownBranch(id.to_string()))?;

        debug!(branch = id, "pickup branch selected");

        *branch = Some(found.id.clone());

        Ok(found)
    }

    /// Current delivery preference.
    pub fn delivery(&self) -> &DeliveryOption {
        &self.delivery
    }

    /// The chosen pickup branch, resolved against the configured list.
    pub fn selected_branch(&self) -> Option<&Branch> {
        self.delivery
            .branch_id()
            .and_then(|id| self.config.branch(id))
    }

    /// Type into the promo code box.
    pub fn set_promo_input(&mut self, text: impl Into<String>) {
        self.promo.set_input(text);
    }

    /// Apply the code in the promo box.
    ///
    /// # Errors
    ///
    /// See [`PromoCodeEntry::apply`].
    pub fn apply_promo(&mut self) -> Result<Amount, PromoCodeError> {
        self.promo.apply(self.config.promo_codes())
    }

    /// Type `code` into the promo box and apply it.
    ///
    /// # Errors
    ///
    /// See [`PromoCodeEntry::apply`].
    pub fn apply_promo_code(&mut self, code: &str) -> Result<Amount, PromoCodeError> {
        self.promo.apply_code(code, self.config.promo_codes())
    }

    /// Remove the applied promo code.
    pub fn remove_promo(&mut self) {
        self.promo.remove();
    }

    /// Promo code box state.
    pub fn promo(&self) -> &PromoCodeEntry {
        &self.promo
    }

    /// The cart being checked out.
    pub fn cart(&self) -> &Cart {
        self.config.cart()
    }

    /// Store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The summary shown beside the form, including any applied promo code.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if the totals can't be computed.
    pub fn order_summary(&self) -> Result<OrderSummary, SummaryError> {
        OrderSummary::calculate(
            self.config.cart(),
            self.config.shipping_fee(),
            self.promo.discount(),
        )
    }

    /// Confirm the order details and produce the summary for the payment screen.
    ///
    /// The handoff carries the cart subtotal and the store shipping fee with no discount;
    /// the promo box only affects the summary shown on this screen.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if the totals can't be computed.
    pub fn confirm(&self) -> Result<OrderSummary, SummaryError> {
        let summary =
            OrderSummary::calculate(self.config.cart(), self.config.shipping_fee(), None)?;

        info!(total = %summary.total(), "checkout confirmed");

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::LKR};
    use testresult::TestResult;

    use super::*;

    fn screen() -> Result<CheckoutScreen, crate::store::ConfigError> {
        Ok(CheckoutScreen::new(Arc::new(StoreConfig::builtin()?)))
    }

    fn rupees(amount: i64) -> Amount {
        Money::from_minor(amount * 100, LKR)
    }

    #[test]
    fn live_summary_follows_promo_state() -> TestResult {
        let mut screen = screen()?;

        assert_eq!(screen.order_summary()?.total(), rupees(4600));

        screen.apply_promo_code("test")?;
        assert_eq!(screen.order_summary()?.total(), rupees(4100));

        screen.remove_promo();
        assert_eq!(screen.order_summary()?.total(), rupees(4600));

        Ok(())
    }

    #[test]
    fn confirm_hands_off_undiscounted_summary() -> TestResult {
        let mut screen = screen()?;

        screen.apply_promo_code("test")?;
        let summary = screen.confirm()?;

        assert_eq!(summary.subtotal(), rupees(4600));
        assert_eq!(summary.shipping(), rupees(0));
        assert_eq!(summary.discount(), rupees(0));
        assert_eq!(summary.total(), rupees(4600));

        Ok(())
    }

    #[test]
    fn apply_promo_uses_typed_input() -> TestResult {
        let mut screen = screen()?;

        screen.set_promo_input("  Test ");

        assert_eq!(screen.apply_promo()?, rupees(500));
        assert_eq!(screen.promo().input(), "");

        Ok(())
    }

    #[test]
    fn district_must_be_configured() -> TestResult {
        let mut screen = screen()?;

        screen.set_field(FormField::District, "Kandy")?;
        screen.set_field(FormField::District, "")?;

        assert_eq!(
            screen.set_field(FormField::District, "Atlantis"),
            Err(CheckoutError::UnknownDistrict("Atlantis".to_string()))
        );

        Ok(())
    }

    #[test]
    fn set_field_by_name_uses_input_names() -> TestResult {
        let mut screen = screen()?;

        screen.set_field_by_name("email", "john@example.com")?;

        assert_eq!(screen.form().contact.email, "john@example.com");
        assert!(matches!(
            screen.set_field_by_name("fax", "1"),
            Err(CheckoutError::UnknownField(_))
        ));

        Ok(())
    }

    #[test]
    fn branch_requires_pickup() -> TestResult {
        let mut screen = screen()?;

        assert!(matches!(
            screen.select_branch("col-01"),
            Err(CheckoutError::PickupNotSelected)
        ));

        screen.choose_store_pickup();

        assert_eq!(screen.select_branch("col-03")?.name, "MediCare Colombo - Kollupitiya");
        assert_eq!(
            screen.selected_branch().map(|branch| branch.address.as_str()),
            Some("123 Galle Road, Colombo 03")
        );

        Ok(())
    }

    #[test]
    fn unknown_branch_keeps_previous_choice() -> TestResult {
        let mut screen = screen()?;

        screen.choose_store_pickup();
        screen.select_branch("gal-01")?;

        assert!(matches!(
            screen.select_branch("mars-01"),
            Err(CheckoutError::UnknownBranch(id)) if id == "mars-01"
        ));
        assert_eq!(screen.delivery().branch_id(), Some("gal-01"));

        Ok(())
    }

    #[test]
    fn home_delivery_remembers_branch_for_pickup() -> TestResult {
        let mut screen = screen()?;

        screen.choose_store_pickup();
        screen.select_branch("neg-01")?;
        screen.choose_store_pickup();

        assert_eq!(screen.delivery().branch_id(), Some("neg-01"));

        screen.choose_home_delivery();

        assert_eq!(screen.delivery(), &DeliveryOption::HomeDelivery);
        assert!(screen.selected_branch().is_none());

        screen.choose_store_pickup();

        assert_eq!(screen.delivery().branch_id(), Some("neg-01"));

        Ok(())
    }
}
