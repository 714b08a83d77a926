//! Checkout to payment navigation

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    checkout::CheckoutScreen,
    payment::PaymentScreen,
    store::StoreConfig,
    summary::SummaryError,
};

/// Errors raised while navigating between screens.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Only the checkout screen can continue to payment.
    #[error("Not on the checkout screen")]
    NotOnCheckout,

    /// Wrapped summary error
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// The screen currently showing, with its state.
#[derive(Debug)]
pub enum Screen {
    /// Details and order summary
    Checkout(CheckoutScreen),

    /// Payment method and order placement
    Payment(PaymentScreen),
}

/// Owns the current screen and moves the order summary between them.
#[derive(Debug)]
pub struct CheckoutFlow {
    config: Arc<StoreConfig>,
    screen: Screen,
}

impl CheckoutFlow {
    /// Start on a blank checkout screen.
    pub fn new(config: Arc<StoreConfig>) -> Self {
        let screen = Screen::Checkout(CheckoutScreen::new(Arc::clone(&config)));

        Self { config, screen }
    }

    /// Current screen
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The checkout screen, if showing.
    pub fn checkout(&self) -> Option<&CheckoutScreen> {
        match &self.screen {
            Screen::Checkout(checkout) => Some(checkout),
            Screen::Payment(_) => None,
        }
    }

    /// The checkout screen, if showing.
    pub fn checkout_mut(&mut self) -> Option<&mut CheckoutScreen> {
        match &mut self.screen {
            Screen::Checkout(checkout) => Some(checkout),
            Screen::Payment(_) => None,
        }
    }

    /// The payment screen, if showing.
    pub fn payment(&self) -> Option<&PaymentScreen> {
        match &self.screen {
            Screen::Payment(payment) => Some(payment),
            Screen::Checkout(_) => None,
        }
    }

    /// The payment screen, if showing.
    pub fn payment_mut(&mut self) -> Option<&mut PaymentScreen> {
        match &mut self.screen {
            Screen::Payment(payment) => Some(payment),
            Screen::Checkout(_) => None,
        }
    }

    /// Confirm checkout and move to payment with the confirmed summary.
    ///
    /// # Errors
    ///
    /// - [`FlowError::NotOnCheckout`]: the payment screen is already showing.
    /// - [`FlowError::Summary`]: the summary couldn't be computed; the checkout screen
    ///   stays as it was.
    pub fn continue_to_payment(&mut self) -> Result<(), FlowError> {
        let Screen::Checkout(checkout) = &self.screen else {
            return Err(FlowError::NotOnCheckout);
        };

        let summary = checkout.confirm()?;

        info!(total = %summary.total(), "continuing to payment");

        self.screen = Screen::Payment(PaymentScreen::new(summary, Arc::clone(&self.config)));

        Ok(())
    }

    /// Go back to a fresh checkout screen. Anything typed before is gone.
    /// Does nothing when checkout is already showing.
    pub fn back_to_checkout(&mut self) {
        if let Screen::Payment(_) = self.screen {
            info!("back to checkout");

            self.screen = Screen::Checkout(CheckoutScreen::new(Arc::clone(&self.config)));
        }
    }
}
