//! Payment screen
//!
//! Shows the summary handed over from checkout, lets the customer pick a payment method
//! and place the order. Bank transfers open an instructions view with copyable account
//! details and a `WhatsApp` link for sending the payment slip.

use std::{fmt, sync::Arc, time::Instant};

use clap::ValueEnum;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    money::format_amount,
    payment::{
        bank::{BankDetails, BankField, Clipboard, CopyFeedback},
        card::CardForm,
        whatsapp::{transfer_message, whatsapp_link},
    },
    store::StoreConfig,
    summary::OrderSummary,
};

pub mod bank;
pub mod card;
pub mod whatsapp;

/// How the customer pays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum PaymentMethod {
    /// `PayHere` online gateway
    #[value(name = "payhere")]
    PayHere,

    /// Card payment via Stripe
    Stripe,

    /// Direct bank transfer
    #[value(name = "bank")]
    BankTransfer,

    /// Cash on delivery
    #[value(name = "cod")]
    CashOnDelivery,
}

impl PaymentMethod {
    /// Every method, in the order the screen lists them.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::PayHere,
        PaymentMethod::Stripe,
        PaymentMethod::BankTransfer,
        PaymentMethod::CashOnDelivery,
    ];

    /// Short identifier, e.g. `"cod"`.
    pub fn id(self) -> &'static str {
        match self {
            PaymentMethod::PayHere => "payhere",
            PaymentMethod::Stripe => "stripe",
            PaymentMethod::BankTransfer => "bank",
            PaymentMethod::CashOnDelivery => "cod",
        }
    }

    /// Label shown next to the option.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::PayHere => "PayHere",
            PaymentMethod::Stripe => "Credit / Debit Card",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }

    /// Text on the submit button.
    pub fn action_label(self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer | PaymentMethod::CashOnDelivery => "Place Order",
            PaymentMethod::PayHere | PaymentMethod::Stripe => "Pay Now",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id().to_uppercase())
    }
}

/// Where the payment screen is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaymentStage {
    /// Choosing a method.
    #[default]
    Selecting,

    /// Bank transfer instructions are open.
    BankTransferInstructions,

    /// The order went through with this method.
    Placed(PaymentMethod),
}

/// Result of pressing the submit button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderOutcome {
    /// Order placed; `message` is the confirmation shown to the customer.
    Placed {
        /// Method used
        method: PaymentMethod,
        /// Confirmation text
        message: String,
    },

    /// Bank transfer chosen; the instructions view is now open.
    AwaitingBankTransfer,
}

/// Errors raised when placing an order.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOrderError {
    /// Submit pressed before choosing a method.
    #[error("Please select a payment method")]
    NoPaymentMethod,
}

/// State of the payment screen.
#[derive(Debug)]
pub struct PaymentScreen {
    summary: OrderSummary,
    config: Arc<StoreConfig>,
    selected: Option<PaymentMethod>,
    stage: PaymentStage,
    card: CardForm,
    copy_feedback: CopyFeedback,
}

impl PaymentScreen {
    /// Open the payment screen for a confirmed summary.
    pub fn new(summary: OrderSummary, config: Arc<StoreConfig>) -> Self {
        Self {
            summary,
            config,
            selected: None,
            stage: PaymentStage::Selecting,
            card: CardForm::default(),
            copy_feedback: CopyFeedback::default(),
        }
    }

    /// The summary received from checkout.
    pub fn summary(&self) -> &OrderSummary {
        &self.summary
    }

    /// Choose a payment method.
    pub fn select(&mut self, method: PaymentMethod) {
        debug!(method = method.id(), "payment method selected");

        self.selected = Some(method);
    }

    /// The chosen method, if any.
    pub fn selected(&self) -> Option<PaymentMethod> {
        self.selected
    }

    /// Current stage.
    pub fn stage(&self) -> PaymentStage {
        self.stage
    }

    /// Text on the submit button. Defaults to "Pay Now" until a method is chosen.
    pub fn action_label(&self) -> &'static str {
        self.selected.map_or("Pay Now", PaymentMethod::action_label)
    }

    /// Press the submit button.
    ///
    /// Bank transfer opens the instructions view; any other method places the order.
    ///
    /// # Errors
    ///
    /// [`PlaceOrderError::NoPaymentMethod`] when no method has been chosen.
    pub fn place_order(&mut self) -> Result<OrderOutcome, PlaceOrderError> {
        let method = self.selected.ok_or(PlaceOrderError::NoPaymentMethod)?;

        if method == PaymentMethod::BankTransfer {
            info!("showing bank transfer instructions");

            self.stage = PaymentStage::BankTransferInstructions;

            return Ok(OrderOutcome::AwaitingBankTransfer);
        }

        info!(
            method = method.id(),
            total = %self.summary.total(),
            "order placed"
        );

        self.stage = PaymentStage::Placed(method);

        Ok(OrderOutcome::Placed {
            method,
            message: format!("Order placed successfully with {method}!"),
        })
    }

    /// Close the bank transfer instructions.
    pub fn close_bank_transfer(&mut self) {
        if self.stage == PaymentStage::BankTransferInstructions {
            self.stage = PaymentStage::Selecting;
        }
    }

    /// Account the customer transfers to.
    pub fn bank(&self) -> &BankDetails {
        self.config.bank()
    }

    /// Copy a bank detail to `clipboard`.
    pub fn copy_bank_field(
        &mut self,
        field: BankField,
        clipboard: &mut impl Clipboard,
        now: Instant,
    ) {
        self.copy_feedback.copy(self.config.bank(), field, clipboard, now);
    }

    /// The bank detail still marked as copied at `now`.
    pub fn copied_field(&self, now: Instant) -> Option<BankField> {
        self.copy_feedback.copied_field(now)
    }

    /// Amount to transfer, as shown in the instructions.
    pub fn transfer_amount(&self) -> String {
        format_amount(&self.summary.total())
    }

    /// `WhatsApp` link pre-filled with the payment slip message.
    pub fn whatsapp_link(&self) -> String {
        let message = transfer_message(
            self.config.name(),
            &self.summary.total(),
            &self.config.bank().account_number,
        );

        whatsapp_link(self.config.whatsapp_number(), &message)
    }

    /// Card details form.
    pub fn card(&self) -> &CardForm {
        &self.card
    }

    /// Card details form, for typing into.
    pub fn card_mut(&mut self) -> &mut CardForm {
        &mut self.card
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::{bank::MemoryClipboard, *};

    fn screen() -> Result<PaymentScreen, Box<dyn std::error::Error>> {
        let config = Arc::new(StoreConfig::builtin()?);
        let summary = OrderSummary::calculate(config.cart(), config.shipping_fee(), None)?;

        Ok(PaymentScreen::new(summary, config))
    }

    #[test]
    fn place_order_requires_method() -> TestResult {
        let mut screen = screen()?;

        assert_eq!(screen.place_order(), Err(PlaceOrderError::NoPaymentMethod));
        assert_eq!(screen.stage(), PaymentStage::Selecting);
        assert_eq!(
            PlaceOrderError::NoPaymentMethod.to_string(),
            "Please select a payment method"
        );

        Ok(())
    }

    #[test]
    fn place_order_confirms_with_method_id() -> TestResult {
        let mut screen = screen()?;

        screen.select(PaymentMethod::PayHere);

        assert_eq!(
            screen.place_order()?,
            OrderOutcome::Placed {
                method: PaymentMethod::PayHere,
                message: "Order placed successfully with PAYHERE!".to_string(),
            }
        );
        assert_eq!(screen.stage(), PaymentStage::Placed(PaymentMethod::PayHere));

        Ok(())
    }

    #[test]
    fn cash_on_delivery_message() -> TestResult {
        let mut screen = screen()?;

        screen.select(PaymentMethod::CashOnDelivery);

        let outcome = screen.place_order()?;

        assert!(matches!(
            outcome,
            OrderOutcome::Placed { ref message, .. } if message == "Order placed successfully with COD!"
        ));

        Ok(())
    }

    #[test]
    fn bank_transfer_opens_instructions() -> TestResult {
        let mut screen = screen()?;

        screen.select(PaymentMethod::BankTransfer);

        assert_eq!(screen.place_order()?, OrderOutcome::AwaitingBankTransfer);
        assert_eq!(screen.stage(), PaymentStage::BankTransferInstructions);
        assert_eq!(screen.transfer_amount(), "Rs. 4,600");

        screen.close_bank_transfer();

        assert_eq!(screen.stage(), PaymentStage::Selecting);
        assert_eq!(screen.selected(), Some(PaymentMethod::BankTransfer));

        Ok(())
    }

    #[test]
    fn action_label_follows_method() -> TestResult {
        let mut screen = screen()?;

        assert_eq!(screen.action_label(), "Pay Now");

        screen.select(PaymentMethod::CashOnDelivery);
        assert_eq!(screen.action_label(), "Place Order");

        screen.select(PaymentMethod::BankTransfer);
        assert_eq!(screen.action_label(), "Place Order");

        screen.select(PaymentMethod::Stripe);
        assert_eq!(screen.action_label(), "Pay Now");

        Ok(())
    }

    #[test]
    fn labels_name_each_option() {
        let labels = PaymentMethod::ALL.map(PaymentMethod::label);

        assert_eq!(
            labels,
            [
                "PayHere",
                "Credit / Debit Card",
                "Bank Transfer",
                "Cash on Delivery"
            ]
        );
    }

    #[test]
    fn method_parses_from_cli_id() {
        for method in PaymentMethod::ALL {
            assert_eq!(PaymentMethod::from_str(method.id(), false), Ok(method));
        }
    }

    #[test]
    fn copy_marks_field_briefly() -> TestResult {
        let mut screen = screen()?;
        let mut clipboard = MemoryClipboard::default();
        let now = Instant::now();

        screen.copy_bank_field(BankField::AccountNumber, &mut clipboard, now);

        assert_eq!(clipboard.contents(), Some("85674523120"));
        assert_eq!(screen.copied_field(now), Some(BankField::AccountNumber));
        assert_eq!(screen.copied_field(now + Duration::from_secs(3)), None);

        Ok(())
    }

    #[test]
    fn whatsapp_link_carries_total_and_account() -> TestResult {
        let screen = screen()?;
        let link = screen.whatsapp_link();

        assert!(link.starts_with("https://wa.me/94779898765?text=Hi%20MediCare%20Pharmacy"));
        assert!(link.contains("Rs.%204%2C600"));
        assert!(link.contains("85674523120"));

        Ok(())
    }
}
