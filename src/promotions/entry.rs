//! Promo code entry
//!
//! The `NoPromo → Applied` state machine behind the promo code box, together with the
//! text the customer has typed and the last message shown to them.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    money::{Amount, format_amount},
    promotions::{PromoCode, PromoCodeTable},
};

/// Reasons a promo code is not applied. The `Display` text is shown to the customer.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PromoCodeError {
    /// Nothing was entered.
    #[error("Please enter a promo code")]
    Empty,

    /// A code is already active; codes don't stack.
    #[error("A promo code is already applied")]
    AlreadyApplied,

    /// The code is not in the table.
    #[error("Invalid promo code")]
    Invalid,
}

/// Whether a promo code is active.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PromoState {
    /// No code applied.
    #[default]
    NoPromo,

    /// A code is applied with its fixed discount.
    Applied {
        /// The applied code
        code: PromoCode,

        /// Discount granted by the code
        discount: Amount,
    },
}

impl PromoState {
    /// Discount currently granted, if any.
    pub fn discount(&self) -> Option<Amount> {
        match self {
            PromoState::NoPromo => None,
            PromoState::Applied { discount, .. } => Some(*discount),
        }
    }
}

/// The message shown under the promo code box.
#[derive(Clone, Debug, PartialEq)]
pub enum PromoMessage {
    /// The last attempt was rejected.
    Rejected(PromoCodeError),

    /// The last attempt succeeded.
    Applied {
        /// Amount saved by the code
        savings: Amount,
    },
}

impl PromoMessage {
    /// Whether this message reports a rejection.
    pub fn is_error(&self) -> bool {
        matches!(self, PromoMessage::Rejected(_))
    }
}

impl fmt::Display for PromoMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromoMessage::Rejected(error) => write!(f, "{error}"),
            PromoMessage::Applied { savings } => write!(
                f,
                "Promo code applied! You saved {}",
                format_amount(savings)
            ),
        }
    }
}

/// Promo code box state for one checkout session.
#[derive(Clone, Debug, Default)]
pub struct PromoCodeEntry {
    input: String,
    state: PromoState,
    message: Option<PromoMessage>,
}

impl PromoCodeEntry {
    /// Fresh entry with no code applied.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the typed text. Editing clears a previous rejection.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();

        if self.message.as_ref().is_some_and(PromoMessage::is_error) {
            self.message = None;
        }
    }

    /// Apply whatever is in the input buffer.
    ///
    /// On success the input is cleared and the discount is returned. On failure the state
    /// is left untouched and the reason is both returned and kept as the current message.
    ///
    /// # Errors
    ///
    /// - [`PromoCodeError::Empty`]: the input is blank.
    /// - [`PromoCodeError::AlreadyApplied`]: another code is active.
    /// - [`PromoCodeError::Invalid`]: the code isn't in `table`.
    pub fn apply(&mut self, table: &PromoCodeTable) -> Result<Amount, PromoCodeError> {
        match self.try_apply(table) {
            Ok((code, discount)) => {
                info!(code = code.as_str(), discount = %discount, "promo code applied");

                self.state = PromoState::Applied { code, discount };
                self.message = Some(PromoMessage::Applied { savings: discount });
                self.input.clear();

                Ok(discount)
            }
            Err(error) => {
                debug!(input = %self.input, %error, "promo code rejected");

                self.message = Some(PromoMessage::Rejected(error));

                Err(error)
            }
        }
    }

    /// Type `code` into the box and apply it.
    ///
    /// # Errors
    ///
    /// See [`PromoCodeEntry::apply`].
    pub fn apply_code(
        &mut self,
        code: &str,
        table: &PromoCodeTable,
    ) -> Result<Amount, PromoCodeError> {
        self.set_input(code);
        self.apply(table)
    }

    fn try_apply(&self, table: &PromoCodeTable) -> Result<(PromoCode, Amount), PromoCodeError> {
        let code = PromoCode::parse(&self.input).ok_or(PromoCodeError::Empty)?;

        if matches!(self.state, PromoState::Applied { .. }) {
            return Err(PromoCodeError::AlreadyApplied);
        }

        let discount = table.discount_for(&code).ok_or(PromoCodeError::Invalid)?;

        Ok((code, discount))
    }

    /// Drop the active code, if any, and clear all messages.
    pub fn remove(&mut self) {
        if let PromoState::Applied { code, .. } = &self.state {
            info!(code = code.as_str(), "promo code removed");
        }

        self.state = PromoState::NoPromo;
        self.message = None;
    }

    /// Text currently typed in the box.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current state.
    pub fn state(&self) -> &PromoState {
        &self.state
    }

    /// The applied code, if any.
    pub fn applied_code(&self) -> Option<&PromoCode> {
        match &self.state {
            PromoState::NoPromo => None,
            PromoState::Applied { code, .. } => Some(code),
        }
    }

    /// Discount currently granted, if any.
    pub fn discount(&self) -> Option<Amount> {
        self.state.discount()
    }

    /// Last message for the customer, if any.
    pub fn message(&self) -> Option<&PromoMessage> {
        self.message.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::LKR};
    use testresult::TestResult;

    use super::*;

    fn table() -> Result<PromoCodeTable, crate::promotions::PromoTableError> {
        PromoCodeTable::with_codes([("test", Money::from_minor(50_000, LKR))], LKR)
    }

    #[test]
    fn apply_valid_code_moves_to_applied() -> TestResult {
        let table = table()?;
        let mut entry = PromoCodeEntry::new();

        let discount = entry.apply_code(" TEST ", &table)?;

        assert_eq!(discount, Money::from_minor(50_000, LKR));
        assert_eq!(entry.discount(), Some(discount));
        assert_eq!(
            entry.applied_code().map(ToString::to_string).as_deref(),
            Some("TEST")
        );
        assert_eq!(entry.input(), "");
        assert_eq!(
            entry.message().map(ToString::to_string).as_deref(),
            Some("Promo code applied! You saved Rs. 500")
        );

        Ok(())
    }

    #[test]
    fn apply_twice_is_rejected() -> TestResult {
        let table = table()?;
        let mut entry = PromoCodeEntry::new();

        entry.apply_code("test", &table)?;
        let second = entry.apply_code("test", &table);

        assert_eq!(second, Err(PromoCodeError::AlreadyApplied));
        assert_eq!(entry.discount(), Some(Money::from_minor(50_000, LKR)));
        assert_eq!(
            entry.message(),
            Some(&PromoMessage::Rejected(PromoCodeError::AlreadyApplied))
        );
        assert_eq!(entry.input(), "test");

        Ok(())
    }

    #[test]
    fn apply_empty_code_reports_empty_before_already_applied() -> TestResult {
        let table = table()?;
        let mut entry = PromoCodeEntry::new();

        assert_eq!(entry.apply_code("   ", &table), Err(PromoCodeError::Empty));

        entry.apply_code("test", &table)?;

        assert_eq!(entry.apply(&table), Err(PromoCodeError::Empty));
        assert_eq!(
            entry.message().map(ToString::to_string).as_deref(),
            Some("Please enter a promo code")
        );

        Ok(())
    }

    #[test]
    fn apply_unknown_code_is_invalid() -> TestResult {
        let table = table()?;
        let mut entry = PromoCodeEntry::new();

        assert_eq!(
            entry.apply_code("SAVE50", &table),
            Err(PromoCodeError::Invalid)
        );
        assert_eq!(entry.state(), &PromoState::NoPromo);
        assert_eq!(entry.discount(), None);
        assert_eq!(
            entry.message().map(ToString::to_string).as_deref(),
            Some("Invalid promo code")
        );

        Ok(())
    }

    #[test]
    fn editing_input_clears_rejection_but_not_success() -> TestResult {
        let table = table()?;
        let mut entry = PromoCodeEntry::new();

        let _rejected = entry.apply_code("nope", &table);
        entry.set_input("tes");

        assert_eq!(entry.message(), None);

        entry.apply_code("test", &table)?;
        entry.set_input("x");

        assert!(matches!(entry.message(), Some(PromoMessage::Applied { .. })));

        Ok(())
    }

    #[test]
    fn remove_resets_discount_and_messages() -> TestResult {
        let table = table()?;
        let mut entry = PromoCodeEntry::new();

        entry.apply_code("test", &table)?;
        entry.remove();

        assert_eq!(entry.state(), &PromoState::NoPromo);
        assert_eq!(entry.discount(), None);
        assert_eq!(entry.message(), None);

        // A code can be applied again after removal.
        assert_eq!(
            entry.apply_code("test", &table),
            Ok(Money::from_minor(50_000, LKR))
        );

        Ok(())
    }

    #[test]
    fn remove_without_promo_is_a_no_op() {
        let mut entry = PromoCodeEntry::new();

        entry.remove();

        assert_eq!(entry.state(), &PromoState::NoPromo);
    }
}
