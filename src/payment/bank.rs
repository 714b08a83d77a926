//! Bank transfer details

use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::debug;

/// How long a field shows as copied after a copy.
pub const COPY_FEEDBACK_WINDOW: Duration = Duration::from_secs(2);

/// The account customers transfer to.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BankDetails {
    /// Bank name
    pub bank_name: String,

    /// Account holder
    pub account_name: String,

    /// Account number
    pub account_number: String,

    /// Bank branch
    pub branch: String,

    /// SWIFT code
    pub swift_code: String,
}

/// A bank detail the customer can copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BankField {
    /// Account holder
    AccountName,
    /// Account number
    AccountNumber,
    /// SWIFT code
    SwiftCode,
}

impl BankDetails {
    /// The value of a copyable field.
    pub fn value(&self, field: BankField) -> &str {
        match field {
            BankField::AccountName => &self.account_name,
            BankField::AccountNumber => &self.account_number,
            BankField::SwiftCode => &self.swift_code,
        }
    }
}

/// Somewhere copied text goes. Writes are fire-and-forget.
pub trait Clipboard {
    /// Replace the clipboard contents.
    fn write_text(&mut self, text: &str);
}

/// In-memory clipboard.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    /// Last text written, if any.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) {
        self.contents = Some(text.to_string());
    }
}

/// Tracks which field was copied last and when, so the "copied" tick can fade.
#[derive(Clone, Copy, Debug, Default)]
pub struct CopyFeedback {
    last: Option<(BankField, Instant)>,
}

impl CopyFeedback {
    /// Copy `field` from `bank` into `clipboard` and mark it copied as of `now`.
    pub fn copy(
        &mut self,
        bank: &BankDetails,
        field: BankField,
        clipboard: &mut impl Clipboard,
        now: Instant,
    ) {
        clipboard.write_text(bank.value(field));

        debug!(?field, "bank detail copied");

        self.last = Some((field, now));
    }

    /// The field still showing as copied at `now`.
    pub fn copied_field(&self, now: Instant) -> Option<BankField> {
        let (field, at) = self.last?;

        (now.saturating_duration_since(at) < COPY_FEEDBACK_WINDOW).then_some(field)
    }
}
