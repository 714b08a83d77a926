//! Card details form

/// Longest card number the form accepts, in digits.
const MAX_CARD_DIGITS: usize = 16;

/// Format a card number as groups of four digits, e.g. `4242 4242 4242 4242`.
///
/// Non-digits are dropped and at most 16 digits are kept. Input with fewer than four
/// digits is returned unchanged so partial typing isn't disturbed.
pub fn format_card_number(value: &str) -> String {
    let digits: Vec<char> = value.chars().filter(char::is_ascii_digit).collect();

    if digits.len() < 4 {
        return value.to_string();
    }

    digits
        .chunks(4)
        .take(MAX_CARD_DIGITS / 4)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a card expiry as `MM/YY` once two digits have been typed.
pub fn format_expiry(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();

    if digits.len() < 2 {
        return digits;
    }

    let month: String = digits.chars().take(2).collect();
    let year: String = digits.chars().skip(2).take(2).collect();

    format!("{month}/{year}")
}

/// The card form shown for card payments. Entered values are formatted as they're set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardForm {
    number: String,
    expiry: String,
    cvv: String,
    name: String,
}

impl CardForm {
    /// Set the card number.
    pub fn set_number(&mut self, value: &str) {
        self.number = format_card_number(value);
    }

    /// Set the expiry date.
    pub fn set_expiry(&mut self, value: &str) {
        self.expiry = format_expiry(value);
    }

    /// Set the security code. Only the first four digits are kept.
    pub fn set_cvv(&mut self, value: &str) {
        self.cvv = value.chars().filter(char::is_ascii_digit).take(4).collect();
    }

    /// Set the cardholder name.
    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    /// Formatted card number
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Formatted expiry
    pub fn expiry(&self) -> &str {
        &self.expiry
    }

    /// Security code
    pub fn cvv(&self) -> &str {
        &self.cvv
    }

    /// Cardholder name
    pub fn name(&self) -> &str {
        &self.name
    }
}
