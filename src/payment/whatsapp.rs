//! `WhatsApp` deep link for bank transfer slips

use crate::money::{Amount, format_amount};

/// Message sent with the payment slip.
pub fn transfer_message(store_name: &str, total: &Amount, account_number: &str) -> String {
    format!(
        "Hi {store_name}! 👋\n\n\
         I've made a bank transfer payment for my order.\n\n\
         💰 Order Total: {}\n\
         🏦 Transferred to: {account_number}\n\n\
         Please find my payment slip attached.\n\n\
         Thank you! 🙏",
        format_amount(total)
    )
}

/// `https://wa.me/<number>?text=<message>` with the message percent-encoded.
pub fn whatsapp_link(number: &str, message: &str) -> String {
    format!("https://wa.me/{number}?text={}", urlencoding::encode(message))
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::LKR};

    use super::*;

    #[test]
    fn message_lists_total_and_account() {
        let message = transfer_message(
            "MediCare Pharmacy",
            &Money::from_minor(460_000, LKR),
            "85674523120",
        );

        assert_eq!(
            message,
            "Hi MediCare Pharmacy! 👋\n\nI've made a bank transfer payment for my order.\n\n\
             💰 Order Total: Rs. 4,600\n🏦 Transferred to: 85674523120\n\n\
             Please find my payment slip attached.\n\nThank you! 🙏"
        );
    }

    #[test]
    fn link_percent_encodes_message() {
        let link = whatsapp_link("94779898765", "Hi there!\nRs. 4,600");

        assert_eq!(
            link,
            "https://wa.me/94779898765?text=Hi%20there%21%0ARs.%204%2C600"
        );
    }

    #[test]
    fn link_encodes_emoji_as_utf8() {
        let link = whatsapp_link("1", "👋");

        assert_eq!(link, "https://wa.me/1?text=%F0%9F%91%8B");
    }
}
