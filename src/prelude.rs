//! Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    checkout::{
        CheckoutError, CheckoutScreen,
        delivery::{Branch, DeliveryOption},
        form::{Address, BillingAddress, BillingDetails, CheckoutForm, ContactInfo, FormField},
    },
    flow::{CheckoutFlow, FlowError, Screen},
    items::{CartItem, ItemError},
    money::{Amount, PriceError, format_amount, parse_price},
    payment::{
        OrderOutcome, PaymentMethod, PaymentScreen, PaymentStage, PlaceOrderError,
        bank::{BankDetails, BankField, Clipboard, CopyFeedback, MemoryClipboard},
        card::{CardForm, format_card_number, format_expiry},
    },
    pricing::{TotalPriceError, total_price},
    promotions::{
        PromoCode, PromoCodeTable, PromoTableError,
        entry::{PromoCodeEntry, PromoCodeError, PromoMessage, PromoState},
    },
    store::{ConfigError, StoreConfig},
    summary::{OrderSummary, SummaryError},
};
