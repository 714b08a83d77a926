//! Checkout
//!
//! Order totals, promo codes and the two-screen checkout and payment flow of an online
//! pharmacy storefront.

pub mod cart;
pub mod checkout;
pub mod cli;
pub mod flow;
pub mod items;
pub mod money;
pub mod observability;
pub mod payment;
pub mod prelude;
pub mod pricing;
pub mod promotions;
pub mod store;
pub mod summary;
