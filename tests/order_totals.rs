//! Order totals for the storefront's sample cart and the promo code box.

use std::sync::Arc;

use proptest::prelude::*;
use rusty_money::{Money, iso::LKR};
use testresult::TestResult;

use checkout::prelude::*;

fn rupees(amount: i64) -> Amount {
    Money::from_minor(amount * 100, LKR)
}

fn sample_cart() -> Result<Cart, Box<dyn std::error::Error>> {
    Ok(Cart::with_items(
        [
            CartItem::new(1, "Paracetamol 500mg", 2, rupees(450), "paracetamol.png")?,
            CartItem::new(2, "Vitamin C 1000mg", 1, rupees(1200), "vitamin-c.png")?,
            CartItem::new(3, "Digital Thermometer", 1, rupees(2500), "thermometer.png")?,
        ],
        LKR,
    )?)
}

fn promo_table() -> Result<PromoCodeTable, PromoTableError> {
    PromoCodeTable::with_codes([("test", rupees(500))], LKR)
}

#[test]
fn sample_cart_totals_4600_with_free_shipping() -> TestResult {
    let summary = OrderSummary::calculate(&sample_cart()?, rupees(0), None)?;

    assert_eq!(summary.subtotal(), rupees(4600));
    assert_eq!(summary.shipping(), rupees(0));
    assert_eq!(summary.discount(), rupees(0));
    assert_eq!(summary.total(), rupees(4600));

    Ok(())
}

#[test]
fn builtin_store_cart_matches_sample_cart() -> TestResult {
    let config = StoreConfig::builtin()?;

    assert_eq!(config.cart().subtotal()?, sample_cart()?.subtotal()?);

    Ok(())
}

#[test]
fn apply_then_remove_promo() -> TestResult {
    let cart = sample_cart()?;
    let table = promo_table()?;
    let mut entry = PromoCodeEntry::new();

    assert_eq!(entry.apply_code("test", &table)?, rupees(500));
    assert_eq!(
        OrderSummary::calculate(&cart, rupees(0), entry.discount())?.total(),
        rupees(4100)
    );
    assert_eq!(
        entry.message().map(ToString::to_string).as_deref(),
        Some("Promo code applied! You saved Rs. 500")
    );

    entry.remove();

    assert_eq!(entry.discount(), None);
    assert!(entry.message().is_none());
    assert_eq!(
        OrderSummary::calculate(&cart, rupees(0), entry.discount())?.total(),
        rupees(4600)
    );

    Ok(())
}

#[test]
fn second_code_is_rejected_while_one_is_applied() -> TestResult {
    let table = promo_table()?;
    let mut entry = PromoCodeEntry::new();

    entry.apply_code("TEST", &table)?;

    assert_eq!(
        entry.apply_code("test", &table),
        Err(PromoCodeError::AlreadyApplied)
    );
    assert_eq!(entry.discount(), Some(rupees(500)));

    Ok(())
}

#[test]
fn unknown_code_leaves_discount_at_zero() -> TestResult {
    let cart = sample_cart()?;
    let table = promo_table()?;
    let mut entry = PromoCodeEntry::new();

    assert_eq!(
        entry.apply_code("SAVE50", &table),
        Err(PromoCodeError::Invalid)
    );
    assert_eq!(
        entry.message().map(ToString::to_string).as_deref(),
        Some("Invalid promo code")
    );
    assert_eq!(
        OrderSummary::calculate(&cart, rupees(0), entry.discount())?.discount(),
        rupees(0)
    );

    Ok(())
}

#[test]
fn blank_code_asks_for_input() -> TestResult {
    let table = promo_table()?;
    let mut entry = PromoCodeEntry::new();

    entry.set_input("   ");

    assert_eq!(entry.apply(&table), Err(PromoCodeError::Empty));
    assert_eq!(
        entry.message().map(ToString::to_string).as_deref(),
        Some("Please enter a promo code")
    );

    Ok(())
}

#[test]
fn oversized_discount_bottoms_out_at_zero() -> TestResult {
    let summary = OrderSummary::from_parts(rupees(300), rupees(50), Some(rupees(1000)))?;

    assert_eq!(summary.discount(), rupees(350));
    assert_eq!(summary.total(), rupees(0));

    Ok(())
}

#[test]
fn live_summary_and_handoff_differ_only_by_discount() -> TestResult {
    let mut checkout = CheckoutScreen::new(Arc::new(StoreConfig::builtin()?));

    checkout.apply_promo_code("test")?;

    let live = checkout.order_summary()?;
    let handoff = checkout.confirm()?;

    assert_eq!(live.subtotal(), handoff.subtotal());
    assert_eq!(live.total(), rupees(4100));
    assert_eq!(handoff.total(), rupees(4600));

    Ok(())
}

proptest! {
    #[test]
    fn total_is_subtotal_plus_shipping_minus_discount(
        subtotal in 0_i64..1_000_000_000,
        shipping in 0_i64..10_000_000,
        discount_permille in 0_i64..=1000,
    ) {
        let discount = (subtotal + shipping) * discount_permille / 1000;

        let summary = OrderSummary::from_parts(
            Money::from_minor(subtotal, LKR),
            Money::from_minor(shipping, LKR),
            Some(Money::from_minor(discount, LKR)),
        );

        prop_assert!(summary.is_ok());

        if let Ok(summary) = summary {
            prop_assert_eq!(
                summary.total().to_minor_units(),
                subtotal + shipping - discount
            );
        }
    }

    #[test]
    fn total_is_never_negative(
        subtotal in 0_i64..1_000_000,
        shipping in 0_i64..100_000,
        discount in 0_i64..10_000_000,
    ) {
        let summary = OrderSummary::from_parts(
            Money::from_minor(subtotal, LKR),
            Money::from_minor(shipping, LKR),
            Some(Money::from_minor(discount, LKR)),
        );

        prop_assert!(summary.is_ok());

        if let Ok(summary) = summary {
            prop_assert!(summary.total().to_minor_units() >= 0);
            prop_assert!(summary.discount().to_minor_units() <= subtotal + shipping);
        }
    }
}
