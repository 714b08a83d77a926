//! Checkout demo
//!
//! Walks the store's sample cart through checkout and payment, printing the order summary
//! and the outcome.
//!
//! Run with: `cargo run -- --promo test --payment bank`

use std::{
    io::{self, Write},
    sync::Arc,
};

use anyhow::{Result, anyhow};
use clap::Parser;

use checkout::{
    cli::CheckoutArgs,
    flow::CheckoutFlow,
    observability::init_subscriber,
    payment::OrderOutcome,
    store::StoreConfig,
};

/// Checkout demo entry point
pub fn main() -> Result<()> {
    let args = CheckoutArgs::parse();

    init_subscriber(&args.logging)?;

    let config = match &args.config {
        Some(path) => StoreConfig::load(path)?,
        None => StoreConfig::builtin()?,
    };

    let mut flow = CheckoutFlow::new(Arc::new(config));

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let checkout = flow
        .checkout_mut()
        .ok_or(anyhow!("checkout screen not showing"))?;

    writeln!(handle, "{}", checkout.config().name())?;

    if let Some(branch) = &args.pickup {
        checkout.choose_store_pickup();

        let branch = checkout.select_branch(branch)?;

        writeln!(handle, "Pickup: {} ({})", branch.name, branch.address)?;
    }

    if let Some(code) = &args.promo {
        if let Err(error) = checkout.apply_promo_code(code) {
            writeln!(handle, "{error}")?;
        } else if let Some(message) = checkout.promo().message() {
            writeln!(handle, "{message}")?;
        }
    }

    checkout
        .order_summary()?
        .write_to(&mut handle, checkout.cart())?;

    flow.continue_to_payment()?;

    let payment = flow
        .payment_mut()
        .ok_or(anyhow!("payment screen not showing"))?;

    writeln!(handle, "\nPayment")?;

    for (label, value) in payment.summary().lines() {
        writeln!(handle, " {label:<10}{value:>20}")?;
    }

    if let Some(method) = args.payment {
        payment.select(method);

        writeln!(handle, "\nPaying with {}", method.label())?;
    }

    match payment.place_order() {
        Ok(OrderOutcome::Placed { message, .. }) => writeln!(handle, "\n{message}")?,
        Ok(OrderOutcome::AwaitingBankTransfer) => {
            let bank = payment.bank();

            writeln!(handle, "\nTransfer {} to:", payment.transfer_amount())?;
            writeln!(handle, " Bank            {}", bank.bank_name)?;
            writeln!(handle, " Account name    {}", bank.account_name)?;
            writeln!(handle, " Account number  {}", bank.account_number)?;
            writeln!(handle, " Branch          {}", bank.branch)?;
            writeln!(handle, " SWIFT           {}", bank.swift_code)?;
            writeln!(handle, "\nSend your slip: {}", payment.whatsapp_link())?;
        }
        Err(error) => writeln!(handle, "\n{error}")?,
    }

    Ok(())
}
