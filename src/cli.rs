//! Command line arguments for the `checkout` binary

use std::path::PathBuf;

use clap::Parser;

use crate::{observability::LoggingConfig, payment::PaymentMethod};

/// Walk the sample cart through checkout and payment.
#[derive(Debug, Parser)]
#[command(name = "checkout", about = "Pharmacy checkout demo", long_about = None)]
pub struct CheckoutArgs {
    /// Store configuration file. Defaults to the built-in store.
    #[arg(short, long, env = "CHECKOUT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Promo code to apply at checkout
    #[arg(long)]
    pub promo: Option<String>,

    /// Payment method
    #[arg(long, value_enum)]
    pub payment: Option<PaymentMethod>,

    /// Collect from this branch instead of home delivery
    #[arg(long, value_name = "BRANCH")]
    pub pickup: Option<String>,

    /// Logging
    #[command(flatten)]
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::observability::LogFormat;

    #[test]
    fn parses_all_options() -> TestResult {
        let args = CheckoutArgs::try_parse_from([
            "checkout",
            "--promo",
            "TEST",
            "--payment",
            "bank",
            "--pickup",
            "col-01",
            "--log-format",
            "json",
        ])?;

        assert_eq!(args.promo.as_deref(), Some("TEST"));
        assert_eq!(args.payment, Some(PaymentMethod::BankTransfer));
        assert_eq!(args.pickup.as_deref(), Some("col-01"));
        assert_eq!(args.logging.log_format, LogFormat::Json);

        Ok(())
    }

    #[test]
    fn unknown_payment_method_is_rejected() {
        let result = CheckoutArgs::try_parse_from(["checkout", "--payment", "cheque"]);

        assert!(result.is_err());
    }
}
