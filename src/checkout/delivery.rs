//! Delivery options

use serde::Deserialize;

/// A pharmacy branch orders can be collected from.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Branch {
    /// Branch id, e.g. `col-01`
    pub id: String,

    /// Display name
    pub name: String,

    /// Street address
    pub address: String,
}

/// How the order reaches the customer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DeliveryOption {
    /// Deliver to the shipping address.
    #[default]
    HomeDelivery,

    /// Collect from a branch, once one is chosen.
    StorePickup {
        /// Id of the chosen branch
        branch: Option<String>,
    },
}

impl DeliveryOption {
    /// Whether this is store pickup.
    pub fn is_pickup(&self) -> bool {
        matches!(self, DeliveryOption::StorePickup { .. })
    }

    /// The chosen branch id, for pickup.
    pub fn branch_id(&self) -> Option<&str> {
        match self {
            DeliveryOption::HomeDelivery => None,
            DeliveryOption::StorePickup { branch } => branch.as_deref(),
        }
    }
}
