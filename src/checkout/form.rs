//! Contact, shipping and billing details

use std::str::FromStr;

use crate::checkout::CheckoutError;

/// Who is placing the order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactInfo {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
}

/// A postal address. Free-form; nothing is cross-checked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Address {
    /// Street address
    pub address: String,
    /// Apartment, suite, etc.
    pub apartment: String,
    /// City
    pub city: String,
    /// District
    pub district: String,
    /// Postal code
    pub postal_code: String,
}

/// Billing name and address when it differs from shipping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BillingDetails {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Billing address
    pub address: Address,
}

/// Where the bill goes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BillingAddress {
    /// Bill to the shipping address.
    #[default]
    SameAsShipping,

    /// Bill somewhere else.
    Separate(BillingDetails),
}

/// A named input on the checkout form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Contact first name
    FirstName,
    /// Contact last name
    LastName,
    /// Contact email
    Email,
    /// Contact phone
    Phone,
    /// Shipping street address
    Address,
    /// Shipping apartment
    Apartment,
    /// Shipping city
    City,
    /// Shipping district
    District,
    /// Shipping postal code
    PostalCode,
    /// Billing first name
    BillingFirstName,
    /// Billing last name
    BillingLastName,
    /// Billing street address
    BillingAddress,
    /// Billing apartment
    BillingApartment,
    /// Billing city
    BillingCity,
    /// Billing district
    BillingDistrict,
    /// Billing postal code
    BillingPostalCode,
}

impl FormField {
    /// Every field, in form order.
    pub const ALL: [FormField; 16] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Phone,
        FormField::Address,
        FormField::Apartment,
        FormField::City,
        FormField::District,
        FormField::PostalCode,
        FormField::BillingFirstName,
        FormField::BillingLastName,
        FormField::BillingAddress,
        FormField::BillingApartment,
        FormField::BillingCity,
        FormField::BillingDistrict,
        FormField::BillingPostalCode,
    ];

    /// The input name the field is bound to.
    pub fn name(self) -> &'static str {
        match self {
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Address => "address",
            FormField::Apartment => "apartment",
            FormField::City => "city",
            FormField::District => "district",
            FormField::PostalCode => "postalCode",
            FormField::BillingFirstName => "billingFirstName",
            FormField::BillingLastName => "billingLastName",
            FormField::BillingAddress => "billingAddress",
            FormField::BillingApartment => "billingApartment",
            FormField::BillingCity => "billingCity",
            FormField::BillingDistrict => "billingDistrict",
            FormField::BillingPostalCode => "billingPostalCode",
        }
    }

    /// Whether the field belongs to the billing section.
    pub fn is_billing(self) -> bool {
        matches!(
            self,
            FormField::BillingFirstName
                | FormField::BillingLastName
                | FormField::BillingAddress
                | FormField::BillingApartment
                | FormField::BillingCity
                | FormField::BillingDistrict
                | FormField::BillingPostalCode
        )
    }

    /// Whether the field holds a district picked from the configured list.
    pub fn is_district(self) -> bool {
        matches!(self, FormField::District | FormField::BillingDistrict)
    }
}

impl FromStr for FormField {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| CheckoutError::UnknownField(s.to_string()))
    }
}

/// Everything typed into the checkout form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Contact details
    pub contact: ContactInfo,

    /// Shipping address
    pub shipping: Address,

    /// Billing address
    pub billing: BillingAddress,

    hidden_billing: Option<BillingDetails>,
}

impl CheckoutForm {
    /// Set a field by name.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::BillingSameAsShipping`] for a billing field while billing
    /// follows the shipping address.
    pub fn set_field(
        &mut self,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<(), CheckoutError> {
        *self.slot_mut(field)? = value.into();

        Ok(())
    }

    /// Read a field. Billing fields are `None` while billing follows shipping.
    pub fn field(&self, field: FormField) -> Option<&str> {
        let value = match field {
            FormField::FirstName => &self.contact.first_name,
            FormField::LastName => &self.contact.last_name,
            FormField::Email => &self.contact.email,
            FormField::Phone => &self.contact.phone,
            FormField::Address => &self.shipping.address,
            FormField::Apartment => &self.shipping.apartment,
            FormField::City => &self.shipping.city,
            FormField::District => &self.shipping.district,
            FormField::PostalCode => &self.shipping.postal_code,
            FormField::BillingFirstName => &self.separate_billing()?.first_name,
            FormField::BillingLastName => &self.separate_billing()?.last_name,
            FormField::BillingAddress => &self.separate_billing()?.address.address,
            FormField::BillingApartment => &self.separate_billing()?.address.apartment,
            FormField::BillingCity => &self.separate_billing()?.address.city,
            FormField::BillingDistrict => &self.separate_billing()?.address.district,
            FormField::BillingPostalCode => &self.separate_billing()?.address.postal_code,
        };

        Some(value)
    }

    /// Toggle "same as shipping address". The billing address typed before is hidden,
    /// not discarded, and comes back when the toggle is turned off again.
    pub fn set_same_as_shipping(&mut self, same: bool) {
        match (&mut self.billing, same) {
            (BillingAddress::SameAsShipping, false) => {
                let details = self.hidden_billing.take().unwrap_or_default();

                self.billing = BillingAddress::Separate(details);
            }
            (BillingAddress::Separate(details), true) => {
                self.hidden_billing = Some(std::mem::take(details));
                self.billing = BillingAddress::SameAsShipping;
            }
            _ => {}
        }
    }

    /// Whether billing follows the shipping address.
    pub fn same_as_shipping(&self) -> bool {
        matches!(self.billing, BillingAddress::SameAsShipping)
    }

    fn separate_billing(&self) -> Option<&BillingDetails> {
        match &self.billing {
            BillingAddress::SameAsShipping => None,
            BillingAddress::Separate(details) => Some(details),
        }
    }

    fn separate_billing_mut(
        &mut self,
        field: FormField,
    ) -> Result<&mut BillingDetails, CheckoutError> {
        match &mut self.billing {
            BillingAddress::SameAsShipping => {
                Err(CheckoutError::BillingSameAsShipping(field.name()))
            }
            BillingAddress::Separate(details) => Ok(details),
        }
    }

    fn slot_mut(&mut self, field: FormField) -> Result<&mut String, CheckoutError> {
        let slot = match field {
            FormField::FirstName => &mut self.contact.first_name,
            FormField::LastName => &mut self.contact.last_name,
            FormField::Email => &mut self.contact.email,
            FormField::Phone => &mut self.contact.phone,
            FormField::Address => &mut self.shipping.address,
            FormField::Apartment => &mut self.shipping.apartment,
            FormField::City => &mut self.shipping.city,
            FormField::District => &mut self.shipping.district,
            FormField::PostalCode => &mut self.shipping.postal_code,
            FormField::BillingFirstName => &mut self.separate_billing_mut(field)?.first_name,
            FormField::BillingLastName => &mut self.separate_billing_mut(field)?.last_name,
            FormField::BillingAddress => &mut self.separate_billing_mut(field)?.address.address,
            FormField::BillingApartment => {
                &mut self.separate_billing_mut(field)?.address.apartment
            }
            FormField::BillingCity => &mut self.separate_billing_mut(field)?.address.city,
            FormField::BillingDistrict => &mut self.separate_billing_mut(field)?.address.district,
            FormField::BillingPostalCode => {
                &mut self.separate_billing_mut(field)?.address.postal_code
            }
        };

        Ok(slot)
    }
}
