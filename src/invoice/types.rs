//! Invoice data model
//!
//! Two shapes exist on purpose. [`InvoiceDraft`] is what arrives over the
//! wire: loosely typed, everything optional, amounts wide enough (`i64`)
//! that out-of-range values reach the validator instead of dying inside
//! serde. [`InvoiceRequest`] is the fully populated, validated form the
//! gateway sends to Telegram; it only exists as the output of
//! [`crate::invoice::normalize`].

use serde::{Deserialize, Serialize};
use url::Url;

/// A single line item on an invoice. Amount is in the smallest unit of the
/// currency (cents for fiat, whole Stars for XTR).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoicePrice {
    pub label: String,
    pub amount: u32,
}

/// A validated, fully populated invoice-creation request.
///
/// Invariants (enforced by `normalize`, relied on by the gateway):
/// - `title`, `description`, `payload`, `currency` are non-empty
/// - `prices` is non-empty
/// - every suggested tip amount is `<= max_tip_amount`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRequest {
    pub title: String,
    pub description: String,
    /// Opaque correlation string returned to the application on payment
    pub payload: String,
    /// Three or four letter currency code, uppercase (e.g. "USD", "XTR")
    pub currency: String,
    pub prices: Vec<InvoicePrice>,
    pub photo_url: Option<Url>,
    pub max_tip_amount: u32,
    pub suggested_tip_amounts: Vec<u32>,
    pub need_name: bool,
    pub need_phone_number: bool,
    pub need_email: bool,
    pub need_shipping_address: bool,
    pub send_phone_number_to_provider: bool,
    pub send_email_to_provider: bool,
    pub is_flexible: bool,
}

/// Wire shape of a price entry; validated into [`InvoicePrice`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceDraft {
    pub label: Option<String>,
    pub amount: Option<i64>,
}

/// Wire shape of an invoice-creation request, as POSTed by HTTP clients.
///
/// Optional fields that are absent get documented defaults during
/// normalization; required fields that are absent fail validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub payload: Option<String>,
    pub currency: Option<String>,
    pub prices: Option<Vec<PriceDraft>>,
    pub photo_url: Option<String>,
    pub max_tip_amount: Option<i64>,
    pub suggested_tip_amounts: Option<Vec<i64>>,
    pub need_name: Option<bool>,
    pub need_phone_number: Option<bool>,
    pub need_email: Option<bool>,
    pub need_shipping_address: Option<bool>,
    // `send_phone_to_provider` is the field name the original web client
    // used; the Bot API name is canonical.
    #[serde(alias = "send_phone_to_provider")]
    pub send_phone_number_to_provider: Option<bool>,
    pub send_email_to_provider: Option<bool>,
    pub is_flexible: Option<bool>,
}

impl From<&InvoiceRequest> for InvoiceDraft {
    fn from(invoice: &InvoiceRequest) -> Self {
        InvoiceDraft {
            title: Some(invoice.title.clone()),
            description: Some(invoice.description.clone()),
            payload: Some(invoice.payload.clone()),
            currency: Some(invoice.currency.clone()),
            prices: Some(
                invoice
                    .prices
                    .iter()
                    .map(|price| PriceDraft {
                        label: Some(price.label.clone()),
                        amount: Some(i64::from(price.amount)),
                    })
                    .collect(),
            ),
            photo_url: invoice.photo_url.as_ref().map(|url| url.as_str().to_string()),
            max_tip_amount: Some(i64::from(invoice.max_tip_amount)),
            suggested_tip_amounts: Some(invoice.suggested_tip_amounts.iter().copied().map(i64::from).collect()),
            need_name: Some(invoice.need_name),
            need_phone_number: Some(invoice.need_phone_number),
            need_email: Some(invoice.need_email),
            need_shipping_address: Some(invoice.need_shipping_address),
            send_phone_number_to_provider: Some(invoice.send_phone_number_to_provider),
            send_email_to_provider: Some(invoice.send_email_to_provider),
            is_flexible: Some(invoice.is_flexible),
        }
    }
}
