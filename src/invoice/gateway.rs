//! Invoice gateway: forwards normalized requests to the Telegram Bot API
//!
//! [`InvoiceLinkGateway`] is the seam between the transport layers and
//! Telegram; the HTTP tests run against a mock implementation of it.
//! [`TelegramGateway`] is the production implementation — one
//! `createInvoiceLink` call per request, fail-fast, no retries, no caching.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use teloxide::payloads::CreateInvoiceLinkSetters;
use teloxide::prelude::*;
use teloxide::types::LabeledPrice;
use teloxide::RequestError;
use thiserror::Error;

use crate::core::config::STARS_CURRENCY;
use crate::invoice::types::InvoiceRequest;

/// An opaque invoice link issued by Telegram. Opening it starts the payment
/// flow for the end user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InvoiceLink(String);

impl InvoiceLink {
    pub fn new(link: impl Into<String>) -> Self {
        InvoiceLink(link.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors from the invoice gateway. The platform's own message is kept
/// verbatim so callers can diagnose rejections ("Bad Request:
/// CURRENCY_INVALID" and friends).
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Telegram accepted the call but rejected the request
    #[error("Telegram API error: {0}")]
    Platform(String),

    /// The call never got a usable answer from Telegram
    #[error("network error while calling Telegram: {0}")]
    Network(String),
}

impl From<RequestError> for GatewayError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Api(api) => GatewayError::Platform(api.to_string()),
            RequestError::Network(net) => GatewayError::Network(net.to_string()),
            other => GatewayError::Platform(other.to_string()),
        }
    }
}

/// Creates invoice links from validated requests.
#[async_trait]
pub trait InvoiceLinkGateway: Send + Sync {
    /// Forwards a normalized invoice to the platform. Single attempt; the
    /// caller decides what to do with failures.
    async fn create_link(&self, invoice: &InvoiceRequest) -> Result<InvoiceLink, GatewayError>;
}

/// Production gateway backed by a [`teloxide::Bot`].
pub struct TelegramGateway {
    bot: Bot,
    provider_token: Option<String>,
}

impl TelegramGateway {
    pub fn new(bot: Bot, provider_token: Option<String>) -> Self {
        TelegramGateway { bot, provider_token }
    }

    /// Provider token to attach, if any. Stars invoices must not carry one.
    fn provider_token_for(&self, currency: &str) -> Option<String> {
        if currency == STARS_CURRENCY {
            None
        } else {
            self.provider_token.clone()
        }
    }
}

#[async_trait]
impl InvoiceLinkGateway for TelegramGateway {
    async fn create_link(&self, invoice: &InvoiceRequest) -> Result<InvoiceLink, GatewayError> {
        let prices: Vec<LabeledPrice> = invoice
            .prices
            .iter()
            .map(|price| LabeledPrice::new(price.label.clone(), price.amount))
            .collect();

        let mut request = self
            .bot
            .create_invoice_link(
                invoice.title.clone(),
                invoice.description.clone(),
                invoice.payload.clone(),
                invoice.currency.clone(),
                prices,
            )
            .need_name(invoice.need_name)
            .need_phone_number(invoice.need_phone_number)
            .need_email(invoice.need_email)
            .need_shipping_address(invoice.need_shipping_address)
            .send_phone_number_to_provider(invoice.send_phone_number_to_provider)
            .send_email_to_provider(invoice.send_email_to_provider)
            .is_flexible(invoice.is_flexible);

        // Tip parameters are rejected for Stars invoices; only attach them
        // when tipping is actually enabled.
        if invoice.max_tip_amount > 0 {
            request = request
                .max_tip_amount(invoice.max_tip_amount)
                .suggested_tip_amounts(invoice.suggested_tip_amounts.clone());
        }
        if let Some(photo_url) = &invoice.photo_url {
            request = request.photo_url(photo_url.clone());
        }
        if let Some(provider_token) = self.provider_token_for(&invoice.currency) {
            request = request.provider_token(provider_token);
        }

        log::info!(
            "Creating invoice link: title={:?}, currency={}, {} price(s)",
            invoice.title,
            invoice.currency,
            invoice.prices.len()
        );

        match request.await {
            Ok(link) => {
                log::info!("Invoice link created: {}", link);
                Ok(InvoiceLink::new(link))
            }
            Err(err) => {
                log::error!("createInvoiceLink failed: {}", err);
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::ApiError;

    #[test]
    fn test_api_errors_keep_platform_message() {
        let err = GatewayError::from(RequestError::Api(ApiError::Unknown(
            "Bad Request: CURRENCY_INVALID".to_string(),
        )));

        match &err {
            GatewayError::Platform(message) => assert!(message.contains("CURRENCY_INVALID")),
            other => panic!("expected Platform error, got {:?}", other),
        }
        assert!(err.to_string().contains("CURRENCY_INVALID"));
    }

    #[test]
    fn test_provider_token_omitted_for_stars() {
        let bot = Bot::new("123:TEST");
        let gateway = TelegramGateway::new(bot, Some("live-token".to_string()));

        assert_eq!(gateway.provider_token_for("XTR"), None);
        assert_eq!(gateway.provider_token_for("USD"), Some("live-token".to_string()));
    }

    #[test]
    fn test_provider_token_absent_when_unconfigured() {
        let bot = Bot::new("123:TEST");
        let gateway = TelegramGateway::new(bot, None);

        assert_eq!(gateway.provider_token_for("USD"), None);
    }
}
