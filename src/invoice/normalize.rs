//! Invoice parameter validation and normalization
//!
//! `normalize` is the only way to turn a wire-level [`InvoiceDraft`] into a
//! gateway-ready [`InvoiceRequest`]. It is a pure function: required fields
//! are checked, optional fields get their documented defaults, and every
//! invariant is enforced here so the gateway never wastes a network call on
//! a request the platform would reject anyway.

use thiserror::Error;
use url::Url;

use crate::core::config::limits;
use crate::invoice::types::{InvoiceDraft, InvoicePrice, InvoiceRequest};

/// Validation errors, each naming the offending request field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was absent from the request
    #[error("missing required field `{0}`")]
    Missing(&'static str),

    /// A field was present but violates an invariant
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    /// The request field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing(field) => field,
            ValidationError::Invalid { field, .. } => field,
        }
    }
}

/// Validates a draft and fills in defaults for omitted optional fields.
///
/// Defaulting policy: `max_tip_amount` → 0, `suggested_tip_amounts` → empty,
/// all `need_*`/`send_*`/`is_flexible` flags → `false`. Currency codes are
/// uppercased. Re-normalizing an already normalized request (via
/// `InvoiceDraft::from(&request)`) returns it unchanged.
///
/// # Errors
/// Returns a [`ValidationError`] naming the first field that is missing or
/// violates an invariant.
pub fn normalize(draft: InvoiceDraft) -> Result<InvoiceRequest, ValidationError> {
    let title = required_text("title", draft.title)?;
    if title.chars().count() > limits::TITLE_MAX_CHARS {
        return Err(invalid(
            "title",
            format!("must be at most {} characters", limits::TITLE_MAX_CHARS),
        ));
    }

    let description = required_text("description", draft.description)?;
    if description.chars().count() > limits::DESCRIPTION_MAX_CHARS {
        return Err(invalid(
            "description",
            format!("must be at most {} characters", limits::DESCRIPTION_MAX_CHARS),
        ));
    }

    let payload = required_text("payload", draft.payload)?;
    if payload.len() > limits::PAYLOAD_MAX_BYTES {
        return Err(invalid(
            "payload",
            format!("must be at most {} bytes", limits::PAYLOAD_MAX_BYTES),
        ));
    }

    let currency = required_text("currency", draft.currency)?;
    if !(3..=4).contains(&currency.len()) || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid(
            "currency",
            format!("`{}` is not a 3-4 letter currency code", currency),
        ));
    }
    let currency = currency.to_ascii_uppercase();

    let price_drafts = draft.prices.ok_or(ValidationError::Missing("prices"))?;
    if price_drafts.is_empty() {
        return Err(invalid("prices", "must contain at least one price".to_string()));
    }
    let mut prices = Vec::with_capacity(price_drafts.len());
    for price in price_drafts {
        let label = match price.label {
            Some(label) if !label.trim().is_empty() => label,
            _ => return Err(invalid("prices", "every price needs a non-empty label".to_string())),
        };
        let amount = price
            .amount
            .ok_or_else(|| invalid("prices", format!("price `{}` has no amount", label)))?;
        let amount = checked_amount("prices", amount)?;
        prices.push(InvoicePrice { label, amount });
    }

    let photo_url = match draft.photo_url.filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => Some(Url::parse(&raw).map_err(|e| invalid("photo_url", e.to_string()))?),
        None => None,
    };

    let max_tip_amount = checked_amount("max_tip_amount", draft.max_tip_amount.unwrap_or(0))?;

    let raw_tips = draft.suggested_tip_amounts.unwrap_or_default();
    if raw_tips.len() > limits::MAX_SUGGESTED_TIP_AMOUNTS {
        return Err(invalid(
            "suggested_tip_amounts",
            format!("at most {} amounts are allowed", limits::MAX_SUGGESTED_TIP_AMOUNTS),
        ));
    }
    let mut suggested_tip_amounts = Vec::with_capacity(raw_tips.len());
    for tip in raw_tips {
        let tip = checked_amount("suggested_tip_amounts", tip)?;
        if tip > max_tip_amount {
            return Err(invalid(
                "suggested_tip_amounts",
                format!("{} exceeds max_tip_amount ({})", tip, max_tip_amount),
            ));
        }
        suggested_tip_amounts.push(tip);
    }

    Ok(InvoiceRequest {
        title,
        description,
        payload,
        currency,
        prices,
        photo_url,
        max_tip_amount,
        suggested_tip_amounts,
        need_name: draft.need_name.unwrap_or(false),
        need_phone_number: draft.need_phone_number.unwrap_or(false),
        need_email: draft.need_email.unwrap_or(false),
        need_shipping_address: draft.need_shipping_address.unwrap_or(false),
        send_phone_number_to_provider: draft.send_phone_number_to_provider.unwrap_or(false),
        send_email_to_provider: draft.send_email_to_provider.unwrap_or(false),
        is_flexible: draft.is_flexible.unwrap_or(false),
    })
}

fn invalid(field: &'static str, reason: String) -> ValidationError {
    ValidationError::Invalid { field, reason }
}

fn required_text(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(invalid(field, "must not be empty".to_string())),
        None => Err(ValidationError::Missing(field)),
    }
}

/// Converts a wire-level amount into the platform's unsigned representation.
fn checked_amount(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value).map_err(|_| {
        let reason = if value < 0 {
            format!("{} is negative; amounts are in the smallest currency unit", value)
        } else {
            format!("{} exceeds the maximum supported amount", value)
        };
        invalid(field, reason)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::types::PriceDraft;

    fn minimal_draft() -> InvoiceDraft {
        InvoiceDraft {
            title: Some("T".to_string()),
            description: Some("D".to_string()),
            payload: Some("p".to_string()),
            currency: Some("XTR".to_string()),
            prices: Some(vec![PriceDraft {
                label: Some("Item".to_string()),
                amount: Some(1),
            }]),
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_draft_gets_all_defaults() {
        let invoice = normalize(minimal_draft()).unwrap();

        assert_eq!(invoice.max_tip_amount, 0);
        assert!(invoice.suggested_tip_amounts.is_empty());
        assert!(invoice.photo_url.is_none());
        assert!(!invoice.need_name);
        assert!(!invoice.need_phone_number);
        assert!(!invoice.need_email);
        assert!(!invoice.need_shipping_address);
        assert!(!invoice.send_phone_number_to_provider);
        assert!(!invoice.send_email_to_provider);
        assert!(!invoice.is_flexible);
        assert_eq!(invoice.prices.len(), 1);
        assert_eq!(invoice.prices[0].amount, 1);
    }

    #[test]
    fn test_missing_required_fields_name_the_field() {
        for field in ["title", "description", "payload", "currency", "prices"] {
            let mut draft = minimal_draft();
            match field {
                "title" => draft.title = None,
                "description" => draft.description = None,
                "payload" => draft.payload = None,
                "currency" => draft.currency = None,
                "prices" => draft.prices = None,
                _ => unreachable!(),
            }
            let err = normalize(draft).unwrap_err();
            assert_eq!(err, ValidationError::Missing(field), "wrong error for {}", field);
            assert_eq!(err.field(), field);
        }
    }

    #[test]
    fn test_empty_prices_rejected() {
        let mut draft = minimal_draft();
        draft.prices = Some(vec![]);

        let err = normalize(draft).unwrap_err();
        assert_eq!(err.field(), "prices");
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut draft = minimal_draft();
        draft.prices = Some(vec![PriceDraft {
            label: Some("Item".to_string()),
            amount: Some(-1),
        }]);

        let err = normalize(draft).unwrap_err();
        assert_eq!(err.field(), "prices");
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_price_without_label_rejected() {
        let mut draft = minimal_draft();
        draft.prices = Some(vec![PriceDraft {
            label: Some("  ".to_string()),
            amount: Some(1),
        }]);

        assert_eq!(normalize(draft).unwrap_err().field(), "prices");
    }

    #[test]
    fn test_tip_above_max_rejected() {
        let mut draft = minimal_draft();
        draft.max_tip_amount = Some(10);
        draft.suggested_tip_amounts = Some(vec![5, 11]);

        let err = normalize(draft).unwrap_err();
        assert_eq!(err.field(), "suggested_tip_amounts");
        assert!(err.to_string().contains("exceeds max_tip_amount"));
    }

    #[test]
    fn test_tips_within_max_accepted() {
        let mut draft = minimal_draft();
        draft.max_tip_amount = Some(100);
        draft.suggested_tip_amounts = Some(vec![10, 50, 100]);

        let invoice = normalize(draft).unwrap();
        assert_eq!(invoice.max_tip_amount, 100);
        assert_eq!(invoice.suggested_tip_amounts, vec![10, 50, 100]);
    }

    #[test]
    fn test_too_many_suggested_tips_rejected() {
        let mut draft = minimal_draft();
        draft.max_tip_amount = Some(100);
        draft.suggested_tip_amounts = Some(vec![1, 2, 3, 4, 5]);

        assert_eq!(normalize(draft).unwrap_err().field(), "suggested_tip_amounts");
    }

    #[test]
    fn test_currency_is_uppercased() {
        let mut draft = minimal_draft();
        draft.currency = Some("usd".to_string());

        assert_eq!(normalize(draft).unwrap().currency, "USD");
    }

    #[test]
    fn test_bad_currency_codes_rejected() {
        for currency in ["US", "DOLLARS", "U5D", ""] {
            let mut draft = minimal_draft();
            draft.currency = Some(currency.to_string());
            assert_eq!(
                normalize(draft).unwrap_err().field(),
                "currency",
                "should reject {:?}",
                currency
            );
        }
    }

    #[test]
    fn test_overlong_fields_rejected() {
        let mut draft = minimal_draft();
        draft.title = Some("x".repeat(limits::TITLE_MAX_CHARS + 1));
        assert_eq!(normalize(draft).unwrap_err().field(), "title");

        let mut draft = minimal_draft();
        draft.description = Some("x".repeat(limits::DESCRIPTION_MAX_CHARS + 1));
        assert_eq!(normalize(draft).unwrap_err().field(), "description");

        let mut draft = minimal_draft();
        draft.payload = Some("x".repeat(limits::PAYLOAD_MAX_BYTES + 1));
        assert_eq!(normalize(draft).unwrap_err().field(), "payload");
    }

    #[test]
    fn test_malformed_photo_url_rejected() {
        let mut draft = minimal_draft();
        draft.photo_url = Some("not a url".to_string());

        assert_eq!(normalize(draft).unwrap_err().field(), "photo_url");
    }

    #[test]
    fn test_empty_photo_url_treated_as_absent() {
        let mut draft = minimal_draft();
        draft.photo_url = Some("".to_string());

        assert!(normalize(draft).unwrap().photo_url.is_none());
    }

    #[test]
    fn test_renormalization_is_identity() {
        let mut draft = minimal_draft();
        draft.photo_url = Some("https://example.com/pizza.png".to_string());
        draft.max_tip_amount = Some(50);
        draft.suggested_tip_amounts = Some(vec![10, 25]);
        draft.need_email = Some(true);
        draft.is_flexible = Some(true);

        let first = normalize(draft).unwrap();
        let second = normalize(InvoiceDraft::from(&first)).unwrap();
        assert_eq!(first, second);
    }
}
