//! Command handlers for the payment bot
//!
//! `/start` replies with a static welcome; `/create` builds the fixed demo
//! invoice and runs it through the same normalize-then-gateway path as the
//! HTTP API. Gateway failures are reported back as the reply text so the
//! chat user sees what the platform said.

use std::sync::Arc;

use teloxide::prelude::*;

use crate::core::config::STARS_CURRENCY;
use crate::invoice::{normalize, InvoiceDraft, InvoiceLinkGateway, PriceDraft};
use crate::telegram::bot::Command;

const WELCOME_TEXT: &str = "Welcome! I am your payment bot. I can help you process payments through Telegram.";

const DEMO_PHOTO_URL: &str =
    "https://png.pngtree.com/png-vector/20221119/ourmid/pngtree-cheese-pizza-vector-art-png-image_6469745.png";

/// Dispatcher endpoint for all bot commands.
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    gateway: Arc<dyn InvoiceLinkGateway>,
) -> ResponseResult<()> {
    match cmd {
        Command::Start => {
            bot.send_message(msg.chat.id, WELCOME_TEXT).await?;
        }
        Command::Create => handle_create(&bot, &msg, gateway.as_ref()).await?,
    }

    Ok(())
}

async fn handle_create(bot: &Bot, msg: &Message, gateway: &dyn InvoiceLinkGateway) -> ResponseResult<()> {
    let invoice = match normalize(demo_invoice_draft(msg.chat.id)) {
        Ok(invoice) => invoice,
        Err(err) => {
            log::error!("Demo invoice failed validation: {}", err);
            bot.send_message(msg.chat.id, err.to_string()).await?;
            return Ok(());
        }
    };

    match gateway.create_link(&invoice).await {
        Ok(link) => {
            bot.send_message(msg.chat.id, format!("Here's your invoice link: {}", link))
                .await?;
        }
        Err(err) => {
            log::error!("Error creating invoice link via command: {}", err);
            bot.send_message(msg.chat.id, err.to_string()).await?;
        }
    }

    Ok(())
}

/// A 1-Star demo invoice, payload tagged with the requesting chat.
fn demo_invoice_draft(chat_id: ChatId) -> InvoiceDraft {
    InvoiceDraft {
        title: Some("Pizza".to_string()),
        description: Some("This is a test product description".to_string()),
        payload: Some(serde_json::json!({ "telegramId": format!("{}_payload", chat_id.0) }).to_string()),
        currency: Some(STARS_CURRENCY.to_string()),
        prices: Some(vec![PriceDraft {
            label: Some("Test Item".to_string()),
            amount: Some(1),
        }]),
        photo_url: Some(DEMO_PHOTO_URL.to_string()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_invoice_is_valid() {
        let invoice = normalize(demo_invoice_draft(ChatId(1234567890))).unwrap();

        assert_eq!(invoice.title, "Pizza");
        assert_eq!(invoice.currency, STARS_CURRENCY);
        assert_eq!(invoice.prices.len(), 1);
        assert_eq!(invoice.prices[0].amount, 1);
        assert!(invoice.payload.contains("1234567890_payload"));
        assert!(invoice.photo_url.is_some());
        // Stars invoices carry no tip configuration
        assert_eq!(invoice.max_tip_amount, 0);
    }
}
