//! Starpay — Telegram invoice-link service
//!
//! A small backend that bridges HTTP clients to the Telegram Bot API's
//! `createInvoiceLink` call, plus a bot surface with `/start` and `/create`
//! commands.
//!
//! # Module Structure
//!
//! - `core`: configuration and logging
//! - `invoice`: invoice data model, validation/normalization, and the
//!   gateway that talks to Telegram
//! - `telegram`: bot construction and command handlers
//! - `web`: axum HTTP API

pub mod core;
pub mod invoice;
pub mod telegram;
pub mod web;

// Re-export commonly used types for convenience
pub use self::core::config::{Config, ConfigError};
pub use self::invoice::{normalize, InvoiceDraft, InvoiceLink, InvoiceLinkGateway, InvoiceRequest, TelegramGateway};
