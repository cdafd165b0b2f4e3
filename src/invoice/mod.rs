//! Invoice data model, normalization, and the Telegram gateway

pub mod gateway;
pub mod normalize;
pub mod types;

// Re-exports for convenience
pub use gateway::{GatewayError, InvoiceLink, InvoiceLinkGateway, TelegramGateway};
pub use normalize::{normalize, ValidationError};
pub use types::{InvoiceDraft, InvoicePrice, InvoiceRequest, PriceDraft};
