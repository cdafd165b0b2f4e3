//! Telegram bot integration: bot construction and command handlers

pub mod bot;
pub mod commands;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command};
pub use commands::handle_command;
