use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::signal;

use starpay::core::{config::Config, init_logger};
use starpay::invoice::{InvoiceLinkGateway, TelegramGateway};
use starpay::telegram::{create_bot, handle_command, setup_bot_commands, Command};
use starpay::web::{self, AppState};

/// Main entry point: starts the HTTP API server and the bot dispatcher,
/// shutting both down on SIGINT/SIGTERM.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();

    let config = Config::from_env().context("configuration error")?;
    init_logger(&config.log_file)?;

    let bot = create_bot(&config)?;
    if let Err(e) = setup_bot_commands(&bot).await {
        // Not fatal: the commands still work, they just miss UI hints
        log::warn!("Failed to register bot commands: {}", e);
    }

    // The bot handle and gateway are owned here and passed into handlers;
    // there are no process-wide singletons.
    let gateway: Arc<dyn InvoiceLinkGateway> =
        Arc::new(TelegramGateway::new(bot.clone(), config.provider_token.clone()));

    let state = AppState {
        gateway: Arc::clone(&gateway),
    };
    let port = config.port;
    let allowed_origins = config.allowed_origins.clone();
    let server = tokio::spawn(async move {
        if let Err(e) = web::run_server(port, allowed_origins, state, shutdown_signal()).await {
            log::error!("HTTP server error: {}", e);
        }
    });

    let handler = Update::filter_message().filter_command::<Command>().endpoint(handle_command);

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![Arc::clone(&gateway)])
        .enable_ctrlc_handler()
        .build();

    // The ctrlc handler covers SIGINT; stop polling on SIGTERM as well
    let shutdown_token = dispatcher.shutdown_token();
    tokio::spawn(async move {
        shutdown_signal().await;
        if let Ok(stopped) = shutdown_token.shutdown() {
            stopped.await;
        }
    });

    log::info!("Starting bot dispatcher (long polling)");
    dispatcher.dispatch().await;

    server.await?;
    log::info!("Shutdown complete");

    Ok(())
}

/// Resolves when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
