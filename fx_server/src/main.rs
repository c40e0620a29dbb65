//! FX quote HTTP server.
//!
//! This binary listens for `GET /cotacao` and answers every request with the latest
//! persisted USD/BRL quote. Internally, it wires together three building blocks:
//!
//! - `QuoteProvider` — fetches the current quote from the upstream API under a 200ms
//!   budget.
//! - `SqliteQuoteStore` — persists the parsed quote and reads back the latest record,
//!   each operation under a 10ms budget.
//! - The router built by `create_router` — runs the chain for each request and maps
//!   failures to `500` (or `408` when the caller already gave up).
//!
//! Budgets, the bind address, the provider URL and the database URL are configurable
//! on the command line; see `fx_server --help`.
use std::sync::Arc;

use clap::Parser;
use fx_common::{QuoteError, Result};
use fx_server::args::Args;
use fx_server::{create_router, AppState, QuoteProvider, ServerConfig, SqliteQuoteStore};
use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), QuoteError> {
    init_logger();
    let config = ServerConfig::try_from(Args::parse())?;

    let store = Arc::new(SqliteQuoteStore::connect(&config.database_url).await?);
    let provider = QuoteProvider::new(&config.provider_url)?;
    info!("Quote provider: {}", provider.url());

    let state = AppState::new(provider, store, &config);
    let listener = TcpListener::bind(&config.bind).await?;
    info!("HTTP server is started on {}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C received. Shutting down server..."),
        Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
