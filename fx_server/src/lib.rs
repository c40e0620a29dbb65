//! FX quote server.
//!
//! Serves `GET /cotacao`: fetches the latest USD/BRL quote from the upstream
//! provider, persists it and answers with the most recent stored record. Each hop
//! runs under its own bounded deadline derived from the caller's context.
//!
//! - `api` — router, shared state and the request handler.
//! - `provider` — HTTP client for the upstream provider.
//! - `model` — provider payload model and bid coercion.
//! - `storage` — `QuoteStore` trait and the SQLite backend.
//! - `args` / `config` — command-line interface and validated configuration.
#![warn(missing_docs)]
pub mod api;
pub mod args;
pub mod config;
pub mod model;
pub mod provider;
pub mod storage;

pub use api::{create_router, AppState};
pub use config::ServerConfig;
pub use provider::QuoteProvider;
pub use storage::{QuoteStore, SqliteQuoteStore};
