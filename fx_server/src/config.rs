//! Validated server configuration built from `Args`.
use std::time::Duration;

use fx_common::net::{addr, PROVIDER_BASE_URL, SERVER_PORT, STORAGE_TIMEOUT, UPSTREAM_TIMEOUT};
use fx_common::QuoteError;

use crate::args::Args;

/// SQLite database used when none is given on the command line.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://quote_database.db";

/// Runtime configuration of the quote server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Listener address, e.g. `0.0.0.0:8080`.
    pub bind: String,
    /// Base URL of the quote provider.
    pub provider_url: String,
    /// SQLite database URL.
    pub database_url: String,
    /// Budget of the provider call.
    pub upstream_timeout: Duration,
    /// Budget of each storage operation.
    pub storage_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: addr("0.0.0.0", SERVER_PORT),
            provider_url: String::from(PROVIDER_BASE_URL),
            database_url: String::from(DEFAULT_DATABASE_URL),
            upstream_timeout: UPSTREAM_TIMEOUT,
            storage_timeout: STORAGE_TIMEOUT,
        }
    }
}

impl TryFrom<Args> for ServerConfig {
    type Error = QuoteError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        if args.upstream_timeout_ms == 0 {
            return Err(QuoteError::Config(
                "--upstream-timeout-ms must be greater than zero".to_string(),
            ));
        }
        if args.storage_timeout_ms == 0 {
            return Err(QuoteError::Config(
                "--storage-timeout-ms must be greater than zero".to_string(),
            ));
        }
        if args.provider_url.trim().is_empty() {
            return Err(QuoteError::Config("--provider-url is empty".to_string()));
        }

        Ok(ServerConfig {
            bind: args.bind,
            provider_url: args.provider_url,
            database_url: args.database_url,
            upstream_timeout: Duration::from_millis(args.upstream_timeout_ms),
            storage_timeout: Duration::from_millis(args.storage_timeout_ms),
        })
    }
}
