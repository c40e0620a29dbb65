//! Command-line arguments for the quote server.
//!
//! This module defines the CLI interface using `clap`. Defaults reproduce the
//! reference deployment: port 8080, the public provider, a local SQLite file and
//! budgets of 200ms (provider) and 10ms (each storage operation).
use clap::Parser;
use fx_common::net::{addr, PROVIDER_BASE_URL, SERVER_PORT};

use crate::config::DEFAULT_DATABASE_URL;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Address to bind the HTTP listener to.
    #[clap(long, default_value_t = addr("0.0.0.0", SERVER_PORT))]
    pub bind: String,

    /// Base URL of the upstream quote provider.
    #[clap(long, default_value = PROVIDER_BASE_URL)]
    pub provider_url: String,

    /// SQLite database URL.
    #[clap(long, default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Budget of the provider call, in milliseconds.
    #[clap(long, default_value_t = 200)]
    pub upstream_timeout_ms: u64,

    /// Budget of each storage operation, in milliseconds.
    #[clap(long, default_value_t = 10)]
    pub storage_timeout_ms: u64,
}
