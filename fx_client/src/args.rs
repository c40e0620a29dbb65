//! Command-line arguments for the requester.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// URL of the quote endpoint.
    #[clap(long, default_value = "http://localhost:8080/cotacao")]
    pub url: String,

    /// Overall deadline of the request, in milliseconds.
    #[clap(long, default_value_t = 300)]
    pub timeout_ms: u64,

    /// File the formatted bid is written to.
    #[clap(long, default_value = "arquivo.txt")]
    pub output: String,
}
