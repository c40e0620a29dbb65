//! Quote requester — asks the quote server for the latest USD/BRL quote and writes
//! `Dólar: <bid>` to a local file. The whole call runs under a 300ms deadline by
//! default; when it expires the requester reports the timeout and leaves the output
//! file untouched. Any other failure terminates the process with an error.
//!
//! Usage example (CLI):
//! ```bash
//! fx_client --url http://localhost:8080/cotacao --timeout-ms 300 --output arquivo.txt
//! ```
use std::time::Duration;

use clap::Parser;
use fx_client::args::Args;
use fx_client::output::normalize_path;
use fx_client::{Outcome, Requester};
use fx_common::{QuoteError, Result};
use log::{error, info};

#[tokio::main]
async fn main() -> Result<(), QuoteError> {
    init_logger();
    let args = Args::parse();
    let output = normalize_path(&args.output);

    let requester = Requester::new(args.url.trim(), Duration::from_millis(args.timeout_ms))?;
    info!(
        "Requesting {} with a {}ms deadline",
        args.url,
        requester.timeout().as_millis()
    );

    match requester.run(&output).await {
        Ok(Outcome::Written(quote)) => {
            info!("Quote {} ({}) saved", quote.id, quote.code);
            Ok(())
        }
        Ok(Outcome::TimedOut) => Ok(()),
        Err(e) => {
            error!("Request failed: {}", e);
            Err(e)
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
