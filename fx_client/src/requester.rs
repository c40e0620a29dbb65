//! One bounded request to the quote server.
//!
//! The `Requester` issues a single `GET /cotacao` under its overall deadline and
//! advertises that budget to the server through the timeout header. A deadline
//! expiry is reported as a distinct `Outcome::TimedOut`; every other failure is
//! returned to the caller as an error. Output is only written after the full
//! response has been received and decoded.
use std::path::Path;
use std::time::Duration;

use fx_common::net::TIMEOUT_HEADER;
use fx_common::{Quote, QuoteError, RequestContext, Result, Step};
use log::{debug, info, warn};
use reqwest::Client;

use crate::output::write_dollar_file;

/// Result of a completed requester run.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The quote was received and written to the output file.
    Written(Quote),
    /// The deadline elapsed; nothing was written.
    TimedOut,
}

/// Client performing the single bounded call to the server.
#[derive(Debug, Clone)]
pub struct Requester {
    client: Client,
    url: String,
    timeout: Duration,
}

impl Requester {
    /// Creates a requester for `url` with an overall deadline of `timeout`.
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(QuoteError::Config("timeout must be greater than zero".to_string()));
        }
        let client = Client::builder()
            .build()
            .map_err(|e| QuoteError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: String::from(url),
            timeout,
        })
    }

    /// Overall deadline of the request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches the latest quote from the server within the deadline.
    ///
    /// Non-success statuses are errors; their body is kept as text and never decoded.
    pub async fn fetch_quote(&self) -> Result<Quote> {
        let deadline = RequestContext::background().bounded(Step::Request, self.timeout);
        deadline.run(self.send()).await
    }

    /// Fetches the quote and writes `Dólar: <bid>` to `output`.
    pub async fn run(&self, output: &Path) -> Result<Outcome> {
        match self.fetch_quote().await {
            Ok(quote) => {
                write_dollar_file(output, &quote)?;
                info!("{} written to {}", quote.dollar_line(), output.display());
                Ok(Outcome::Written(quote))
            }
            Err(e) if e.is_timeout() => {
                warn!("Context timeout was exceeded");
                Ok(Outcome::TimedOut)
            }
            Err(e) => Err(e),
        }
    }

    async fn send(&self) -> Result<Quote> {
        debug!("GET {} (budget {}ms)", self.url, self.timeout.as_millis());
        let response = self
            .client
            .get(&self.url)
            .header(TIMEOUT_HEADER, self.timeout.as_millis().to_string())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(map_reqwest_error)?;
            return Err(QuoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice::<Quote>(&bytes)
            .map_err(|e| QuoteError::Decode(format!("invalid quote payload: {}", e)))
    }
}

fn map_reqwest_error(error: reqwest::Error) -> QuoteError {
    QuoteError::Transport(format!("HTTP request failed: {}", error))
}
