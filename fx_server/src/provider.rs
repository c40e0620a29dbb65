//! HTTP client for the upstream quote provider.
//!
//! Each fetch runs under a bounded `Deadline` supplied by the caller. The deadline
//! covers the whole exchange (connect, headers and body). Non-success statuses are
//! reported as `QuoteError::Status` and their bodies are never decoded.
use fx_common::net::{join_url, PROVIDER_PATH};
use fx_common::{Deadline, QuoteError, Result};
use log::{debug, error, warn};
use reqwest::Client;

/// Client for `GET <provider>/json/last/USD-BRL`.
#[derive(Debug, Clone)]
pub struct QuoteProvider {
    client: Client,
    url: String,
}

impl QuoteProvider {
    /// Creates a provider client targeting `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| QuoteError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: join_url(base_url, PROVIDER_PATH),
        })
    }

    /// Full URL the provider is queried at.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the raw provider body under `deadline`.
    ///
    /// A deadline expiry yields `QuoteError::Timeout` and logs the upstream
    /// diagnostic; any other failure is a `QuoteError::Transport` or
    /// `QuoteError::Status`.
    pub async fn fetch(&self, deadline: &Deadline) -> Result<String> {
        debug!("Requesting quote from {}", self.url);
        let result = deadline.run(self.send()).await;

        match &result {
            Err(e) if e.is_timeout() => warn!(
                "The request to the quote provider exceeded {}ms",
                deadline.budget().as_millis()
            ),
            Err(e) => error!("Error when requesting the quote provider: {}", e),
            Ok(_) => {}
        }
        result
    }

    async fn send(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(QuoteError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Maps a reqwest error to a `QuoteError`.
pub(crate) fn map_reqwest_error(error: reqwest::Error) -> QuoteError {
    if error.is_connect() {
        QuoteError::Transport(format!("Connection failed: {}", error))
    } else if error.is_decode() {
        QuoteError::Decode(error.to_string())
    } else {
        QuoteError::Transport(format!("HTTP request failed: {}", error))
    }
}
