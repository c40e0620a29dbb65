//! Quote payload shared by client and server.
//!
//! A `Quote` is the record persisted by the server and returned by `GET /cotacao`.
//! A `NewQuote` is the transient value parsed from the provider response, before
//! storage assigns it an identifier and a creation timestamp.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted exchange-rate quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Identifier assigned by storage, monotonic across inserts.
    pub id: i64,
    /// Currency code (e.g., `USD`).
    pub code: String,
    /// Bid price for the currency pair.
    pub bid: f64,
    /// Moment the quote was persisted.
    pub created_at: DateTime<Utc>,
}

impl Quote {
    /// Human-readable line written by the requester, e.g. `Dólar: 5.1234`.
    pub fn dollar_line(&self) -> String {
        format!("Dólar: {:.4}", self.bid)
    }
}

/// Quote parsed from the provider, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuote {
    /// Currency code.
    pub code: String,
    /// Bid price.
    pub bid: f64,
}

impl NewQuote {
    /// Creates a new transient quote.
    pub fn new(code: &str, bid: f64) -> Self {
        NewQuote {
            code: String::from(code),
            bid,
        }
    }
}
