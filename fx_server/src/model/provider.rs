//! Provider payload model and bid coercion.
//!
//! The provider answers with an object keyed by currency pair, e.g.
//! `{"USDBRL": {"code": "USD", "bid": "5.0869", ...}}`. The `bid` field usually
//! arrives as a numeric-looking string but may also be a plain JSON number, so it is
//! decoded into the `BidValue` union and coerced to `f64` explicitly.
use std::collections::HashMap;

use fx_common::{NewQuote, QuoteError, Result};
use serde::Deserialize;

/// Raw `bid` value as sent by the provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BidValue {
    /// Plain JSON number.
    Number(f64),
    /// Numeric string, e.g. `"5.0869"`.
    Text(String),
    /// Any other scalar or structure.
    Other(serde_json::Value),
}

impl BidValue {
    /// Coerces the bid to a finite `f64`.
    pub fn to_f64(&self) -> Result<f64> {
        let value = match self {
            BidValue::Number(n) => *n,
            BidValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| QuoteError::Decode(format!("bid {:?} is not a number: {}", s, e)))?,
            BidValue::Other(v) => {
                return Err(QuoteError::Decode(format!("unsupported bid value: {}", v)));
            }
        };
        if !value.is_finite() {
            return Err(QuoteError::Decode(format!("bid is not finite: {}", value)));
        }
        Ok(value)
    }
}

/// Quote object nested under the currency-pair key.
#[derive(Debug, Clone, Deserialize)]
pub struct PairQuote {
    /// Currency code, e.g. `USD`.
    pub code: String,
    /// Bid price, number or numeric string.
    pub bid: BidValue,
}

/// Parses a provider body and extracts the quote stored under `pair`.
pub fn parse_pair_quote(body: &str, pair: &str) -> Result<NewQuote> {
    let mut root: HashMap<String, serde_json::Value> = serde_json::from_str(body)
        .map_err(|e| QuoteError::Decode(format!("provider body is not a JSON object: {}", e)))?;
    let value = root
        .remove(pair)
        .ok_or_else(|| QuoteError::Decode(format!("missing currency pair {}", pair)))?;
    let quote: PairQuote = serde_json::from_value(value)
        .map_err(|e| QuoteError::Decode(format!("invalid {} object: {}", pair, e)))?;

    Ok(NewQuote::new(&quote.code, quote.bid.to_f64()?))
}
