//! Error types shared between client and server.
//!
//! The `QuoteError` enum unifies the failure kinds of the quote chain
//! (transport, timeout, decode, storage, cancellation) together with the
//! plumbing I/O errors, allowing crates to propagate a single error type.
use std::io;
use std::time::Duration;

use strum_macros::Display;
use thiserror::Error;

/// Hop of the quote chain an error or a deadline belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Step {
    /// Requester → server call.
    Request,
    /// Server → quote provider call.
    Upstream,
    /// Quote insertion into storage.
    Persist,
    /// Read-back of the latest stored quote.
    Readback,
}

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Network failure while reaching the upstream provider or the server.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The peer answered with a non-success HTTP status.
    #[error("HTTP status {status}: {body}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// A bounded deadline elapsed before the step completed.
    #[error("{step} exceeded {}ms", .limit.as_millis())]
    Timeout {
        /// Step that ran out of time.
        step: Step,
        /// Budget the step was given.
        limit: Duration,
    },

    /// Malformed or unexpected JSON shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Insert or read-back failure in the storage backend.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid command-line or environment configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The caller gave up before the request could proceed.
    #[error("Request cancelled by the client")]
    Cancelled,

    /// I/O error originating from the standard library or sockets/files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl QuoteError {
    /// Builds a timeout error for `step` with the given budget.
    pub fn timeout(step: Step, limit: Duration) -> Self {
        QuoteError::Timeout { step, limit }
    }

    /// Returns `true` if this error is a deadline expiry.
    pub fn is_timeout(&self) -> bool {
        matches!(self, QuoteError::Timeout { .. })
    }

    /// Returns `true` if this error is a deadline expiry of the given step.
    pub fn is_timeout_of(&self, expected: Step) -> bool {
        matches!(self, QuoteError::Timeout { step, .. } if *step == expected)
    }
}
