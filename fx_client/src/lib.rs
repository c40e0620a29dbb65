//! Requester for the FX quote server.
//!
//! - `requester` — the single bounded call to `GET /cotacao` and its outcome.
//! - `output` — atomic writing of the `Dólar: <bid>` line.
//! - `args` — command-line interface.
#![warn(missing_docs)]
pub mod args;
pub mod output;
pub mod requester;

pub use requester::{Outcome, Requester};
