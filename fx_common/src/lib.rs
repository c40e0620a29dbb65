//!
//! Common types and utilities shared by the quote server and the requester.
//!
//! This crate aggregates:
//! - `error` — unified error type `QuoteError` and the `Step` of the chain it belongs to.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `quote` — the `Quote` record served by `GET /cotacao`.
//! - `context` — caller contexts and bounded sub-deadlines.
//! - `net` — networking constants, default budgets and small helpers.
#![warn(missing_docs)]
pub mod context;
pub mod error;
pub mod net;
pub mod quote;
pub mod result;

pub use context::{Deadline, RequestContext};
pub use error::{QuoteError, Step};
pub use quote::{NewQuote, Quote};
pub use result::Result;
