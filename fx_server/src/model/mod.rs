//! Domain models used by the quote server.
//!
//! - `provider` — provider payload types and the string-or-number bid coercion.

pub mod provider;
