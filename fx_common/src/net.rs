//! Shared networking constants and helpers used by client and server.
use std::time::Duration;

/// Default TCP port the quote server listens on.
pub const SERVER_PORT: u16 = 8080;
/// Path of the latest-quote endpoint.
pub const QUOTE_PATH: &str = "/cotacao";
/// Header through which the requester advertises its remaining budget, in milliseconds.
pub const TIMEOUT_HEADER: &str = "x-request-timeout-ms";

/// Default base URL of the upstream quote provider.
pub const PROVIDER_BASE_URL: &str = "https://economia.awesomeapi.com.br";
/// Provider path for the latest USD/BRL quote.
pub const PROVIDER_PATH: &str = "/json/last/USD-BRL";
/// Key of the currency-pair object in the provider response.
pub const CURRENCY_PAIR: &str = "USDBRL";

/// Overall deadline of the requester.
pub const CLIENT_TIMEOUT: Duration = Duration::from_millis(300);
/// Budget of the server → provider call.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_millis(200);
/// Budget of each storage operation.
pub const STORAGE_TIMEOUT: Duration = Duration::from_millis(10);

/// Helper to format an IPv4 address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

/// Joins a base URL and a path without doubling the slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
