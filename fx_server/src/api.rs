//! HTTP endpoint serving the latest quote.
//!
//! `GET /cotacao` runs the quote chain for every request:
//!
//! 1. fetch the provider body under a fresh upstream deadline;
//! 2. check once whether the caller already gave up (`408` if so);
//! 3. parse the `USDBRL` object and coerce its bid;
//! 4. persist it under a fresh storage deadline;
//! 5. read back the latest quote under another fresh storage deadline.
//!
//! Every failure ends the request with a plain-text error; there are no retries and
//! no partial results. The caller's deadline is read from the
//! [`TIMEOUT_HEADER`](fx_common::net::TIMEOUT_HEADER) header.
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use fx_common::net::{CURRENCY_PAIR, QUOTE_PATH, TIMEOUT_HEADER};
use fx_common::{Quote, QuoteError, RequestContext, Result, Step};
use log::{error, info, warn};

use crate::config::ServerConfig;
use crate::model::provider::parse_pair_quote;
use crate::provider::QuoteProvider;
use crate::storage::QuoteStore;

/// Shared, read-only state of the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream quote provider.
    pub provider: Arc<QuoteProvider>,
    /// Quote storage backend.
    pub store: Arc<dyn QuoteStore>,
    /// Budget of the provider call.
    pub upstream_timeout: Duration,
    /// Budget of each storage operation.
    pub storage_timeout: Duration,
}

impl AppState {
    /// Builds the state from its parts, taking the budgets from `config`.
    pub fn new(provider: QuoteProvider, store: Arc<dyn QuoteStore>, config: &ServerConfig) -> Self {
        AppState {
            provider: Arc::new(provider),
            store,
            upstream_timeout: config.upstream_timeout,
            storage_timeout: config.storage_timeout,
        }
    }
}

/// Builds the router with every endpoint of the server.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(QUOTE_PATH, get(get_quote))
        .with_state(state)
}

/// Error returned by the handlers, rendered as a plain-text response.
#[derive(Debug)]
pub struct ApiError(pub QuoteError);

impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (status_for(&self.0), self.0.to_string()).into_response()
    }
}

/// HTTP status a failed request is answered with.
pub fn status_for(err: &QuoteError) -> StatusCode {
    match err {
        QuoteError::Cancelled => StatusCode::REQUEST_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn get_quote(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> std::result::Result<Json<Quote>, ApiError> {
    info!("Request started");
    let ctx = caller_context(&headers);
    let result = latest_quote(&state, &ctx).await;
    info!("Request ended");

    Ok(Json(result?))
}

/// Builds the caller's context from the timeout header.
///
/// An unreadable header is logged and treated as absent.
fn caller_context(headers: &HeaderMap) -> RequestContext {
    let value = headers.get(TIMEOUT_HEADER).map(|v| v.to_str().unwrap_or_default());
    RequestContext::from_timeout_header(value).unwrap_or_else(|e| {
        warn!("Ignoring {} header: {}", TIMEOUT_HEADER, e);
        RequestContext::background()
    })
}

/// Runs the full quote chain for one request on behalf of `ctx`.
pub async fn latest_quote(state: &AppState, ctx: &RequestContext) -> Result<Quote> {
    let upstream = ctx.bounded(Step::Upstream, state.upstream_timeout);
    let body = state.provider.fetch(&upstream).await?;

    if ctx.is_done() {
        info!("Request was cancelled by the client.");
        return Err(QuoteError::Cancelled);
    }

    let quote = parse_pair_quote(&body, CURRENCY_PAIR)
        .inspect_err(|e| error!("Failed to parse the provider response: {}", e))?;

    let persist = ctx.bounded(Step::Persist, state.storage_timeout);
    state.store.insert(&persist, &quote).await?;

    let readback = ctx.bounded(Step::Readback, state.storage_timeout);
    state.store.get_latest(&readback).await
}
