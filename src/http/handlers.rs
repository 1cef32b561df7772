//! Feed endpoints.
//!
//! Both handlers follow the same pipeline once the auth layer has let the
//! request through: parse the query, call the upstream under a deadline,
//! translate the outcome into exactly one response.

use std::future::Future;
use std::time::Instant;

use axum::{
    extract::{RawQuery, State},
    response::{IntoResponse, Response},
};
use tracing::Instrument;

use crate::error::GatewayError;
use crate::http::params::QueryParams;
use crate::http::response::passthrough;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::resilience::{Deadline, Elapsed};
use crate::upstream::{UpstreamError, UpstreamResponse};

const HEADLINES: &str = "headlines";
const TAG_FEED: &str = "tag_feed";

/// `GET /api/headlines?page=N`
pub async fn headlines(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let start = Instant::now();
    let response = fetch_headlines(&state, query.as_deref())
        .await
        .unwrap_or_else(|err| err.into_response());
    metrics::record_request(HEADLINES, response.status().as_u16(), start);
    response
}

/// `GET /api/tag?tag=T&page=N`
pub async fn tag_feed(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let start = Instant::now();
    let response = fetch_tag_feed(&state, query.as_deref())
        .await
        .unwrap_or_else(|err| err.into_response());
    metrics::record_request(TAG_FEED, response.status().as_u16(), start);
    response
}

/// Liveness check, outside the auth gate.
pub async fn health() -> &'static str {
    "OK"
}

async fn fetch_headlines(state: &AppState, query: Option<&str>) -> Result<Response, GatewayError> {
    let page = QueryParams::parse(query).page()?;
    let deadline = Deadline::after(state.upstream_timeout);

    let call = state.feeds.fetch_headlines(page, deadline);
    delegate(HEADLINES, page, None, deadline, call)
        .instrument(tracing::info_span!("headlines", page))
        .await
}

async fn fetch_tag_feed(state: &AppState, query: Option<&str>) -> Result<Response, GatewayError> {
    let params = QueryParams::parse(query);
    let tag = params.tag()?;
    let page = params.page()?;
    let deadline = Deadline::after(state.upstream_timeout);

    let call = state.feeds.fetch_tag_feed(tag, page, deadline);
    delegate(TAG_FEED, page, Some(tag), deadline, call)
        .instrument(tracing::info_span!("tag_feed", tag = %tag, page))
        .await
}

/// Run an upstream call under `deadline` and translate its outcome.
async fn delegate<F>(
    endpoint: &'static str,
    page: i64,
    tag: Option<&str>,
    deadline: Deadline,
    call: F,
) -> Result<Response, GatewayError>
where
    F: Future<Output = Result<UpstreamResponse, UpstreamError>>,
{
    let outcome = match deadline.run(call).await {
        Ok(result) => result,
        Err(Elapsed) => Err(UpstreamError::DeadlineExceeded),
    };

    outcome
        .and_then(passthrough)
        .map_err(|err| upstream_failure(endpoint, page, tag, err))
}

/// Log and count a failed upstream call. `page` and `tag` are recorded on
/// the event itself, not only on the request span.
fn upstream_failure(
    endpoint: &'static str,
    page: i64,
    tag: Option<&str>,
    err: UpstreamError,
) -> GatewayError {
    if err.is_deadline_exceeded() {
        tracing::warn!(endpoint, page, tag, "Request to Coolapk API timed out");
        metrics::record_upstream_failure(endpoint, "timeout");
        GatewayError::UpstreamTimeout
    } else {
        tracing::error!(endpoint, page, tag, error = %err, "Failed to fetch data from Coolapk API");
        metrics::record_upstream_failure(endpoint, "error");
        GatewayError::Upstream(err.to_string())
    }
}
