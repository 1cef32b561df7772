//! Upstream response translation.
//!
//! # Responsibilities
//! - Forward the upstream status (0 means 200)
//! - Attach the JSON content type and the edge cache policy
//! - Write the upstream body byte for byte
//!
//! # Design Decisions
//! - The body is never parsed or re-encoded
//! - A status that cannot be put on the wire counts as an upstream failure

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::upstream::{UpstreamError, UpstreamResponse};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const EDGE_CACHE_CONTROL: &str = "s-maxage=600, stale-while-revalidate=0";

/// Status to send for an upstream status code.
pub fn effective_status(upstream: u16) -> Result<StatusCode, UpstreamError> {
    if upstream == 0 {
        return Ok(StatusCode::OK);
    }
    StatusCode::from_u16(upstream).map_err(|_| UpstreamError::InvalidStatus(upstream))
}

/// Build the passthrough response for a successful upstream call.
pub fn passthrough(upstream: UpstreamResponse) -> Result<Response, UpstreamError> {
    let status = effective_status(upstream.status)?;

    Ok((
        status,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE)),
            (header::CACHE_CONTROL, HeaderValue::from_static(EDGE_CACHE_CONTROL)),
        ],
        Body::from(upstream.body),
    )
        .into_response())
}
