//! Request-scoped error taxonomy and its HTTP mapping.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";
pub const TIMEOUT_MESSAGE: &str = "The request to Coolapk API timed out";
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch data from Coolapk API";

/// Every way a request can end without a passthrough response.
///
/// Each variant is terminal: it is turned into exactly one plain-text
/// response and never propagates past the handler.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("unauthorized")]
    Unauthorized,

    /// Malformed or missing query parameter; the message names it.
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("upstream deadline exceeded")]
    UpstreamTimeout,

    /// Any other upstream failure; the detail is logged, never returned.
    #[error("upstream failure: {0}")]
    Upstream(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body shown to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            GatewayError::Unauthorized => UNAUTHORIZED_MESSAGE,
            GatewayError::BadRequest(msg) => *msg,
            GatewayError::UpstreamTimeout => TIMEOUT_MESSAGE,
            GatewayError::Upstream(_) => UPSTREAM_FAILURE_MESSAGE,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/plain; charset=utf-8"),
                ),
                (
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ),
            ],
            self.public_message(),
        )
            .into_response()
    }
}
