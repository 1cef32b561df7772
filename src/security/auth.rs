//! Shared-secret authorization gate.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::GatewayError;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Header carrying the caller's credential.
pub const X_INTERNAL_AUTH: &str = "x-internal-auth";

/// Decide whether a presented credential passes the gate.
///
/// An empty `expected` value disables the check. A missing header is
/// treated as an empty credential. The header is compared byte for byte,
/// so credentials outside visible ASCII still match.
pub fn is_authorized(presented: Option<&[u8]>, expected: &str) -> bool {
    expected.is_empty() || presented.unwrap_or_default() == expected.as_bytes()
}

/// Middleware rejecting requests whose `X-Internal-Auth` header does not
/// match the configured token. Runs before any query parsing.
pub async fn require_internal_auth(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(X_INTERNAL_AUTH)
        .map(|v| v.as_bytes());

    if is_authorized(presented, &state.auth.token) {
        return next.run(request).await;
    }

    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    tracing::warn!(remote = %remote, path = %request.uri().path(), "Unauthorized access attempt");
    metrics::record_auth_rejection();

    GatewayError::Unauthorized.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_token_passes() {
        assert!(is_authorized(Some("s3cret".as_bytes()), "s3cret"));
    }

    #[test]
    fn test_non_ascii_token_matches_bytes() {
        assert!(is_authorized(Some("pässwort".as_bytes()), "pässwort"));
        assert!(!is_authorized(Some("passwort".as_bytes()), "pässwort"));
    }

    #[test]
    fn test_mismatch_or_missing_is_denied() {
        assert!(!is_authorized(Some("wrong".as_bytes()), "s3cret"));
        assert!(!is_authorized(Some("".as_bytes()), "s3cret"));
        assert!(!is_authorized(None, "s3cret"));
        assert!(!is_authorized(Some("S3CRET".as_bytes()), "s3cret"));
    }

    #[test]
    fn test_empty_expected_token_disables_gate() {
        assert!(is_authorized(None, ""));
        assert!(is_authorized(Some("anything".as_bytes()), ""));
    }
}
