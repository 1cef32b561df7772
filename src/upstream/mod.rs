//! Upstream content API subsystem.
//!
//! # Data Flow
//! ```text
//! Handler (page / tag, Deadline)
//!     → FeedSource trait (injected as Arc<dyn FeedSource>)
//!     → coolapk.rs (reqwest call, app headers)
//!         → token.rs (X-App-Token)
//!     → UpstreamResponse { status, raw body } | UpstreamError
//! ```
//!
//! # Design Decisions
//! - Bodies stay opaque bytes; nothing is parsed or re-encoded
//! - The client is built once and shared across requests
//! - Deadline expiry is its own error variant so handlers can answer 504

pub mod coolapk;
pub mod token;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::resilience::Deadline;

pub use coolapk::CoolapkClient;

/// Raw result of an upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    /// Status assigned by the upstream, `0` when unset.
    pub status: u16,
    /// Serialized JSON payload, forwarded verbatim.
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Errors that can occur while talking to the upstream API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The per-request deadline elapsed before the upstream answered.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Connection, TLS or protocol failure.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid value for header {0}")]
    InvalidHeader(&'static str),

    /// The upstream answered with a status that cannot be forwarded.
    #[error("invalid upstream status code {0}")]
    InvalidStatus(u16),
}

impl UpstreamError {
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, UpstreamError::DeadlineExceeded)
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::DeadlineExceeded
        } else {
            UpstreamError::Transport(err)
        }
    }
}

/// Capability to fetch feed listings from the content API.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Top headlines for `page`.
    async fn fetch_headlines(
        &self,
        page: i64,
        deadline: Deadline,
    ) -> Result<UpstreamResponse, UpstreamError>;

    /// Feeds carrying `tag`, for `page`.
    async fn fetch_tag_feed(
        &self,
        tag: &str,
        page: i64,
        deadline: Deadline,
    ) -> Result<UpstreamResponse, UpstreamError>;
}
