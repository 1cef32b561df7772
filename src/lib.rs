//! Authenticated gateway in front of the Coolapk content API.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod security;
pub mod upstream;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::{CoolapkClient, FeedSource, UpstreamError, UpstreamResponse};
