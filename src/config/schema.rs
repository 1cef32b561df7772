//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::resilience::DEFAULT_UPSTREAM_TIMEOUT;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Shared-secret authorization settings.
    pub auth: AuthConfig,

    /// Coolapk upstream client settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Internal authorization configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Expected value of the `X-Internal-Auth` header.
    ///
    /// An empty token disables the authorization gate entirely.
    pub token: String,
}

impl AuthConfig {
    /// Whether the gate lets every request through.
    pub fn is_disabled(&self) -> bool {
        self.token.is_empty()
    }
}

/// Coolapk API client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Scheme and host of the Coolapk API.
    pub base_url: String,

    /// Path of the top headlines listing.
    pub headlines_path: String,

    /// Path of the tag feed listing.
    pub tag_feed_path: String,

    /// Deadline for a single upstream call in seconds.
    pub timeout_secs: u64,

    /// App version advertised to the API.
    pub app_version: String,

    /// App build code advertised to the API.
    pub app_code: String,

    /// API version header value.
    pub api_version: String,

    /// Device code used for token generation. Random when empty.
    pub device_code: String,

    /// Honour HTTP(S)_PROXY from the environment.
    pub system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coolapk.com".to_string(),
            headlines_path: "/v6/main/indexV8".to_string(),
            tag_feed_path: "/v6/topic/tagFeedList".to_string(),
            timeout_secs: DEFAULT_UPSTREAM_TIMEOUT.as_secs(),
            app_version: "13.4.1".to_string(),
            app_code: "2312121".to_string(),
            api_version: "13".to_string(),
            device_code: String::new(),
            system_proxy: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
