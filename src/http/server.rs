//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, auth gate)
//! - Bind server to listener
//! - Serve until the shutdown signal fires

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{AuthConfig, GatewayConfig};
use crate::http::handlers::{headlines, health, tag_feed};
use crate::http::request::{request_span, UuidRequestId};
use crate::security::require_internal_auth;
use crate::upstream::FeedSource;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub feeds: Arc<dyn FeedSource>,
    pub auth: Arc<AuthConfig>,
    pub upstream_timeout: Duration,
}

impl AppState {
    pub fn new(config: &GatewayConfig, feeds: Arc<dyn FeedSource>) -> Self {
        Self {
            feeds,
            auth: Arc::new(config.auth.clone()),
            upstream_timeout: Duration::from_secs(config.upstream.timeout_secs),
        }
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/headlines", any(headlines))
        .route("/api/tag", any(tag_feed))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_internal_auth,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and upstream.
    pub fn new(config: GatewayConfig, feeds: Arc<dyn FeedSource>) -> Self {
        let state = AppState::new(&config, feeds);
        let router = build_router(state);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream_timeout_secs = self.config.upstream.timeout_secs,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for in-process use.
    pub fn into_router(self) -> Router {
        self.router
    }
}
