//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace span)
//!     → security::auth (X-Internal-Auth gate, /api/* only)
//!     → handlers.rs
//!         → params.rs (page / tag validation)
//!         → upstream::FeedSource under a Deadline
//!         → response.rs (status, headers, raw body)
//!     → Send to client
//! ```

pub mod handlers;
pub mod params;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
