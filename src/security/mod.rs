//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (/api/*)
//!     → auth.rs (X-Internal-Auth vs configured token)
//!     → 401 Unauthorized | handler
//! ```
//!
//! # Design Decisions
//! - Exact string comparison against a token injected at startup
//! - Empty token means the gate is open (fail-open, logged at startup)
//! - Applied as a route layer so unknown paths still 404

pub mod auth;

pub use auth::{is_authorized, require_internal_auth, X_INTERNAL_AUTH};
