//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Handler
//!     → timeouts.rs (Deadline: now + upstream budget)
//!     → upstream client (sees remaining budget)
//!     → Deadline::run races the call against the deadline
//!     → Ok(result) | Elapsed → 504
//! ```
//!
//! # Design Decisions
//! - A single per-request deadline; no retries, no backoff
//! - Inbound cancellation is future drop, not a separate signal

pub mod timeouts;

pub use timeouts::{Deadline, Elapsed, DEFAULT_UPSTREAM_TIMEOUT};
