//! HTTP middleware stack for the dashboard.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Security headers
//! 4. Session layer (tower-sessions, in-memory store)
//! 5. Route guard (route table + access guard)

pub mod auth;
pub mod session;

pub use auth::{
    CurrentIdentity, clear_current_identity, route_guard, set_current_identity,
};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
