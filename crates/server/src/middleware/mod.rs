//! HTTP middleware for the StorePulse server.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, outermost)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//!
//! Authorization is not a layer: each handler names its required capability
//! through the extractors in [`auth`], so the role check runs exactly once
//! at the boundary.

pub mod auth;
pub mod session;

pub use session::create_session_layer;
