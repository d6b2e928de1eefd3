//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers.
//! They can:
//! - Authenticate requests
//! - Short-circuit requests (reject unauthenticated or unauthorized callers)

/// HTTP Basic authentication and role check
pub mod auth;
