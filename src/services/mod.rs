//! Business logic services.
//!
//! Services contain logic separated from HTTP handlers and middleware.

pub mod credential_service;
