//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Delegates to the card store held in `AppState`
//! 3. Returns HTTP response (JSON, status code)

/// Cash card endpoints
pub mod cash_cards;
/// Service health endpoint
pub mod health;
