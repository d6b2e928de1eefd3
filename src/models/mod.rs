//! Data models representing stored entities and API payloads.

/// Cash card entity and request/response bodies
pub mod cash_card;
/// Paging and sorting parameters
pub mod page;
/// Authenticated principal model
pub mod principal;
