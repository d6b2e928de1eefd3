//! Cash Card Service library.
//!
//! REST API for managing cash cards. Every cash card belongs to the principal
//! that created it, and callers only ever see or modify their own cards.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Storage**: `CashCardStore` / `CredentialStore` traits, backed by
//!   PostgreSQL via sqlx or by an in-memory store
//! - **Authentication**: HTTP Basic with salted HMAC-SHA256 password hashes
//! - **Authorization**: `CARD-OWNER` role required for all `/cashcards` routes
//! - **Format**: JSON requests/responses

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod seed;
pub mod services;
pub mod state;
pub mod store;

pub use state::AppState;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, put},
};
use tower_http::trace::TraceLayer;

/// Build the HTTP router with all routes and middleware.
///
/// # Routes
///
/// - `GET /health` (public)
/// - `GET /cashcards`, `POST /cashcards`
/// - `GET /cashcards/paged`
/// - `GET /cashcards/{id}`, `PUT /cashcards/{id}`
///
/// Anything else under `/cashcards` is still authenticated before it gets a 404.
pub fn app(state: AppState) -> Router {
    // Every request under /cashcards, matched or not, requires Basic
    // credentials and the card owner role
    let cash_card_routes = Router::new()
        .route(
            "/",
            get(handlers::cash_cards::find_all).post(handlers::cash_cards::create),
        )
        .route("/paged", get(handlers::cash_cards::find_page))
        .route(
            "/{id}",
            put(handlers::cash_cards::update).get(handlers::cash_cards::find_by_id),
        )
        .fallback(handlers::cash_cards::not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/cashcards", cash_card_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
