//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and bodies.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::store::StoreError;

/// Realm advertised in the `WWW-Authenticate` challenge.
pub const AUTH_REALM: &str = "cashcards";

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code.
///
/// # Error Categories
///
/// - **Storage Errors**: The card or credential store failed
/// - **Authentication Errors**: Missing or invalid Basic credentials
/// - **Authorization Errors**: Valid credentials without the card owner role
/// - **Resource Errors**: Cash card missing or owned by someone else
/// - **Validation Errors**: Malformed body, path, or query parameters
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Store operation failed (e.g., connection error, query error).
    ///
    /// Returns HTTP 500. Details are logged, never sent to the client.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Credentials are missing, malformed, or do not match a principal.
    ///
    /// Returns HTTP 401 Unauthorized with a Basic challenge.
    #[error("Authentication required")]
    Unauthenticated,

    /// Principal is authenticated but lacks the card owner role.
    ///
    /// Returns HTTP 403 Forbidden.
    #[error("Access denied")]
    Forbidden,

    /// Cash card does not exist or doesn't belong to the authenticated principal.
    ///
    /// Returns HTTP 404 Not Found with an empty body, so the two cases look identical.
    #[error("Cash card not found")]
    NotFound,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// Except for 404, errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `Unauthenticated` → 401 Unauthorized (+ `WWW-Authenticate: Basic`)
/// - `Forbidden` → 403 Forbidden
/// - `NotFound` → 404 Not Found (empty body)
/// - `InvalidRequest` → 400 Bad Request
/// - `Storage` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound => return StatusCode::NOT_FOUND.into_response(),
            AppError::Unauthenticated => {
                let body = Json(json!({
                    "error": {
                        "code": "unauthenticated",
                        "message": self.to_string()
                    }
                }));
                let challenge = format!("Basic realm=\"{AUTH_REALM}\"");

                return (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, challenge)],
                    body,
                )
                    .into_response();
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden", self.to_string()),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Storage(ref err) => {
                tracing::error!(error = %err, "Storage failure while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
