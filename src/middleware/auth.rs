//! HTTP Basic authentication middleware.
//!
//! This middleware intercepts every `/cashcards` request to:
//! 1. Extract Basic credentials from the Authorization header
//! 2. Verify them against the credential store
//! 3. Check the principal holds the card owner role
//! 4. Inject the principal into the request

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::{
    error::AppError,
    models::principal::CARD_OWNER_ROLE,
    services::credential_service,
    state::AppState,
};

/// Decode an `Authorization: Basic <base64(user:pass)>` header value.
///
/// Returns `None` for any other scheme or for malformed credentials.
pub fn parse_basic_credentials(header_value: &str) -> Option<(String, String)> {
    let encoded = header_value.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_string(), password.to_string()))
}

/// Basic authentication middleware function.
///
/// # Flow
///
/// 1. Extract `Authorization: Basic <credentials>` header from request
/// 2. Look up the principal and verify the password hash
/// 3. If unknown or mismatched: return 401 Unauthorized
/// 4. If the principal lacks `CARD-OWNER`: return 403 Forbidden
/// 5. Otherwise inject `Principal` into request, call next handler
///
/// # Returns
///
/// - `Ok(Response)` if authenticated and authorized (calls next handler)
/// - `Err(AppError::Unauthenticated)` if authentication fails (401)
/// - `Err(AppError::Forbidden)` if the role check fails (403)
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (username, password) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(parse_basic_credentials)
        .ok_or(AppError::Unauthenticated)?;

    let principal =
        credential_service::authenticate(state.credentials.as_ref(), &username, &password)
            .await?
            .ok_or(AppError::Unauthenticated)?;

    if !principal.has_role(CARD_OWNER_ROLE) {
        tracing::debug!(username = %principal.username, "Principal lacks card owner role");
        return Err(AppError::Forbidden);
    }

    // Handlers extract this with Extension<Principal>
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_credentials() {
        let header = format!("Basic {}", STANDARD.encode("sarah1:abc123"));

        assert_eq!(
            parse_basic_credentials(&header),
            Some(("sarah1".to_string(), "abc123".to_string()))
        );
    }

    #[test]
    fn password_may_contain_colons() {
        let header = format!("Basic {}", STANDARD.encode("sarah1:a:b:c"));

        assert_eq!(
            parse_basic_credentials(&header).map(|(_, password)| password),
            Some("a:b:c".to_string())
        );
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert_eq!(parse_basic_credentials("Bearer abc123"), None);
        assert_eq!(parse_basic_credentials("Basic !!!not-base64!!!"), None);
        let no_colon = format!("Basic {}", STANDARD.encode("sarah1"));
        assert_eq!(parse_basic_credentials(&no_colon), None);
    }
}
