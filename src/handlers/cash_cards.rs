//! Cash card HTTP handlers.
//!
//! This module implements the cash card API endpoints:
//! - GET /cashcards/{id} - Get one of the caller's cash cards
//! - GET /cashcards - List all of the caller's cash cards
//! - GET /cashcards/paged - List one sorted page of the caller's cash cards
//! - POST /cashcards - Create a cash card owned by the caller
//! - PUT /cashcards/{id} - Replace the amount of one of the caller's cash cards
//!
//! All routes sit behind the auth middleware, so every handler can rely on an
//! `Extension<Principal>` being present.

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::{
        cash_card::{CashCardRequest, CashCardResponse},
        page::{PageParams, PageRequest},
        principal::Principal,
    },
    state::AppState,
};

fn card_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))
}

fn card_body(
    body: Result<Json<CashCardRequest>, JsonRejection>,
) -> Result<CashCardRequest, AppError> {
    let Json(request) =
        body.map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))?;

    request.validate().map_err(AppError::InvalidRequest)
}

/// Get a specific cash card by ID.
///
/// # Authentication
///
/// Requires Basic credentials of a card owner. Returns 404 if the card doesn't
/// exist OR belongs to a different principal (prevents leaking which ids exist).
///
/// # Response
///
/// - **Success (200 OK)**: `{"id": 99, "amount": 123.45}`
/// - **Error (404)**: Not found or not owned, empty body
pub async fn find_by_id(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<CashCardResponse>, AppError> {
    let id = card_id(path)?;

    let card = state
        .cards
        .get_by_owner(id, &principal.username)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(card.into()))
}

/// List every cash card owned by the caller, ordered by id.
///
/// # Response
///
/// - **Success (200 OK)**: Array of cash cards (may be empty)
pub async fn find_all(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<CashCardResponse>>, AppError> {
    let cards = state
        .cards
        .list_by_owner(&principal.username, &PageRequest::unpaged())
        .await?;

    Ok(Json(cards.into_iter().map(Into::into).collect()))
}

/// List one page of the caller's cash cards.
///
/// # Query Parameters
///
/// - `page` - Zero-based page number (default 0)
/// - `size` - Page size, 1 to 2000 (default 20)
/// - `sort` - `field[,asc|desc]` where field is `id`, `amount` or `owner` (default `id,asc`)
///
/// # Example
///
/// `GET /cashcards/paged?page=0&size=1&sort=amount,desc` returns the caller's
/// largest card.
///
/// # Response
///
/// - **Success (200 OK)**: Array of cash cards (empty past the last page)
/// - **Error (400)**: Invalid paging parameters
pub async fn find_page(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Vec<CashCardResponse>>, AppError> {
    let Query(params) =
        query.map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))?;
    let page = PageRequest::from_params(params).map_err(AppError::InvalidRequest)?;

    let cards = state
        .cards
        .list_by_owner(&principal.username, &page)
        .await?;

    Ok(Json(cards.into_iter().map(Into::into).collect()))
}

/// Create a new cash card owned by the caller.
///
/// # Request Body
///
/// ```json
/// {
///   "amount": 250.00
/// }
/// ```
///
/// Any `id` or `owner` in the body is ignored.
///
/// # Response
///
/// - **Success (201 Created)**: Empty body, `Location: /cashcards/{id}`
/// - **Error (400)**: Missing or non-numeric amount, more than 2 decimal places, or 10^17 and above
pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<CashCardRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let request = card_body(body)?;

    let card = state
        .cards
        .create(request.amount, &principal.username)
        .await?;
    tracing::info!(id = card.id, owner = %card.owner, "Cash card created");

    let location = format!("/cashcards/{}", card.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)]))
}

/// Replace the amount of one of the caller's cash cards.
///
/// # Request Body
///
/// ```json
/// {
///   "amount": 19.99
/// }
/// ```
///
/// # Response
///
/// - **Success (204 No Content)**: Returned whether or not a card was updated.
///   A missing card and someone else's card both look like success, so the
///   response never reveals which ids exist.
/// - **Error (400)**: Missing or non-numeric amount, more than 2 decimal places, or 10^17 and above
pub async fn update(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<CashCardRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let id = card_id(path)?;
    let request = card_body(body)?;

    let updated = state
        .cards
        .update(id, &principal.username, request.amount)
        .await?;

    if updated.is_none() {
        tracing::debug!(id, owner = %principal.username, "Update matched no owned cash card");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for unknown paths under `/cashcards`.
///
/// Only reached after the auth middleware has accepted the caller.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
