//! Cash card data models and API request/response types.
//!
//! This module defines:
//! - `CashCard`: Database entity representing a cash card
//! - `CashCardRequest`: Request body for creating and updating cash cards
//! - `CashCardResponse`: Response body returned to clients

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a cash card record from the store.
///
/// # Database Table
///
/// Maps to the `cash_cards` table. Each cash card:
/// - Has a server-assigned `id` that never changes
/// - Belongs to exactly one principal (via `owner`)
///
/// # Amount Storage
///
/// Amounts are stored as `NUMERIC(19, 2)` and carried as `Decimal`, so
/// `123.45` stays `123.45` instead of drifting through binary floating point.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct CashCard {
    /// Unique identifier, assigned by the store on creation
    pub id: i64,

    /// Current amount on the card (single implicit currency)
    pub amount: Decimal,

    /// Username of the principal that created the card
    ///
    /// Every query that reads or mutates a card on behalf of a caller filters
    /// on this column so one principal never sees another principal's cards.
    pub owner: String,
}

/// Request body for creating or replacing a cash card.
///
/// # JSON Example
///
/// ```json
/// {
///   "amount": 250.00
/// }
/// ```
///
/// Clients may send `id` and `owner` as well (for example when echoing back a
/// previously fetched card). Both are ignored: the id comes from the store and
/// the owner from the authenticated principal.
#[derive(Debug, Deserialize)]
pub struct CashCardRequest {
    pub amount: Decimal,
}

/// Digits after the decimal point the `NUMERIC(19, 2)` column keeps.
pub const AMOUNT_SCALE: u32 = 2;

/// Amounts must stay strictly below this magnitude (17 integer digits).
pub const AMOUNT_LIMIT: i64 = 100_000_000_000_000_000;

impl CashCardRequest {
    /// Check that the amount fits the stored column exactly.
    ///
    /// Every store must accept the same amounts and return them unchanged, so
    /// amounts PostgreSQL would round or overflow are rejected up front.
    pub fn validate(self) -> Result<Self, String> {
        if self.amount.normalize().scale() > AMOUNT_SCALE {
            return Err(format!(
                "Amount must have at most {AMOUNT_SCALE} decimal places"
            ));
        }
        if self.amount.abs() >= Decimal::from(AMOUNT_LIMIT) {
            return Err(format!("Amount must be less than {AMOUNT_LIMIT} in magnitude"));
        }

        Ok(self)
    }
}

/// Response body for cash card endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 99,
///   "amount": 123.45
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CashCardResponse {
    pub id: i64,
    pub amount: Decimal,
}

/// Convert a stored CashCard into the client-facing CashCardResponse.
///
/// This transformation removes the internal `owner` field.
impl From<CashCard> for CashCardResponse {
    fn from(card: CashCard) -> Self {
        Self {
            id: card.id,
            amount: card.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_serializes_id_and_amount_only() {
        let card = CashCard {
            id: 99,
            amount: Decimal::new(12345, 2),
            owner: "sarah1".to_string(),
        };

        let body = serde_json::to_value(CashCardResponse::from(card)).unwrap();

        assert_eq!(body, json!({ "id": 99, "amount": 123.45 }));
    }

    #[test]
    fn request_ignores_client_supplied_id_and_owner() {
        let request: CashCardRequest =
            serde_json::from_value(json!({ "id": 7, "amount": 250.0, "owner": "mallory" }))
                .unwrap();

        assert_eq!(request.amount, Decimal::new(25000, 2));
    }

    #[test]
    fn accepts_amounts_that_fit_the_column() {
        for amount in [json!(250.00), json!(19.99), json!(-0.5), json!(99_999_999_999_999_999i64)] {
            let request: CashCardRequest =
                serde_json::from_value(json!({ "amount": amount })).unwrap();
            assert!(request.validate().is_ok(), "amount {amount}");
        }
    }

    #[test]
    fn rejects_extra_decimal_places() {
        let request: CashCardRequest = serde_json::from_value(json!({ "amount": 1.005 })).unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn rejects_amounts_too_large_for_the_column() {
        for amount in [json!(1e20), json!(-1e17)] {
            let request: CashCardRequest =
                serde_json::from_value(json!({ "amount": amount })).unwrap();
            assert!(request.validate().is_err(), "amount {amount}");
        }
    }

    #[test]
    fn request_without_amount_is_rejected() {
        let result = serde_json::from_value::<CashCardRequest>(json!({ "id": null }));

        assert!(result.is_err());
    }
}
