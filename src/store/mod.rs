//! Ownership-scoped persistence for cash cards and principals.
//!
//! Handlers never talk to a database directly. They hold an
//! `Arc<dyn CashCardStore>` and an `Arc<dyn CredentialStore>` chosen at startup:
//! - `PgStore` when `DATABASE_URL` is configured
//! - `MemoryStore` otherwise (and in tests)
//!
//! # Not Found vs. Not Yours
//!
//! Store operations never fail because a card is missing or owned by someone
//! else. Both cases come back as `Ok(None)` (or are filtered out of listings),
//! so a caller cannot tell them apart. Only infrastructure faults are errors.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::models::{cash_card::CashCard, page::PageRequest, principal::PrincipalRecord};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage-layer fault.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Cash card persistence, scoped to an owner wherever a caller is involved.
#[async_trait]
pub trait CashCardStore: Send + Sync {
    /// Unscoped lookup by id.
    async fn get(&self, id: i64) -> Result<Option<CashCard>, StoreError>;

    /// Lookup by id that only succeeds when `owner` owns the card.
    async fn get_by_owner(&self, id: i64, owner: &str) -> Result<Option<CashCard>, StoreError>;

    /// One page of `owner`'s cards, ordered by the requested sort with `id`
    /// ascending as a tie-breaker.
    async fn list_by_owner(
        &self,
        owner: &str,
        page: &PageRequest,
    ) -> Result<Vec<CashCard>, StoreError>;

    /// Store a new card with a freshly assigned id.
    async fn create(&self, amount: Decimal, owner: &str) -> Result<CashCard, StoreError>;

    /// Replace the amount of `owner`'s card `id`, keeping id and owner.
    ///
    /// Returns `None` without touching anything if the card is missing or
    /// belongs to someone else.
    async fn update(
        &self,
        id: i64,
        owner: &str,
        amount: Decimal,
    ) -> Result<Option<CashCard>, StoreError>;

    /// Check that the backing storage is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Source of principal credentials and roles.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_principal(
        &self,
        username: &str,
    ) -> Result<Option<PrincipalRecord>, StoreError>;
}
