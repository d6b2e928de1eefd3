//! In-process store used when no database is configured, and by the tests.
//!
//! Cards live in a `BTreeMap` keyed by id behind a single `RwLock`, so id
//! assignment and every read/write are atomic with respect to each other.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::{CashCardStore, CredentialStore, StoreError};
use crate::models::{
    cash_card::CashCard,
    page::{PageRequest, Sort, SortDirection, SortField},
    principal::PrincipalRecord,
};

#[derive(Debug, Default)]
struct Cards {
    next_id: i64,
    by_id: BTreeMap<i64, CashCard>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    cards: RwLock<Cards>,
    principals: RwLock<HashMap<String, PrincipalRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load principals and cards, replacing any with the same key.
    ///
    /// New cards created afterwards get ids past the largest seeded id.
    pub async fn seed(&self, principals: Vec<PrincipalRecord>, cards: Vec<CashCard>) {
        {
            let mut stored = self.principals.write().await;
            for principal in principals {
                stored.insert(principal.username.clone(), principal);
            }
        }

        let mut stored = self.cards.write().await;
        for card in cards {
            stored.by_id.insert(card.id, card);
        }
        let max_id = stored.by_id.keys().next_back().copied().unwrap_or(0);
        stored.next_id = stored.next_id.max(max_id);
    }
}

/// Order two cards by the requested sort, then by id ascending.
fn compare(a: &CashCard, b: &CashCard, sort: Sort) -> Ordering {
    let primary = match sort.field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Amount => a.amount.cmp(&b.amount),
        SortField::Owner => a.owner.cmp(&b.owner),
    };
    let primary = match sort.direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };

    primary.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl CashCardStore for MemoryStore {
    async fn get(&self, id: i64) -> Result<Option<CashCard>, StoreError> {
        Ok(self.cards.read().await.by_id.get(&id).cloned())
    }

    async fn get_by_owner(&self, id: i64, owner: &str) -> Result<Option<CashCard>, StoreError> {
        let cards = self.cards.read().await;
        Ok(cards
            .by_id
            .get(&id)
            .filter(|card| card.owner == owner)
            .cloned())
    }

    async fn list_by_owner(
        &self,
        owner: &str,
        page: &PageRequest,
    ) -> Result<Vec<CashCard>, StoreError> {
        let mut owned: Vec<CashCard> = {
            let cards = self.cards.read().await;
            cards
                .by_id
                .values()
                .filter(|card| card.owner == owner)
                .cloned()
                .collect()
        };

        owned.sort_by(|a, b| compare(a, b, page.sort));

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = page
            .size
            .and_then(|size| usize::try_from(size).ok())
            .unwrap_or(usize::MAX);

        Ok(owned.into_iter().skip(offset).take(limit).collect())
    }

    async fn create(&self, amount: Decimal, owner: &str) -> Result<CashCard, StoreError> {
        let mut cards = self.cards.write().await;
        cards.next_id += 1;

        let card = CashCard {
            id: cards.next_id,
            amount,
            owner: owner.to_string(),
        };
        cards.by_id.insert(card.id, card.clone());

        Ok(card)
    }

    async fn update(
        &self,
        id: i64,
        owner: &str,
        amount: Decimal,
    ) -> Result<Option<CashCard>, StoreError> {
        let mut cards = self.cards.write().await;

        match cards.by_id.get_mut(&id) {
            Some(card) if card.owner == owner => {
                card.amount = amount;
                Ok(Some(card.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_principal(
        &self,
        username: &str,
    ) -> Result<Option<PrincipalRecord>, StoreError> {
        Ok(self.principals.read().await.get(username).cloned())
    }
}
