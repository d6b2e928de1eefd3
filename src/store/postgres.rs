//! PostgreSQL-backed store.
//!
//! Every query that acts on behalf of a caller filters on `owner` in SQL, so
//! ownership is enforced by the database rather than after the fact.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::{CashCardStore, CredentialStore, StoreError};
use crate::{
    db::DbPool,
    models::{cash_card::CashCard, page::PageRequest, principal::PrincipalRecord},
};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert demo principals and cash cards.
    ///
    /// Existing rows are left alone, so this is safe to run on every startup.
    /// The id sequence is moved past the seeded ids afterwards so new cards
    /// never collide with them.
    pub async fn seed(
        &self,
        principals: &[PrincipalRecord],
        cards: &[CashCard],
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        for principal in principals {
            sqlx::query(
                r#"
                INSERT INTO principals (username, password_salt, password_hash, roles)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (username) DO NOTHING
                "#,
            )
            .bind(&principal.username)
            .bind(&principal.password_salt)
            .bind(&principal.password_hash)
            .bind(&principal.roles)
            .execute(&mut *tx)
            .await?;
        }

        for card in cards {
            sqlx::query(
                r#"
                INSERT INTO cash_cards (id, amount, owner)
                VALUES ($1, $2, $3)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(card.id)
            .bind(card.amount)
            .bind(&card.owner)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('cash_cards', 'id'), \
             (SELECT COALESCE(MAX(id), 0) + 1 FROM cash_cards), false)",
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }
}

#[async_trait]
impl CashCardStore for PgStore {
    async fn get(&self, id: i64) -> Result<Option<CashCard>, StoreError> {
        let card = sqlx::query_as::<_, CashCard>(
            "SELECT id, amount, owner FROM cash_cards WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    async fn get_by_owner(&self, id: i64, owner: &str) -> Result<Option<CashCard>, StoreError> {
        let card = sqlx::query_as::<_, CashCard>(
            "SELECT id, amount, owner FROM cash_cards WHERE id = $1 AND owner = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    async fn list_by_owner(
        &self,
        owner: &str,
        page: &PageRequest,
    ) -> Result<Vec<CashCard>, StoreError> {
        // Sort column and direction come from closed enums, never from raw input.
        // LIMIT NULL means no limit in PostgreSQL.
        let sql = format!(
            r#"
            SELECT id, amount, owner
            FROM cash_cards
            WHERE owner = $1
            ORDER BY {}, id ASC
            LIMIT $2 OFFSET $3
            "#,
            page.sort
        );

        let cards = sqlx::query_as::<_, CashCard>(&sql)
            .bind(owner)
            .bind(page.size.map(i64::from))
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(cards)
    }

    async fn create(&self, amount: Decimal, owner: &str) -> Result<CashCard, StoreError> {
        let card = sqlx::query_as::<_, CashCard>(
            r#"
            INSERT INTO cash_cards (amount, owner)
            VALUES ($1, $2)
            RETURNING id, amount, owner
            "#,
        )
        .bind(amount)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(card)
    }

    async fn update(
        &self,
        id: i64,
        owner: &str,
        amount: Decimal,
    ) -> Result<Option<CashCard>, StoreError> {
        // Single statement: the ownership check and the write are one row-level
        // atomic operation.
        let card = sqlx::query_as::<_, CashCard>(
            r#"
            UPDATE cash_cards
            SET amount = $1
            WHERE id = $2 AND owner = $3
            RETURNING id, amount, owner
            "#,
        )
        .bind(amount)
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn find_principal(
        &self,
        username: &str,
    ) -> Result<Option<PrincipalRecord>, StoreError> {
        let record = sqlx::query_as::<_, PrincipalRecord>(
            r#"
            SELECT username, password_salt, password_hash, roles
            FROM principals
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}

// These run against a real database:
// DATABASE_URL=postgres://... cargo test -- --ignored
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::page::{PageRequest, Sort},
        seed,
    };

    async fn seeded(pool: DbPool) -> PgStore {
        let store = PgStore::new(pool);
        store
            .seed(&seed::demo_principals(), &seed::demo_cards())
            .await
            .unwrap();
        store
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn seeding_twice_keeps_rows_and_bumps_the_sequence(pool: DbPool) {
        let store = seeded(pool).await;
        store
            .seed(&seed::demo_principals(), &seed::demo_cards())
            .await
            .unwrap();

        let card = store.create(Decimal::new(25000, 2), "sarah1").await.unwrap();

        assert_eq!(card.id, 103);
        assert_eq!(card.amount, Decimal::new(25000, 2));
        assert_eq!(store.get(103).await.unwrap(), Some(card));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn get_by_owner_hides_other_owners_cards(pool: DbPool) {
        let store = seeded(pool).await;

        assert!(store.get(102).await.unwrap().is_some());
        assert_eq!(store.get_by_owner(102, "sarah1").await.unwrap(), None);
        assert_eq!(
            store.get_by_owner(99, "sarah1").await.unwrap().map(|c| c.amount),
            Some(Decimal::new(12345, 2))
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn unpaged_listing_returns_every_owned_card(pool: DbPool) {
        let store = seeded(pool).await;

        let ids: Vec<i64> = store
            .list_by_owner("sarah1", &PageRequest::unpaged())
            .await
            .unwrap()
            .into_iter()
            .map(|card| card.id)
            .collect();

        assert_eq!(ids, vec![99, 100, 101]);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn sorted_pages_follow_the_requested_order(pool: DbPool) {
        let store = seeded(pool).await;
        let sort: Sort = "amount,desc".parse().unwrap();

        let first = store
            .list_by_owner("sarah1", &PageRequest::of(0, 1, sort))
            .await
            .unwrap();
        let second = store
            .list_by_owner("sarah1", &PageRequest::of(1, 2, sort))
            .await
            .unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, 101);
        let ids: Vec<i64> = second.into_iter().map(|card| card.id).collect();
        assert_eq!(ids, vec![100]);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn update_only_touches_owned_cards(pool: DbPool) {
        let store = seeded(pool).await;

        let updated = store
            .update(99, "sarah1", Decimal::new(1999, 2))
            .await
            .unwrap()
            .unwrap();
        assert_eq!((updated.id, updated.owner.as_str()), (99, "sarah1"));
        assert_eq!(updated.amount, Decimal::new(1999, 2));

        assert_eq!(store.update(102, "sarah1", Decimal::ZERO).await.unwrap(), None);
        assert_eq!(
            store.get(102).await.unwrap().map(|c| c.amount),
            Some(Decimal::new(20000, 2))
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn finds_seeded_principals_with_roles(pool: DbPool) {
        let store = seeded(pool).await;

        let sarah = store.find_principal("sarah1").await.unwrap().unwrap();
        assert_eq!(sarah.roles, vec!["CARD-OWNER".to_string()]);
        assert!(store.find_principal("BAD-USER").await.unwrap().is_none());
        store.ping().await.unwrap();
    }
}
