//! Demo principals and cash cards.
//!
//! Loaded into the in-memory store on startup, and into PostgreSQL when
//! `SEED_DEMO_DATA=true`.

use rust_decimal::Decimal;

use crate::{
    models::{
        cash_card::CashCard,
        principal::{CARD_OWNER_ROLE, PrincipalRecord},
    },
    services::credential_service::hash_password,
};

/// (username, password, role)
const DEMO_PRINCIPALS: &[(&str, &str, &str)] = &[
    ("sarah1", "abc123", CARD_OWNER_ROLE),
    ("kumar2", "xyz789", CARD_OWNER_ROLE),
    ("hank-owns-no-cards", "qrs456", "NON-OWNER"),
];

/// Demo principals with freshly salted password hashes.
pub fn demo_principals() -> Vec<PrincipalRecord> {
    DEMO_PRINCIPALS
        .iter()
        .map(|&(username, password, role)| {
            let hashed = hash_password(password);
            PrincipalRecord {
                username: username.to_string(),
                password_salt: hashed.salt,
                password_hash: hashed.hash,
                roles: vec![role.to_string()],
            }
        })
        .collect()
}

pub fn demo_cards() -> Vec<CashCard> {
    [
        (99, Decimal::new(12345, 2), "sarah1"),
        (100, Decimal::new(100, 2), "sarah1"),
        (101, Decimal::new(15000, 2), "sarah1"),
        (102, Decimal::new(20000, 2), "kumar2"),
    ]
    .into_iter()
    .map(|(id, amount, owner)| CashCard {
        id,
        amount,
        owner: owner.to_string(),
    })
    .collect()
}
