//! Principal model for authentication.
//!
//! Principals are the users allowed to call the API. Their passwords are stored
//! as salted HMAC-SHA256 digests, never in plaintext.

use std::collections::BTreeSet;

/// Role a principal must hold to use the cash card endpoints.
pub const CARD_OWNER_ROLE: &str = "CARD-OWNER";

/// Represents a principal record from the credential store.
///
/// # Database Table
///
/// Maps to the `principals` table with columns:
/// - `username`: Unique login name, also used as the cash card owner
/// - `password_salt`: Random salt (32 hex characters)
/// - `password_hash`: HMAC-SHA256 of the password keyed by the salt (64 hex characters)
/// - `roles`: Roles granted to this principal
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PrincipalRecord {
    pub username: String,

    pub password_salt: String,

    /// When a request comes in with Basic credentials, we:
    /// 1. Look up the record by username
    /// 2. Recompute the HMAC of the supplied password with `password_salt`
    /// 3. Compare it with this value in constant time
    pub password_hash: String,

    pub roles: Vec<String>,
}

/// An authenticated principal.
///
/// Inserted into the request extensions by the auth middleware so handlers
/// know whose cash cards they are working with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub roles: BTreeSet<String>,
}

impl Principal {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

impl From<PrincipalRecord> for Principal {
    fn from(record: PrincipalRecord) -> Self {
        Self {
            username: record.username,
            roles: record.roles.into_iter().collect(),
        }
    }
}
