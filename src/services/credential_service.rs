//! Credential service - password hashing and principal authentication.
//!
//! Passwords are never stored or compared in plaintext. Each principal gets
//! a random 16-byte salt, and the stored digest is HMAC-SHA256 of the password
//! keyed by that salt. Verification recomputes the digest and compares it in
//! constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{
    models::principal::Principal,
    store::{CredentialStore, StoreError},
};

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded salt and digest for a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash {
    pub salt: String,
    pub hash: String,
}

fn digest(salt: &[u8], password: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(salt).expect("HMAC key length is valid");
    mac.update(password.as_bytes());
    mac
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> PasswordHash {
    let salt: [u8; 16] = rand::random();
    let hash = digest(&salt, password).finalize().into_bytes();

    PasswordHash {
        salt: hex::encode(salt),
        hash: hex::encode(hash),
    }
}

/// Check a password against a stored salt and digest.
///
/// Returns `false` for a wrong password as well as for malformed stored values.
pub fn verify_password(password: &str, salt_hex: &str, hash_hex: &str) -> bool {
    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(hash_hex)) else {
        return false;
    };

    digest(&salt, password).verify_slice(&expected).is_ok()
}

/// Resolve Basic credentials to a principal.
///
/// # Returns
///
/// - `Ok(Some(principal))` if the user exists and the password matches
/// - `Ok(None)` if the user is unknown or the password is wrong
///
/// # Errors
///
/// - `Database`: the credential store could not be reached
pub async fn authenticate(
    store: &dyn CredentialStore,
    username: &str,
    password: &str,
) -> Result<Option<Principal>, StoreError> {
    let Some(record) = store.find_principal(username).await? else {
        tracing::debug!(username, "Unknown principal");
        return Ok(None);
    };

    if !verify_password(password, &record.password_salt, &record.password_hash) {
        tracing::debug!(username, "Password mismatch");
        return Ok(None);
    }

    Ok(Some(record.into()))
}
