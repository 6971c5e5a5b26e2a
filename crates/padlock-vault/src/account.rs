//! Registration and login key material
//!
//! The server never sees the master password or the encryption key. At
//! registration the client generates a salt, derives the auth hash, and
//! sends `{ authHash, salt, iterations }`; at login it re-derives the auth
//! hash from the stored parameters for the server to compare. Whether the
//! password was right is the server's call (auth-hash comparison) — a
//! failure here is a derivation failure, not a wrong-password signal.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use padlock_crypto::{
    derive_auth_hash, generate_salt, CryptoError, AUTH_HASH_ITERATIONS,
    ENCRYPTION_KEY_ITERATIONS, SALT_SIZE,
};

use crate::error::{VaultError, VaultResult};

/// The non-secret derivation parameters persisted server-side with the
/// account record. The salt is generated exactly once at registration and
/// reused for every later derivation; `iterations` is the encryption-key
/// count (the auth hash always uses [`AUTH_HASH_ITERATIONS`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredKdf {
    /// base64-encoded 16-byte salt
    pub salt: String,
    pub iterations: u32,
}

impl StoredKdf {
    pub fn salt_bytes(&self) -> VaultResult<[u8; SALT_SIZE]> {
        let raw = STANDARD.decode(&self.salt).map_err(|e| {
            CryptoError::KeyDerivation(format!("stored salt is not valid base64: {e}"))
        })?;
        let salt: [u8; SALT_SIZE] = raw.try_into().map_err(|_| {
            CryptoError::KeyDerivation(format!("stored salt must be {SALT_SIZE} bytes"))
        })?;
        Ok(salt)
    }
}

/// Everything the registration request needs from the crypto core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationMaterial {
    pub auth_hash: String,
    pub kdf: StoredKdf,
}

/// Produce the auth hash and derivation parameters for a new account.
pub async fn registration_material(password: SecretString) -> VaultResult<RegistrationMaterial> {
    tokio::task::spawn_blocking(move || -> VaultResult<RegistrationMaterial> {
        let salt = generate_salt()?;
        let auth_hash = derive_auth_hash(&password, &salt, AUTH_HASH_ITERATIONS)?;
        Ok(RegistrationMaterial {
            auth_hash,
            kdf: StoredKdf {
                salt: STANDARD.encode(salt),
                iterations: ENCRYPTION_KEY_ITERATIONS,
            },
        })
    })
    .await
    .map_err(|e| VaultError::UnlockInterrupted(e.to_string()))?
}

/// Reproduce the auth hash for a login attempt from the account's stored
/// parameters.
pub async fn login_material(password: SecretString, stored: &StoredKdf) -> VaultResult<String> {
    let salt = stored.salt_bytes()?;
    tokio::task::spawn_blocking(move || derive_auth_hash(&password, &salt, AUTH_HASH_ITERATIONS))
        .await
        .map_err(|e| VaultError::UnlockInterrupted(e.to_string()))?
        .map_err(Into::into)
}
