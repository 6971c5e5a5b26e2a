//! Key derivation: master password → auth hash + encryption key
//!
//! Both secrets come from the same PBKDF2-HMAC-SHA256 construction but with
//! different iteration counts and different roles. The auth hash (200k
//! iterations, base64) is sent to the server in place of the raw password;
//! the encryption key (100k iterations, 256-bit) never leaves the client.
//! A leaked auth hash therefore does not hand over the means to decrypt
//! vault contents. Both still reduce to the master password, so the scheme's
//! actual security boundary is the secrecy and strength of that password.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::error::{CryptoError, CryptoResult};
use crate::{KEY_SIZE, SALT_SIZE};

/// A 256-bit symmetric key derived from the master password.
///
/// Exists only in volatile client memory while a session is unlocked; never
/// serialized to durable storage. Zeroized on drop to prevent secrets
/// lingering in memory.
#[derive(Clone)]
pub struct EncryptionKey {
    bytes: [u8; KEY_SIZE],
}

impl EncryptionKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for EncryptionKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derive the 256-bit vault encryption key from a master password.
///
/// Deterministic: the same `(password, salt, iterations)` always yields the
/// same key bits, so login can reproduce the key from the server-stored
/// parameters. The recommended iteration count is
/// [`crate::ENCRYPTION_KEY_ITERATIONS`].
pub fn derive_encryption_key(
    password: &SecretString,
    salt: &[u8; SALT_SIZE],
    iterations: u32,
) -> CryptoResult<EncryptionKey> {
    tracing::debug!(iterations, "deriving encryption key");
    Ok(EncryptionKey::from_bytes(derive_bits(
        password, salt, iterations,
    )?))
}

/// Derive the base64 authentication hash sent to the server at registration
/// and login in place of the raw password.
///
/// Same PBKDF2 construction as the encryption key, but derived at a higher
/// iteration count ([`crate::AUTH_HASH_ITERATIONS`]) and never used as
/// cipher key material.
pub fn derive_auth_hash(
    password: &SecretString,
    salt: &[u8; SALT_SIZE],
    iterations: u32,
) -> CryptoResult<String> {
    tracing::debug!(iterations, "deriving auth hash");
    let mut bits = derive_bits(password, salt, iterations)?;
    let encoded = STANDARD.encode(bits);
    bits.zeroize();
    Ok(encoded)
}

fn derive_bits(
    password: &SecretString,
    salt: &[u8; SALT_SIZE],
    iterations: u32,
) -> CryptoResult<[u8; KEY_SIZE]> {
    if password.expose_secret().is_empty() {
        return Err(CryptoError::KeyDerivation("empty master password".into()));
    }
    if iterations == 0 {
        return Err(CryptoError::KeyDerivation(
            "iteration count must be positive".into(),
        ));
    }

    let mut out = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(
        password.expose_secret().as_bytes(),
        salt,
        iterations,
        &mut out,
    );
    Ok(out)
}
