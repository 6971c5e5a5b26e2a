//! Secure random byte generation
//!
//! All randomness in this crate comes from the OS CSPRNG. If that source
//! fails, operations fail with `ProviderUnavailable` — there is no fallback
//! to a non-cryptographic PRNG.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{CryptoError, CryptoResult};
use crate::SALT_SIZE;

/// Fill `buf` from the OS CSPRNG, failing closed if it is unavailable.
pub(crate) fn fill_secure(buf: &mut [u8]) -> CryptoResult<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CryptoError::ProviderUnavailable(e.to_string()))
}

/// Generate a fresh 16-byte key-derivation salt.
///
/// Generated once at registration and stored server-side in cleartext (the
/// salt is not secret); every later derivation for that account reuses it.
pub fn generate_salt() -> CryptoResult<[u8; SALT_SIZE]> {
    let mut salt = [0u8; SALT_SIZE];
    fill_secure(&mut salt)?;
    Ok(salt)
}
