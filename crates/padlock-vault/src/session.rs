//! Session key lifecycle
//!
//! A [`VaultSession`] is an explicit value owned by the caller — there is no
//! ambient key storage. States:
//!
//! ```text
//! Locked ──unlock(password, salt, iterations)──▶ Unlocked ──lock()──▶ Locked
//! ```
//!
//! The unlock itself is the in-flight future: dropping it aborts the attempt
//! and the session stays `Locked` with no key resident. The resident key is
//! immutable once derived; a fresh unlock replaces it wholesale. The only
//! way out of `Locked` is re-supplying the master password.

use secrecy::SecretString;

use padlock_crypto::{derive_encryption_key, envelope, EncryptionKey, SALT_SIZE};

use crate::account::StoredKdf;
use crate::error::{VaultError, VaultResult};
use crate::item::VaultItem;

enum SessionState {
    Locked,
    Unlocked { key: EncryptionKey },
}

/// The one piece of mutable client state: the resident encryption key, or
/// the `Locked` marker.
pub struct VaultSession {
    state: SessionState,
}

impl Default for VaultSession {
    fn default() -> Self {
        Self::locked()
    }
}

impl VaultSession {
    /// A fresh session with no key resident.
    pub fn locked() -> Self {
        Self {
            state: SessionState::Locked,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self.state, SessionState::Unlocked { .. })
    }

    /// Derive the encryption key and make it resident.
    ///
    /// Called after the server has accepted the auth hash (login or MFA
    /// success), with the salt and iteration count stored for the account.
    /// The CPU-bound derivation runs on the blocking pool so the caller's
    /// executor thread is never stalled. On failure the session stays
    /// `Locked`; the caller must re-prompt for credentials.
    pub async fn unlock(
        &mut self,
        password: SecretString,
        salt: [u8; SALT_SIZE],
        iterations: u32,
    ) -> VaultResult<()> {
        let key =
            tokio::task::spawn_blocking(move || derive_encryption_key(&password, &salt, iterations))
                .await
                .map_err(|e| VaultError::UnlockInterrupted(e.to_string()))??;

        self.state = SessionState::Unlocked { key };
        tracing::debug!("vault session unlocked");
        Ok(())
    }

    /// Unlock using the account's server-stored derivation parameters.
    pub async fn unlock_with_stored(
        &mut self,
        password: SecretString,
        stored: &StoredKdf,
    ) -> VaultResult<()> {
        let salt = stored.salt_bytes()?;
        self.unlock(password, salt, stored.iterations).await
    }

    /// Discard the resident key (zeroized on drop). Safe to call from any
    /// state; used for logout, explicit lock, and session teardown.
    pub fn lock(&mut self) {
        self.state = SessionState::Locked;
        tracing::debug!("vault session locked");
    }

    fn key(&self) -> VaultResult<&EncryptionKey> {
        match &self.state {
            SessionState::Unlocked { key } => Ok(key),
            SessionState::Locked => Err(VaultError::Locked),
        }
    }

    /// Seal a vault item into an envelope for upload.
    pub fn encrypt_item(&self, item: &VaultItem) -> VaultResult<String> {
        Ok(envelope::encrypt_json(self.key()?, item)?)
    }

    /// Open an envelope fetched from the server into a vault item.
    pub fn decrypt_item(&self, sealed: &str) -> VaultResult<VaultItem> {
        let payload = envelope::decrypt(self.key()?, sealed)?;
        Ok(payload.deserialize()?)
    }

    /// Seal an arbitrary string payload (used for protected backups and
    /// non-item blobs).
    pub fn encrypt_text(&self, plaintext: &str) -> VaultResult<String> {
        Ok(envelope::encrypt_str(self.key()?, plaintext)?)
    }
}
