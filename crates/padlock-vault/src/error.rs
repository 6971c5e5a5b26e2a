use thiserror::Error;

use padlock_crypto::CryptoError;

pub type VaultResult<T> = Result<T, VaultError>;

#[derive(Debug, Error)]
pub enum VaultError {
    /// No encryption key is resident; the caller must unlock first.
    #[error("vault session is locked")]
    Locked,

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// The background derivation task did not run to completion.
    #[error("unlock interrupted: {0}")]
    UnlockInterrupted(String),

    #[error("vault export: {0}")]
    Export(String),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}
