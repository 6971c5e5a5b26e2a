use thiserror::Error;

pub type CryptoResult<T> = Result<T, CryptoError>;

#[derive(Debug, Error)]
pub enum CryptoError {
    /// The platform's cryptographic primitives are unavailable or failed.
    /// Fatal to any operation; there is no insecure fallback path.
    #[error("crypto provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// AEAD tag verification failed: wrong key, corrupted data, or tampering.
    /// The payload cannot be trusted; no partial plaintext is returned.
    #[error("authentication failed: wrong key, corrupted data, or tampering")]
    AuthenticationFailure,

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("payload serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}
