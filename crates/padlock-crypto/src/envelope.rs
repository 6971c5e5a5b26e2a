//! Authenticated envelope encryption for vault payloads
//!
//! Envelope format (binary, then base64):
//! ```text
//! [12 bytes: random nonce][N bytes: ciphertext][16 bytes: GCM tag]
//! ```
//!
//! The nonce is freshly random for every call and never reused under the
//! same key, so encrypting the same plaintext twice yields different
//! envelopes. Decryption fails closed: a tag mismatch is
//! `AuthenticationFailure`, never partial plaintext.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CryptoError, CryptoResult};
use crate::kdf::EncryptionKey;
use crate::random::fill_secure;
use crate::{NONCE_SIZE, TAG_SIZE};

/// A decrypted payload: JSON if the plaintext parses as JSON, raw text
/// otherwise.
///
/// This mirrors what every other client surface does with an envelope, so a
/// blob written by one surface reads identically everywhere.
#[derive(Debug, Clone, PartialEq)]
pub enum DecryptedPayload {
    Json(serde_json::Value),
    Text(String),
}

impl DecryptedPayload {
    /// Deserialize the payload into a typed value.
    pub fn deserialize<T: DeserializeOwned>(self) -> CryptoResult<T> {
        match self {
            DecryptedPayload::Json(value) => Ok(serde_json::from_value(value)?),
            DecryptedPayload::Text(text) => Ok(serde_json::from_str(&text)?),
        }
    }

    /// The payload as text. JSON payloads re-serialize compactly.
    pub fn into_text(self) -> String {
        match self {
            DecryptedPayload::Json(value) => value.to_string(),
            DecryptedPayload::Text(text) => text,
        }
    }
}

/// Encrypt a raw string payload.
pub fn encrypt_str(key: &EncryptionKey, plaintext: &str) -> CryptoResult<String> {
    seal(key, plaintext.as_bytes())
}

/// JSON-serialize and encrypt a structured payload.
pub fn encrypt_json<T: Serialize>(key: &EncryptionKey, value: &T) -> CryptoResult<String> {
    let json = serde_json::to_string(value)?;
    seal(key, json.as_bytes())
}

/// Decrypt an envelope produced by any client surface.
///
/// Fails with `MalformedEnvelope` when the input is not valid base64 or is
/// shorter than nonce + tag, and with `AuthenticationFailure` when the tag
/// does not verify.
pub fn decrypt(key: &EncryptionKey, envelope: &str) -> CryptoResult<DecryptedPayload> {
    let plaintext = open(key, envelope)?;
    let text = String::from_utf8(plaintext)
        .map_err(|_| CryptoError::MalformedEnvelope("decrypted payload is not UTF-8".into()))?;

    match serde_json::from_str(&text) {
        Ok(value) => Ok(DecryptedPayload::Json(value)),
        Err(_) => Ok(DecryptedPayload::Text(text)),
    }
}

fn seal(key: &EncryptionKey, plaintext: &[u8]) -> CryptoResult<String> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    fill_secure(&mut nonce_bytes)?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| CryptoError::ProviderUnavailable("AEAD encryption failed".into()))?;

    let mut combined = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    combined.extend_from_slice(&nonce_bytes);
    combined.extend_from_slice(&ciphertext);
    Ok(STANDARD.encode(&combined))
}

fn open(key: &EncryptionKey, envelope: &str) -> CryptoResult<Vec<u8>> {
    let raw = STANDARD
        .decode(envelope)
        .map_err(|e| CryptoError::MalformedEnvelope(format!("base64 decode: {e}")))?;

    if raw.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CryptoError::MalformedEnvelope(format!(
            "envelope too short: {} bytes (minimum {})",
            raw.len(),
            NONCE_SIZE + TAG_SIZE
        )));
    }

    let (nonce_bytes, ciphertext) = raw.split_at(NONCE_SIZE);
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| CryptoError::AuthenticationFailure)
}
