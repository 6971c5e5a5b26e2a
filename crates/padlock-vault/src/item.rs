//! Vault item model: plaintext payload, plaintext metadata, wire record
//!
//! The payload is what gets sealed into an envelope. The metadata (domain,
//! display name, favorite flag, tags) is deliberately plaintext so the
//! server can search and sort without decrypting; it never passes through
//! the crypto core.

use serde::{Deserialize, Serialize};

/// The sensitive contents of one vault item, JSON-serialized and encrypted
/// before leaving the client.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VaultItem {
    pub url: String,
    pub username: String,
    pub password: String,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totp_secret: Option<String>,
}

impl std::fmt::Debug for VaultItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultItem")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("notes", &"[REDACTED]")
            .field(
                "totp_secret",
                &self.totp_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Non-sensitive metadata stored alongside the envelope, in cleartext.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemMetadata {
    /// Domain only, never the full URL
    pub domain: String,
    pub name: String,
    pub favorite: bool,
    pub tags: Vec<String>,
}

/// The wire shape exchanged with the server: an opaque envelope plus
/// plaintext metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultRecord {
    pub id: String,
    pub encrypted_data: String,
    #[serde(default)]
    pub metadata: ItemMetadata,
}
