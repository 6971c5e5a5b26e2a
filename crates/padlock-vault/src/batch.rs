//! Batch decryption with per-record failure markers
//!
//! One undecryptable record never fails the whole batch: the caller gets
//! every record back, each either decrypted or carrying an explicit
//! `Unreadable` marker the UI can render as a placeholder. A failure is
//! never a silent empty value.

use crate::error::{VaultError, VaultResult};
use crate::item::{ItemMetadata, VaultItem, VaultRecord};
use crate::session::VaultSession;

/// The outcome for one record in a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemPayload {
    Item(VaultItem),
    Unreadable { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecryptedRecord {
    pub id: String,
    pub metadata: ItemMetadata,
    pub payload: ItemPayload,
}

impl DecryptedRecord {
    pub fn item(&self) -> Option<&VaultItem> {
        match &self.payload {
            ItemPayload::Item(item) => Some(item),
            ItemPayload::Unreadable { .. } => None,
        }
    }

    pub fn is_unreadable(&self) -> bool {
        matches!(self.payload, ItemPayload::Unreadable { .. })
    }
}

/// Decrypt a fetched batch of records, preserving order.
///
/// Fails outright only when the session is locked; per-record failures
/// (tag mismatch, malformed envelope, unexpected payload shape) become
/// `Unreadable` markers so the rest of the vault still displays.
pub fn decrypt_batch(
    session: &VaultSession,
    records: &[VaultRecord],
) -> VaultResult<Vec<DecryptedRecord>> {
    if !session.is_unlocked() {
        return Err(VaultError::Locked);
    }

    Ok(records
        .iter()
        .map(|record| {
            let payload = match session.decrypt_item(&record.encrypted_data) {
                Ok(item) => ItemPayload::Item(item),
                Err(err) => {
                    tracing::warn!(id = %record.id, error = %err, "failed to decrypt vault item");
                    ItemPayload::Unreadable {
                        reason: err.to_string(),
                    }
                }
            };
            DecryptedRecord {
                id: record.id.clone(),
                metadata: record.metadata.clone(),
                payload,
            }
        })
        .collect())
}
