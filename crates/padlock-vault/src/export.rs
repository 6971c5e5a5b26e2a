//! Vault backup export/import
//!
//! Two on-disk forms:
//!
//! - plain: `{ version, exportedAt, items: [VaultRecord] }` — the items stay
//!   individually encrypted under the account key, so a plain export still
//!   holds no plaintext secrets.
//! - protected: `{ encrypted: true, salt, data }` where `data` is the plain
//!   export JSON sealed in a standard envelope under a key derived from a
//!   backup passphrase with a fresh salt.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use padlock_crypto::{
    derive_encryption_key, envelope, generate_salt, ENCRYPTION_KEY_ITERATIONS, SALT_SIZE,
};

use crate::error::{VaultError, VaultResult};
use crate::item::VaultRecord;

pub const EXPORT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultExport {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub items: Vec<VaultRecord>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProtectedExport {
    encrypted: bool,
    /// base64-encoded fresh salt for the backup key
    salt: String,
    /// standard envelope around the plain export JSON
    data: String,
}

/// Serialize records into a backup, optionally sealed under a passphrase.
pub fn export_vault(
    records: &[VaultRecord],
    passphrase: Option<&SecretString>,
) -> VaultResult<String> {
    let export = VaultExport {
        version: EXPORT_VERSION,
        exported_at: Utc::now(),
        items: records.to_vec(),
    };
    let json = serde_json::to_string(&export)?;

    let Some(passphrase) = passphrase else {
        return Ok(json);
    };

    let salt = generate_salt()?;
    let key = derive_encryption_key(passphrase, &salt, ENCRYPTION_KEY_ITERATIONS)?;
    let data = envelope::encrypt_str(&key, &json)?;

    Ok(serde_json::to_string(&ProtectedExport {
        encrypted: true,
        salt: STANDARD.encode(salt),
        data,
    })?)
}

/// Read a backup produced by [`export_vault`], in either form.
///
/// A protected backup with a wrong passphrase surfaces
/// `AuthenticationFailure` — never partial data.
pub fn import_vault(
    input: &str,
    passphrase: Option<&SecretString>,
) -> VaultResult<Vec<VaultRecord>> {
    let value: serde_json::Value = serde_json::from_str(input)
        .map_err(|_| VaultError::Export("invalid backup format".into()))?;

    let is_protected = value
        .get("encrypted")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);

    if !is_protected {
        let export: VaultExport = serde_json::from_value(value)?;
        return Ok(export.items);
    }

    let protected: ProtectedExport = serde_json::from_value(value)?;
    let passphrase = passphrase
        .ok_or_else(|| VaultError::Export("passphrase required to decrypt this backup".into()))?;

    let raw_salt = STANDARD
        .decode(&protected.salt)
        .map_err(|e| VaultError::Export(format!("backup salt is not valid base64: {e}")))?;
    let salt: [u8; SALT_SIZE] = raw_salt
        .try_into()
        .map_err(|_| VaultError::Export(format!("backup salt must be {SALT_SIZE} bytes")))?;

    let key = derive_encryption_key(passphrase, &salt, ENCRYPTION_KEY_ITERATIONS)?;
    let export: VaultExport = envelope::decrypt(&key, &protected.data)?.deserialize()?;
    Ok(export.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemMetadata;
    use padlock_crypto::CryptoError;

    fn sample_records() -> Vec<VaultRecord> {
        vec![
            VaultRecord {
                id: "one".into(),
                encrypted_data: "c2VhbGVkLWJsb2Itb25l".into(),
                metadata: ItemMetadata {
                    domain: "example.com".into(),
                    name: "Example".into(),
                    favorite: false,
                    tags: vec![],
                },
            },
            VaultRecord {
                id: "two".into(),
                encrypted_data: "c2VhbGVkLWJsb2ItdHdv".into(),
                metadata: ItemMetadata::default(),
            },
        ]
    }

    #[test]
    fn test_plain_export_roundtrip() {
        let records = sample_records();

        let backup = export_vault(&records, None).unwrap();
        let imported = import_vault(&backup, None).unwrap();

        assert_eq!(imported, records);
    }

    #[test]
    fn test_plain_export_keeps_items_sealed() {
        let backup = export_vault(&sample_records(), None).unwrap();

        let value: serde_json::Value = serde_json::from_str(&backup).unwrap();
        assert_eq!(value["version"], EXPORT_VERSION);
        // Envelopes pass through untouched
        assert_eq!(value["items"][0]["encryptedData"], "c2VhbGVkLWJsb2Itb25l");
    }

    #[test]
    fn test_protected_export_roundtrip() {
        let records = sample_records();
        let passphrase = SecretString::from("backup-passphrase");

        let backup = export_vault(&records, Some(&passphrase)).unwrap();
        let imported = import_vault(&backup, Some(&passphrase)).unwrap();

        assert_eq!(imported, records);
    }

    #[test]
    fn test_protected_export_hides_contents() {
        let backup =
            export_vault(&sample_records(), Some(&SecretString::from("pp"))).unwrap();

        assert!(!backup.contains("example.com"));
        assert!(!backup.contains("c2VhbGVkLWJsb2Itb25l"));
    }

    #[test]
    fn test_wrong_passphrase_fails_closed() {
        let backup =
            export_vault(&sample_records(), Some(&SecretString::from("right"))).unwrap();

        let result = import_vault(&backup, Some(&SecretString::from("wrong")));

        assert!(matches!(
            result,
            Err(VaultError::Crypto(CryptoError::AuthenticationFailure))
        ));
    }

    #[test]
    fn test_protected_import_requires_passphrase() {
        let backup =
            export_vault(&sample_records(), Some(&SecretString::from("pp"))).unwrap();

        assert!(matches!(
            import_vault(&backup, None),
            Err(VaultError::Export(_))
        ));
    }

    #[test]
    fn test_invalid_backup_rejected() {
        assert!(matches!(
            import_vault("not json", None),
            Err(VaultError::Export(_))
        ));
    }
}
