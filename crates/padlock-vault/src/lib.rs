//! padlock-vault: the client session layer of the Padlock password manager
//!
//! Sits between the UI surfaces and `padlock-crypto`. Owns the one piece of
//! mutable client state — the resident [`session::VaultSession`] encryption
//! key — and the vault item model exchanged with the server as opaque
//! envelopes plus plaintext metadata.
//!
//! Flow:
//! ```text
//! master password + stored {salt, iterations}
//!   → account::login_material (auth hash, sent to server)
//!   → VaultSession::unlock    (encryption key, resident until lock)
//!   → session.encrypt_item / batch::decrypt_batch
//! ```

pub mod account;
pub mod batch;
pub mod config;
pub mod error;
pub mod export;
pub mod item;
pub mod session;

pub use account::{login_material, registration_material, RegistrationMaterial, StoredKdf};
pub use batch::{decrypt_batch, DecryptedRecord, ItemPayload};
pub use config::ClientConfig;
pub use error::{VaultError, VaultResult};
pub use export::{export_vault, import_vault, VaultExport, EXPORT_VERSION};
pub use item::{ItemMetadata, VaultItem, VaultRecord};
pub use session::VaultSession;
