//! padlock-crypto: Client-side cryptography for the Padlock password manager
//!
//! Zero-knowledge architecture: every operation that touches a key or a
//! plaintext runs on the client. The server only ever stores the auth hash,
//! the KDF parameters (salt + iterations, both non-secret), and opaque
//! envelopes.
//!
//! Key derivation:
//! ```text
//! Master Password + salt(16 bytes)
//!   ├── Auth Hash       (PBKDF2-SHA256, 200k iterations, base64) → sent to server at login
//!   └── Encryption Key  (PBKDF2-SHA256, 100k iterations, 256-bit) → never leaves the client
//! ```
//!
//! Envelope format (bit-compatible across all client surfaces):
//! ```text
//! base64( nonce(12 bytes) || AES-256-GCM ciphertext + tag(16 bytes) )
//! ```

pub mod envelope;
pub mod error;
pub mod generate;
pub mod kdf;
pub mod random;
pub mod strength;

pub use envelope::{decrypt, encrypt_json, encrypt_str, DecryptedPayload};
pub use error::{CryptoError, CryptoResult};
pub use generate::{generate_password, GeneratorPolicy};
pub use kdf::{derive_auth_hash, derive_encryption_key, EncryptionKey};
pub use random::generate_salt;
pub use strength::{analyze_password, StrengthCategory, StrengthReport};

/// Size of an encryption key in bytes (256-bit)
pub const KEY_SIZE: usize = 32;

/// Size of an AES-GCM nonce (96-bit)
pub const NONCE_SIZE: usize = 12;

/// Size of a GCM authentication tag
pub const TAG_SIZE: usize = 16;

/// Size of a key-derivation salt
pub const SALT_SIZE: usize = 16;

/// Default PBKDF2 iteration count for the encryption key
pub const ENCRYPTION_KEY_ITERATIONS: u32 = 100_000;

/// Default PBKDF2 iteration count for the authentication hash
pub const AUTH_HASH_ITERATIONS: u32 = 200_000;
