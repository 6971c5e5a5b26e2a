//! Client configuration (padlock.toml)
//!
//! Defaults mirror the crate constants so every surface loading this file
//! derives with the same parameters.

use serde::{Deserialize, Serialize};

use padlock_crypto::{GeneratorPolicy, AUTH_HASH_ITERATIONS, ENCRYPTION_KEY_ITERATIONS};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub kdf: KdfConfig,
    pub generator: GeneratorPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KdfConfig {
    /// PBKDF2 iterations for the encryption key (default: 100000)
    pub encryption_iterations: u32,
    /// PBKDF2 iterations for the auth hash (default: 200000)
    pub auth_iterations: u32,
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self {
            encryption_iterations: ENCRYPTION_KEY_ITERATIONS,
            auth_iterations: AUTH_HASH_ITERATIONS,
        }
    }
}
