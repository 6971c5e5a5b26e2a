//! Random password generation against a character-class policy
//!
//! This is a security-relevant generation path: indices are drawn from the
//! OS CSPRNG, never a general-purpose PRNG.

use serde::{Deserialize, Serialize};

use crate::error::CryptoResult;
use crate::random::fill_secure;

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Character-class policy for password generation.
///
/// If every class is disabled, generation falls back to lowercase + digits
/// instead of failing, so a caller that unchecks every box still gets a
/// usable password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorPolicy {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for GeneratorPolicy {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
        }
    }
}

impl GeneratorPolicy {
    fn charset(&self) -> Vec<char> {
        let mut chars = String::new();
        if self.uppercase {
            chars.push_str(UPPERCASE);
        }
        if self.lowercase {
            chars.push_str(LOWERCASE);
        }
        if self.digits {
            chars.push_str(DIGITS);
        }
        if self.symbols {
            chars.push_str(SYMBOLS);
        }
        if chars.is_empty() {
            chars.push_str(LOWERCASE);
            chars.push_str(DIGITS);
        }
        chars.chars().collect()
    }
}

/// Generate a random password.
///
/// Draws one 32-bit value from the OS CSPRNG per character and reduces it
/// modulo the charset size — the same selection every other client surface
/// uses, so all of them sample the same distribution. Output length always
/// equals `policy.length`.
pub fn generate_password(policy: &GeneratorPolicy) -> CryptoResult<String> {
    let charset = policy.charset();

    let mut raw = vec![0u8; policy.length * 4];
    fill_secure(&mut raw)?;

    Ok(raw
        .chunks_exact(4)
        .map(|chunk| {
            let value = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            charset[value as usize % charset.len()]
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_invariant() {
        for length in [1, 2, 8, 16, 64, 128] {
            let policy = GeneratorPolicy {
                length,
                ..GeneratorPolicy::default()
            };
            assert_eq!(generate_password(&policy).unwrap().len(), length);
        }
    }

    #[test]
    fn test_single_class_respected() {
        let policy = GeneratorPolicy {
            length: 64,
            uppercase: false,
            lowercase: false,
            digits: true,
            symbols: false,
        };

        let password = generate_password(&policy).unwrap();
        assert!(password.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_symbols_only() {
        let policy = GeneratorPolicy {
            length: 64,
            uppercase: false,
            lowercase: false,
            digits: false,
            symbols: true,
        };

        let password = generate_password(&policy).unwrap();
        assert!(password.chars().all(|c| SYMBOLS.contains(c)));
    }

    #[test]
    fn test_zero_classes_falls_back_to_lowercase_digits() {
        let policy = GeneratorPolicy {
            length: 64,
            uppercase: false,
            lowercase: false,
            digits: false,
            symbols: false,
        };

        let password = generate_password(&policy).unwrap();
        assert_eq!(password.len(), 64);
        assert!(password
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_consecutive_passwords_differ() {
        let policy = GeneratorPolicy::default();

        let p1 = generate_password(&policy).unwrap();
        let p2 = generate_password(&policy).unwrap();

        assert_ne!(p1, p2);
    }

    #[test]
    fn test_long_password_uses_every_class() {
        // 256 draws over a 94-character set; each class is overwhelmingly
        // likely to appear at least once.
        let policy = GeneratorPolicy {
            length: 256,
            ..GeneratorPolicy::default()
        };

        let password = generate_password(&policy).unwrap();
        assert!(password.chars().any(|c| c.is_ascii_uppercase()));
        assert!(password.chars().any(|c| c.is_ascii_lowercase()));
        assert!(password.chars().any(|c| c.is_ascii_digit()));
        assert!(password.chars().any(|c| SYMBOLS.contains(c)));
    }
}
