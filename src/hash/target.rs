//! The hash being cracked.

use crate::config::ConfigError;

use super::{HashAlgorithm, Verifier};

/// Prefixes accepted for bcrypt hashes.
const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// A validated target hash.
///
/// Immutable once built; workers share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetHash {
    algorithm: HashAlgorithm,
    hash: String,
}

impl TargetHash {
    /// Creates a target hash, checking its format against the algorithm.
    ///
    /// Digest hashes must be lowercase hex of the algorithm's exact length.
    /// Bcrypt hashes must carry a `$2a$`, `$2b$` or `$2y$` prefix.
    pub fn new(algorithm: HashAlgorithm, hash: impl Into<String>) -> Result<Self, ConfigError> {
        let hash = hash.into();

        match algorithm.hex_len() {
            Some(expected) => {
                if hash.len() != expected {
                    return Err(ConfigError::InvalidHash(format!(
                        "Invalid {} hash length: expected {} characters, got {}",
                        algorithm,
                        expected,
                        hash.len()
                    )));
                }
                if !hash.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')) {
                    return Err(ConfigError::InvalidHash(format!(
                        "Invalid {} hash characters: expected lowercase hex",
                        algorithm
                    )));
                }
            }
            None => {
                if !BCRYPT_PREFIXES.iter().any(|p| hash.starts_with(p)) {
                    return Err(ConfigError::InvalidHash(
                        "Invalid bcrypt hash format: expected $2a$, $2b$ or $2y$ prefix".into(),
                    ));
                }
            }
        }

        Ok(Self { algorithm, hash })
    }

    /// Returns the hash algorithm.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Returns the target hash string.
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl Verifier for TargetHash {
    #[inline]
    fn verify(&self, candidate: &str) -> bool {
        match self.algorithm.hasher() {
            Some(mut hasher) => {
                hasher.update(candidate.as_bytes());
                hex::encode(hasher.finalize()) == self.hash
            }
            // bcrypt errors (bad salt, bad cost, oversized input) are non-matches
            None => bcrypt::verify(candidate, &self.hash).unwrap_or(false),
        }
    }
}
