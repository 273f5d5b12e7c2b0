//! Target hashes and candidate verification.
//!
//! This module provides:
//! - The supported hash algorithms (RustCrypto digests and bcrypt)
//! - Target hash validation
//! - The [`Verifier`] seam used by the worker pool

mod algorithm;
mod target;

pub use algorithm::HashAlgorithm;
pub use target::TargetHash;

/// Decides whether a candidate password produces the target hash.
///
/// Implementations are shared read-only across all worker threads and must
/// never fail: an error while checking a candidate counts as a non-match.
pub trait Verifier: Send + Sync {
    fn verify(&self, candidate: &str) -> bool;
}
