//! # hash_cracker
//!
//! Parallel password hash cracker.
//!
//! ## Architecture
//!
//! - `hash`: Target hashes and candidate verification
//! - `keyspace`: Index <-> password mapping and keyspace partitioning
//! - `mutator`: Dictionary word mutations
//! - `source`: Lazy candidate sources (wordlist, brute force)
//! - `worker`: Worker pool and search coordination
//! - `config`: Runtime configuration

pub mod config;
pub mod error;
pub mod hash;
pub mod keyspace;
pub mod mutator;
pub mod source;
pub mod worker;

pub use config::{AttackMode, Config, ConfigError};
pub use error::CrackError;
pub use hash::{HashAlgorithm, TargetHash, Verifier};
pub use keyspace::{CharSet, Keyspace, WorkUnit};
pub use mutator::mutate;
pub use source::{Batch, BruteForceSource, CandidateSource, DictionarySource};
pub use worker::{AttackResult, Coordinator, WorkerPool, WorkerStats};
