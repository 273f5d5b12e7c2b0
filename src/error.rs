//! Error types for the cracker.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that end an attack before it reaches a result.
///
/// Exhausting the candidate space is not an error; it is reported as
/// [`AttackResult::NotFound`](crate::AttackResult::NotFound).
#[derive(Error, Debug)]
pub enum CrackError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Wordlist error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to spawn worker thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    #[error("Search interrupted")]
    Interrupted,
}
