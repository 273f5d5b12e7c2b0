//! Runtime configuration for the cracker.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use crate::hash::{HashAlgorithm, TargetHash};
use crate::keyspace::{CharSet, Keyspace, DEFAULT_CHARSET};
use crate::source::DEFAULT_BATCH_SIZE;

/// How candidates are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackMode {
    /// Words from a wordlist, optionally mutated
    Dict,
    /// Every password up to a maximum length over a charset
    Brute,
}

impl FromStr for AttackMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dict" | "dictionary" => Ok(AttackMode::Dict),
            "brute" | "bruteforce" => Ok(AttackMode::Brute),
            _ => Err(format!("Unknown attack mode: {} (expected dict or brute)", s)),
        }
    }
}

impl fmt::Display for AttackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackMode::Dict => write!(f, "dictionary"),
            AttackMode::Brute => write!(f, "brute force"),
        }
    }
}

/// Parallel password hash cracker
#[derive(Parser, Debug, Clone)]
#[command(name = "cracker", author, version, about, long_about = None)]
pub struct Config {
    /// Target hash to crack
    pub hash: String,

    /// Hash algorithm used: md5, sha1, sha256, sha512 or bcrypt
    pub hash_type: HashAlgorithm,

    /// Attack mode: dict or brute
    pub mode: AttackMode,

    /// Wordlist path (dictionary attack)
    #[arg(short, long)]
    pub wordlist: Option<PathBuf>,

    /// Enable password mutations (dictionary attack)
    #[arg(short, long)]
    pub mutate: bool,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short, long)]
    pub processes: Option<usize>,

    /// Max password length (brute force)
    #[arg(short = 'l', long, default_value = "6")]
    pub max_length: usize,

    /// Character set (brute force)
    #[arg(short, long, default_value = DEFAULT_CHARSET)]
    pub charset: String,

    /// Candidates handed to a worker at a time
    #[arg(short, long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.processes.unwrap_or_else(num_cpus::get)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.target()?;

        if self.worker_count() == 0 {
            return Err(ConfigError::InvalidWorkerCount);
        }

        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }

        match self.mode {
            AttackMode::Dict => {
                if self.wordlist.is_none() {
                    return Err(ConfigError::MissingWordlist);
                }
            }
            AttackMode::Brute => {
                let keyspace = self.keyspace()?;
                if keyspace.size(self.max_length).is_none() {
                    return Err(ConfigError::KeyspaceTooLarge {
                        charset_len: keyspace.charset().len(),
                        length: self.max_length,
                    });
                }
            }
        }

        Ok(())
    }

    /// Builds the validated target hash
    pub fn target(&self) -> Result<TargetHash, ConfigError> {
        TargetHash::new(self.hash_type, self.hash.as_str())
    }

    /// Builds the brute-force keyspace from the charset
    pub fn keyspace(&self) -> Result<Keyspace, ConfigError> {
        Ok(Keyspace::new(CharSet::new(&self.charset)?))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Hash validation failed: {0}")]
    InvalidHash(String),

    #[error("Dictionary attack requires --wordlist")]
    MissingWordlist,

    #[error("Invalid charset: {0}")]
    InvalidCharset(String),

    #[error("Keyspace of {charset_len} symbols at length {length} is too large")]
    KeyspaceTooLarge { charset_len: usize, length: usize },

    #[error("Worker count must be at least 1")]
    InvalidWorkerCount,

    #[error("Batch size must be at least 1")]
    InvalidBatchSize,
}
