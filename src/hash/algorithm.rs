//! Supported hash algorithms.

use std::fmt;
use std::str::FromStr;

use digest::DynDigest;
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha256, Sha512};

/// All the supported hash algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
    /// Adaptive salted hash, checked with bcrypt's own verify primitive.
    Bcrypt,
}

impl HashAlgorithm {
    /// Returns the length of the lowercase hex digest, or `None` for bcrypt.
    pub fn hex_len(&self) -> Option<usize> {
        match self {
            Self::Md5 => Some(32),
            Self::Sha1 => Some(40),
            Self::Sha256 => Some(64),
            Self::Sha512 => Some(128),
            Self::Bcrypt => None,
        }
    }

    /// Returns a fresh CPU hasher for digest algorithms, or `None` for bcrypt.
    pub fn hasher(&self) -> Option<Box<dyn DynDigest>> {
        let hasher: Box<dyn DynDigest> = match self {
            Self::Md5 => Box::new(Md5::default()),
            Self::Sha1 => Box::new(Sha1::default()),
            Self::Sha256 => Box::new(Sha256::default()),
            Self::Sha512 => Box::new(Sha512::default()),
            Self::Bcrypt => return None,
        };
        Some(hasher)
    }
}

impl FromStr for HashAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            "bcrypt" => Ok(Self::Bcrypt),
            _ => Err(format!(
                "Unknown hash type: {} (expected md5, sha1, sha256, sha512 or bcrypt)",
                s
            )),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Md5 => write!(f, "md5"),
            Self::Sha1 => write!(f, "sha1"),
            Self::Sha256 => write!(f, "sha256"),
            Self::Sha512 => write!(f, "sha512"),
            Self::Bcrypt => write!(f, "bcrypt"),
        }
    }
}
