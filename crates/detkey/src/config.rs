//! Key derivation parameters.
//!
//! The hash, iteration count and output length are part of the external
//! contract: two parties only derive matching keys when all three agree.
//! They are therefore configured together as one [`KdfConfig`].

use serde::{Deserialize, Serialize};

use crate::error::{DetKeyError, Result};

/// PBKDF2 iteration count used by default.
pub const DEFAULT_KDF_ITERATIONS: u32 = 100_000;

/// Derived key length in bits.
pub const DEFAULT_KEY_BITS: u32 = 256;

/// Length of an X25519 private scalar.
pub const SCALAR_LEN: usize = 32;

/// Length of an X25519 public point.
pub const POINT_LEN: usize = 32;

/// Length of an X25519 shared secret.
pub const SHARED_SECRET_LEN: usize = 32;

/// Pseudorandom function used inside PBKDF2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KdfHash {
    #[default]
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "SHA-384")]
    Sha384,
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl KdfHash {
    /// Return the algorithm name as written in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }
}

impl std::fmt::Display for KdfHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for KdfHash {
    type Err = DetKeyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().replace('_', "-").as_str() {
            "SHA-256" | "SHA256" => Ok(Self::Sha256),
            "SHA-384" | "SHA384" => Ok(Self::Sha384),
            "SHA-512" | "SHA512" => Ok(Self::Sha512),
            other => Err(DetKeyError::Config(format!("unknown hash '{other}'"))),
        }
    }
}

/// PBKDF2 parameters for passphrase-based scalar derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdfConfig {
    pub hash: KdfHash,
    pub iterations: u32,
    pub key_bits: u32,
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self {
            hash: KdfHash::Sha256,
            iterations: DEFAULT_KDF_ITERATIONS,
            key_bits: DEFAULT_KEY_BITS,
        }
    }
}

impl KdfConfig {
    /// Override the iteration count.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Override the hash function.
    pub fn with_hash(mut self, hash: KdfHash) -> Self {
        self.hash = hash;
        self
    }

    /// Derived key length in bytes.
    pub fn key_len(&self) -> usize {
        (self.key_bits / 8) as usize
    }

    /// Check that these parameters can produce an X25519 scalar.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(DetKeyError::Derivation(
                "iteration count must be at least 1".into(),
            ));
        }
        if self.key_bits != DEFAULT_KEY_BITS {
            return Err(DetKeyError::Derivation(format!(
                "key length must be {DEFAULT_KEY_BITS} bits, got {}",
                self.key_bits
            )));
        }
        Ok(())
    }

    /// Parse a JSON configuration document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DetKeyError::Config(e.to_string()))
    }

    /// Serialize to a JSON document.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| DetKeyError::Config(e.to_string()))
    }
}
