//! detkey — deterministic X25519 key pairs from a passphrase and salt.
//!
//! Derives a private scalar with PBKDF2, wraps it in a PKCS#8 container,
//! exports the matching SPKI public container, and runs X25519 key
//! agreement so two independently derived parties reach the same
//! shared secret.

pub mod agreement;
pub mod config;
pub mod container;
pub mod derivation;
pub mod encoding;
pub mod error;
pub mod exchange;
pub mod provider;

// Re-export primary types
pub use agreement::{agree, KeyAgreement, SharedSecret};
pub use config::{KdfConfig, KdfHash};
pub use container::{
    build_private_container, build_public_container, parse_private_container,
    parse_public_container, PrivateKeyContainer, PublicKeyContainer,
};
pub use derivation::{derive_key_pair, DerivationInput, DerivedKeyPair, KeyDeriver};
pub use encoding::{bytes_to_hex, hex_to_bytes};
pub use error::{DetKeyError, ErrorKind, Result};
pub use provider::{CryptoProvider, SoftwareProvider};
