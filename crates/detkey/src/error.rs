//! Error types for detkey.
//!
//! All errors are strongly typed and propagated without panicking.
//! Passphrases, private scalars and shared secrets are never included
//! in error messages.

/// Coarse category of a [`DetKeyError`].
///
/// Lets callers decide whether to re-prompt for a passphrase or reject a
/// peer's key without matching on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Encoding,
    InvalidLength,
    MalformedContainer,
    Derivation,
    KeyImport,
    InvalidPeerKey,
    InvalidHex,
    Config,
}

/// Error type covering derivation, container handling and agreement.
#[derive(Debug, thiserror::Error)]
pub enum DetKeyError {
    #[error("Input is not valid UTF-8 text: {0}")]
    Encoding(String),

    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Malformed key container: {0}")]
    MalformedContainer(String),

    #[error("Key derivation failed: {0}")]
    Derivation(String),

    #[error("Key import failed: {0}")]
    KeyImport(String),

    #[error("Invalid peer public key: {0}")]
    InvalidPeerKey(String),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DetKeyError {
    /// Return the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Encoding(_) => ErrorKind::Encoding,
            Self::InvalidLength { .. } => ErrorKind::InvalidLength,
            Self::MalformedContainer(_) => ErrorKind::MalformedContainer,
            Self::Derivation(_) => ErrorKind::Derivation,
            Self::KeyImport(_) => ErrorKind::KeyImport,
            Self::InvalidPeerKey(_) => ErrorKind::InvalidPeerKey,
            Self::InvalidHex(_) => ErrorKind::InvalidHex,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// True when the error was caused by the remote party's key material.
    pub fn is_peer_fault(&self) -> bool {
        matches!(self, Self::InvalidPeerKey(_))
    }
}

impl From<hex::FromHexError> for DetKeyError {
    fn from(e: hex::FromHexError) -> Self {
        Self::InvalidHex(e.to_string())
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, DetKeyError>;
