//! Deterministic X25519 key pair derivation from a passphrase and salt.
//!
//! PBKDF2 stretches the passphrase into a 32-byte scalar, the scalar is
//! wrapped in a PKCS#8 container, and the provider exports the matching
//! SPKI public container. No randomness enters at any step, so the same
//! inputs and [`KdfConfig`] always give the same key pair.
//!
//! Callers needing several independent keys from one passphrase should use
//! a distinct salt per key rather than splitting a single derivation.

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::config::KdfConfig;
use crate::container::{build_private_container, PrivateKeyContainer, PublicKeyContainer};
use crate::error::{DetKeyError, Result};
use crate::provider::{CryptoProvider, SoftwareProvider};

/// Passphrase and salt, encoded as UTF-8 bytes.
///
/// The passphrase is zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivationInput {
    passphrase: Vec<u8>,
    salt: Vec<u8>,
}

impl DerivationInput {
    pub fn new(passphrase: &str, salt: &str) -> Self {
        Self {
            passphrase: passphrase.as_bytes().to_vec(),
            salt: salt.as_bytes().to_vec(),
        }
    }

    /// Build from raw bytes that must be valid UTF-8 text.
    pub fn from_bytes(passphrase: &[u8], salt: &[u8]) -> Result<Self> {
        std::str::from_utf8(passphrase)
            .map_err(|e| DetKeyError::Encoding(format!("passphrase: {e}")))?;
        std::str::from_utf8(salt).map_err(|e| DetKeyError::Encoding(format!("salt: {e}")))?;
        Ok(Self {
            passphrase: passphrase.to_vec(),
            salt: salt.to_vec(),
        })
    }

    pub fn passphrase(&self) -> &[u8] {
        &self.passphrase
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }
}

impl std::fmt::Debug for DerivationInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivationInput")
            .field("passphrase_len", &self.passphrase.len())
            .field("salt_len", &self.salt.len())
            .finish()
    }
}

/// A derived private key container and its public counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedKeyPair {
    private: PrivateKeyContainer,
    public: PublicKeyContainer,
}

impl DerivedKeyPair {
    pub fn private_container(&self) -> &PrivateKeyContainer {
        &self.private
    }

    pub fn public_container(&self) -> &PublicKeyContainer {
        &self.public
    }

    pub fn into_parts(self) -> (PrivateKeyContainer, PublicKeyContainer) {
        (self.private, self.public)
    }
}

/// Derives key pairs with a fixed provider and KDF configuration.
#[derive(Debug, Clone, Default)]
pub struct KeyDeriver<P = SoftwareProvider> {
    provider: P,
    config: KdfConfig,
}

impl<P: CryptoProvider> KeyDeriver<P> {
    pub fn new(provider: P, config: KdfConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &KdfConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Derive the key pair for one (passphrase, salt) input.
    pub fn derive(&self, input: &DerivationInput) -> Result<DerivedKeyPair> {
        log::debug!(
            "deriving X25519 key pair: PBKDF2-{} x{}",
            self.config.hash,
            self.config.iterations
        );
        let private = self.derive_private(input)?;
        let public = self.public_from_private(&private).map_err(|e| match e {
            DetKeyError::KeyImport(msg) | DetKeyError::MalformedContainer(msg) => {
                DetKeyError::Derivation(format!("provider rejected derived scalar: {msg}"))
            }
            other => other,
        })?;
        log::trace!("exported {}-byte public container", public.as_bytes().len());
        Ok(DerivedKeyPair { private, public })
    }

    /// Derive only the PKCS#8 private container.
    pub fn derive_private(&self, input: &DerivationInput) -> Result<PrivateKeyContainer> {
        self.config.validate()?;
        let scalar: Zeroizing<[u8; 32]> =
            self.provider
                .derive_bits(input.passphrase(), input.salt(), &self.config)?;
        log::trace!("derived {}-byte scalar", scalar.len());
        build_private_container(&scalar[..])
    }

    /// Compute the public container for an existing private container.
    ///
    /// Provider rejections are returned unchanged, since the container may
    /// come from the caller rather than from [`KeyDeriver::derive`].
    pub fn public_from_private(&self, private: &PrivateKeyContainer) -> Result<PublicKeyContainer> {
        self.provider.public_container(private)
    }
}

/// Derive a key pair with the default provider and parameters
/// (PBKDF2-SHA-256, 100000 iterations, 256-bit output).
pub fn derive_key_pair(passphrase: &str, salt: &str) -> Result<DerivedKeyPair> {
    KeyDeriver::<SoftwareProvider>::default().derive(&DerivationInput::new(passphrase, salt))
}
