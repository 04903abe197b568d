//! Cryptographic provider capability.
//!
//! The derivation engine and the agreement orchestrator never touch hash
//! rounds or field arithmetic themselves. They call into a
//! [`CryptoProvider`], which can be swapped for a hardware-backed one
//! without changing either.

use std::sync::Arc;

use pbkdf2::pbkdf2_hmac;
use sha2::{Sha256, Sha384, Sha512};
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

use crate::agreement::SharedSecret;
use crate::config::{KdfConfig, KdfHash, SCALAR_LEN};
use crate::container::{build_public_container, PrivateKeyContainer, PublicKeyContainer};
use crate::error::{DetKeyError, Result};

/// Primitives the derivation and agreement pipeline depends on.
pub trait CryptoProvider: Send + Sync {
    /// Stretch a passphrase into a 32-byte private scalar with PBKDF2.
    fn derive_bits(
        &self,
        passphrase: &[u8],
        salt: &[u8],
        config: &KdfConfig,
    ) -> Result<Zeroizing<[u8; SCALAR_LEN]>>;

    /// Export the public key container matching a private key container.
    fn public_container(&self, private: &PrivateKeyContainer) -> Result<PublicKeyContainer>;

    /// X25519 scalar multiplication of our private key with a peer's point.
    fn agree(
        &self,
        private: &PrivateKeyContainer,
        peer: &PublicKeyContainer,
    ) -> Result<SharedSecret>;
}

impl<P: CryptoProvider + ?Sized> CryptoProvider for Arc<P> {
    fn derive_bits(
        &self,
        passphrase: &[u8],
        salt: &[u8],
        config: &KdfConfig,
    ) -> Result<Zeroizing<[u8; SCALAR_LEN]>> {
        (**self).derive_bits(passphrase, salt, config)
    }

    fn public_container(&self, private: &PrivateKeyContainer) -> Result<PublicKeyContainer> {
        (**self).public_container(private)
    }

    fn agree(
        &self,
        private: &PrivateKeyContainer,
        peer: &PublicKeyContainer,
    ) -> Result<SharedSecret> {
        (**self).agree(private, peer)
    }
}

/// Pure-software provider backed by `pbkdf2`, `sha2` and `x25519-dalek`.
///
/// The public point is computed directly from the scalar rather than by
/// stripping the private field from an exported key.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareProvider;

impl SoftwareProvider {
    pub fn new() -> Self {
        Self
    }
}

impl CryptoProvider for SoftwareProvider {
    fn derive_bits(
        &self,
        passphrase: &[u8],
        salt: &[u8],
        config: &KdfConfig,
    ) -> Result<Zeroizing<[u8; SCALAR_LEN]>> {
        config.validate()?;
        let mut output = Zeroizing::new([0u8; SCALAR_LEN]);
        let out = &mut output[..config.key_len()];
        match config.hash {
            KdfHash::Sha256 => {
                pbkdf2_hmac::<Sha256>(passphrase, salt, config.iterations, out)
            }
            KdfHash::Sha384 => {
                pbkdf2_hmac::<Sha384>(passphrase, salt, config.iterations, out)
            }
            KdfHash::Sha512 => {
                pbkdf2_hmac::<Sha512>(passphrase, salt, config.iterations, out)
            }
        }
        Ok(output)
    }

    fn public_container(&self, private: &PrivateKeyContainer) -> Result<PublicKeyContainer> {
        let secret = StaticSecret::from(*private.scalar());
        let public = PublicKey::from(&secret);
        Ok(build_public_container(public.as_bytes()))
    }

    fn agree(
        &self,
        private: &PrivateKeyContainer,
        peer: &PublicKeyContainer,
    ) -> Result<SharedSecret> {
        let point = peer.point()?;
        let secret = StaticSecret::from(*private.scalar());
        let shared = secret.diffie_hellman(&PublicKey::from(point));
        // Low-order points force an all-zero output regardless of our scalar.
        if !shared.was_contributory() {
            return Err(DetKeyError::InvalidPeerKey(
                "peer point has small order".into(),
            ));
        }
        Ok(SharedSecret::from_bytes(shared.to_bytes()))
    }
}
