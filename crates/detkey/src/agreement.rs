//! X25519 key agreement between a local private container and a remote
//! public container.
//!
//! Every call recomputes the secret. Containers may be rotated by the
//! caller at any time, so nothing is cached here.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::config::SHARED_SECRET_LEN;
use crate::container::{PrivateKeyContainer, PublicKeyContainer};
use crate::encoding::bytes_to_hex;
use crate::error::{DetKeyError, Result};
use crate::provider::{CryptoProvider, SoftwareProvider};

/// A 32-byte X25519 shared secret, zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    bytes: [u8; SHARED_SECRET_LEN],
}

impl SharedSecret {
    pub fn from_bytes(bytes: [u8; SHARED_SECRET_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_LEN] {
        &self.bytes
    }

    /// Render as lowercase hex. The result is secret key material.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.bytes)
    }

    /// Expand the raw secret into a 32-byte symmetric key bound to `context`.
    ///
    /// Uses HKDF-SHA256 with the shared secret as IKM and the context as
    /// info. Distinct contexts give independent keys.
    pub fn derive_key(&self, context: &str) -> Result<Zeroizing<[u8; 32]>> {
        let hk = Hkdf::<Sha256>::new(None, &self.bytes);
        let mut output = Zeroizing::new([0u8; 32]);
        hk.expand(context.as_bytes(), &mut output[..])
            .map_err(|e| DetKeyError::Derivation(format!("HKDF expand failed: {e}")))?;
        Ok(output)
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

/// Computes shared secrets through a [`CryptoProvider`].
#[derive(Debug, Clone, Default)]
pub struct KeyAgreement<P = SoftwareProvider> {
    provider: P,
}

impl<P: CryptoProvider> KeyAgreement<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Combine our private key with the peer's public key.
    ///
    /// The remote container's envelope is interpreted by the provider,
    /// which reports a malformed or invalid peer as
    /// [`DetKeyError::InvalidPeerKey`].
    pub fn agree(
        &self,
        local: &PrivateKeyContainer,
        remote: &PublicKeyContainer,
    ) -> Result<SharedSecret> {
        let secret = self.provider.agree(local, remote)?;
        log::debug!("computed {SHARED_SECRET_LEN}-byte shared secret");
        Ok(secret)
    }

    /// Like [`KeyAgreement::agree`], starting from encoded containers.
    ///
    /// A local container that fails the PKCS#8 checks is a
    /// [`DetKeyError::KeyImport`]; a bad remote one is
    /// [`DetKeyError::InvalidPeerKey`].
    pub fn agree_bytes(&self, local: &[u8], remote: &[u8]) -> Result<SharedSecret> {
        let local = PrivateKeyContainer::from_bytes(local).map_err(into_key_import)?;
        let remote = PublicKeyContainer::from_bytes(remote);
        self.agree(&local, &remote)
    }

    /// Like [`KeyAgreement::agree`], starting from hex-encoded containers.
    pub fn agree_hex(&self, local_hex: &str, remote_hex: &str) -> Result<SharedSecret> {
        let local = PrivateKeyContainer::from_hex(local_hex).map_err(into_key_import)?;
        let remote = PublicKeyContainer::from_hex(remote_hex)
            .map_err(|e| DetKeyError::InvalidPeerKey(e.to_string()))?;
        self.agree(&local, &remote)
    }
}

fn into_key_import(e: DetKeyError) -> DetKeyError {
    match e {
        DetKeyError::MalformedContainer(msg) => DetKeyError::KeyImport(msg),
        DetKeyError::InvalidHex(msg) => DetKeyError::KeyImport(format!("invalid hex: {msg}")),
        other => other,
    }
}

/// Compute a shared secret with the default software provider.
pub fn agree(local: &PrivateKeyContainer, remote: &PublicKeyContainer) -> Result<SharedSecret> {
    KeyAgreement::new(SoftwareProvider).agree(local, remote)
}
