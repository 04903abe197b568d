//! Binary key containers for X25519.
//!
//! The private container is a PKCS#8 `PrivateKeyInfo` whose DER header is
//! constant for X25519, so building one is prefix ‖ scalar. The public
//! container is a `SubjectPublicKeyInfo`, likewise a constant header
//! followed by the 32-byte point.

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::config::{POINT_LEN, SCALAR_LEN};
use crate::encoding::{bytes_to_hex, hex_to_bytes};
use crate::error::{DetKeyError, Result};

/// DER header of a PKCS#8 X25519 private key (OID 1.3.101.110).
pub const PKCS8_X25519_PREFIX: [u8; 16] = [
    0x30, 0x2e, 0x02, 0x01, 0x00, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x6e, 0x04, 0x22, 0x04, 0x20,
];

/// DER header of an SPKI X25519 public key.
pub const SPKI_X25519_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x6e, 0x03, 0x21, 0x00,
];

/// Total length of a private key container.
pub const PRIVATE_CONTAINER_LEN: usize = PKCS8_X25519_PREFIX.len() + SCALAR_LEN;

/// Total length of a public key container.
pub const PUBLIC_CONTAINER_LEN: usize = SPKI_X25519_PREFIX.len() + POINT_LEN;

/// A 48-byte PKCS#8 X25519 private key container.
///
/// The bytes are zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKeyContainer {
    bytes: [u8; PRIVATE_CONTAINER_LEN],
}

impl PrivateKeyContainer {
    /// Validate and copy an encoded container.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let scalar = parse_private_container(bytes)?;
        build_private_container(&scalar[..])
    }

    /// Parse a hex-encoded container.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = Zeroizing::new(hex_to_bytes(hex_str)?);
        Self::from_bytes(&bytes)
    }

    /// Return the encoded container.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Return the embedded private scalar.
    pub fn scalar(&self) -> Zeroizing<[u8; SCALAR_LEN]> {
        let mut scalar = Zeroizing::new([0u8; SCALAR_LEN]);
        scalar.copy_from_slice(&self.bytes[PKCS8_X25519_PREFIX.len()..]);
        scalar
    }

    /// Render as lowercase hex. The result contains private key material.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.bytes)
    }
}

impl std::fmt::Debug for PrivateKeyContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKeyContainer")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

/// A public key container as exported by a provider.
///
/// Opaque bytes; [`PublicKeyContainer::point`] parses the SPKI shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicKeyContainer {
    bytes: Vec<u8>,
}

impl PublicKeyContainer {
    /// Wrap encoded container bytes without validating them.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Parse a hex-encoded container.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        Ok(Self::from_bytes(hex_to_bytes(hex_str)?))
    }

    /// Return the encoded container.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Render as lowercase hex.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.bytes)
    }

    /// Extract the 32-byte curve point.
    pub fn point(&self) -> Result<[u8; POINT_LEN]> {
        parse_public_container(&self.bytes)
    }
}

/// Wrap a 32-byte scalar in a PKCS#8 container.
pub fn build_private_container(scalar: &[u8]) -> Result<PrivateKeyContainer> {
    if scalar.len() != SCALAR_LEN {
        return Err(DetKeyError::InvalidLength {
            expected: SCALAR_LEN,
            actual: scalar.len(),
        });
    }
    let mut bytes = [0u8; PRIVATE_CONTAINER_LEN];
    bytes[..PKCS8_X25519_PREFIX.len()].copy_from_slice(&PKCS8_X25519_PREFIX);
    bytes[PKCS8_X25519_PREFIX.len()..].copy_from_slice(scalar);
    Ok(PrivateKeyContainer { bytes })
}

/// Return the scalar carried by an encoded PKCS#8 container.
pub fn parse_private_container(container: &[u8]) -> Result<Zeroizing<[u8; SCALAR_LEN]>> {
    if container.len() != PRIVATE_CONTAINER_LEN {
        return Err(DetKeyError::MalformedContainer(format!(
            "private container must be {PRIVATE_CONTAINER_LEN} bytes, got {}",
            container.len()
        )));
    }
    let (prefix, body) = container.split_at(PKCS8_X25519_PREFIX.len());
    if prefix != PKCS8_X25519_PREFIX {
        return Err(DetKeyError::MalformedContainer(
            "private container is not an X25519 PKCS#8 key".into(),
        ));
    }
    let mut scalar = Zeroizing::new([0u8; SCALAR_LEN]);
    scalar.copy_from_slice(body);
    Ok(scalar)
}

/// Wrap a 32-byte point in an SPKI container.
pub fn build_public_container(point: &[u8; POINT_LEN]) -> PublicKeyContainer {
    let mut bytes = Vec::with_capacity(PUBLIC_CONTAINER_LEN);
    bytes.extend_from_slice(&SPKI_X25519_PREFIX);
    bytes.extend_from_slice(point);
    PublicKeyContainer { bytes }
}

/// Return the point carried by an encoded SPKI container.
pub fn parse_public_container(container: &[u8]) -> Result<[u8; POINT_LEN]> {
    if container.len() != PUBLIC_CONTAINER_LEN {
        return Err(DetKeyError::InvalidPeerKey(format!(
            "public container must be {PUBLIC_CONTAINER_LEN} bytes, got {}",
            container.len()
        )));
    }
    let (prefix, body) = container.split_at(SPKI_X25519_PREFIX.len());
    if prefix != SPKI_X25519_PREFIX {
        return Err(DetKeyError::InvalidPeerKey(
            "public container is not an X25519 SPKI key".into(),
        ));
    }
    let mut point = [0u8; POINT_LEN];
    point.copy_from_slice(body);
    Ok(point)
}
