//! Lowercase hex rendering of containers and secrets.

use crate::error::Result;
#[cfg(test)]
use crate::error::DetKeyError;

/// Render bytes as lowercase hex, two digits per byte, no separators.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Parse a hex string of even length. Either letter case is accepted;
/// whitespace anywhere, including at the ends, is rejected.
pub fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(hex_str)?)
}

/// Parse a hex string that must decode to exactly `N` bytes.
#[cfg(test)]
pub(crate) fn hex_to_array<const N: usize>(hex_str: &str) -> Result<[u8; N]> {
    let bytes = hex_to_bytes(hex_str)?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| DetKeyError::InvalidLength {
            expected: N,
            actual,
        })
}
