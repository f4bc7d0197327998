//! Hex wire format for shares
//!
//! ```text
//! byte 0       : threshold T
//! byte 1       : share index X
//! bytes 2..end : payload, one byte per secret byte
//! ```
//!
//! The bytes are written as lowercase hex with no prefix or separators. This
//! is the form keepers copy, print and scan.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::error::{Result, ShamirError};
use crate::shamir::Share;

/// Length of the `(threshold, index)` header in bytes
pub const HEADER_LEN: usize = 2;

/// Header plus at least one payload byte
pub const MIN_ENCODED_BYTES: usize = HEADER_LEN + 1;

/// Hex characters covered by [`share_identifier`]
const IDENTIFIER_CHARS: usize = HEADER_LEN * 2;

/// Encodes a share as lowercase hex
///
/// # Example
/// ```
/// use keeper_share::{Share, codec};
///
/// let share = Share { threshold: 3, index: 1, data: vec![0xde, 0xad] };
/// assert_eq!(codec::encode(&share), "0301dead");
/// ```
pub fn encode(share: &Share) -> String {
    let mut bytes = Vec::with_capacity(HEADER_LEN + share.data.len());
    bytes.push(share.threshold);
    bytes.push(share.index);
    bytes.extend_from_slice(&share.data);
    let encoded = hex::encode(&bytes);
    #[cfg(feature = "zeroize")]
    bytes.zeroize();
    encoded
}

/// Decodes a hex share back into its threshold, index and payload
///
/// # Errors
/// Returns [`ShamirError::MalformedEncoding`] if the input is not valid hex or
/// holds fewer than three bytes.
pub fn decode(encoded: &str) -> Result<Share> {
    let mut bytes =
        hex::decode(encoded).map_err(|e| ShamirError::MalformedEncoding(e.to_string()))?;
    if bytes.len() < MIN_ENCODED_BYTES {
        return Err(ShamirError::MalformedEncoding(format!(
            "expected at least {MIN_ENCODED_BYTES} bytes, got {}",
            bytes.len()
        )));
    }

    let share = Share {
        threshold: bytes[0],
        index: bytes[1],
        data: bytes[HEADER_LEN..].to_vec(),
    };
    #[cfg(feature = "zeroize")]
    bytes.zeroize();

    Ok(share)
}

/// Structural check used for immediate feedback before decoding
///
/// Accepts hex of at least three bytes whose threshold is in `2..=255` and
/// whose index is in `1..=255`. Never fails, only answers.
pub fn validate(encoded: &str) -> bool {
    if encoded.len() < MIN_ENCODED_BYTES * 2
        || encoded.len() % 2 != 0
        || !encoded.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return false;
    }
    let Ok(header) = hex::decode(&encoded[..IDENTIFIER_CHARS]) else {
        return false;
    };
    header[0] >= 2 && header[1] >= 1
}

/// First two encoded bytes (threshold and index) as hex
///
/// Stable across copies of the same share and safe to display, since it
/// carries no payload. Inputs shorter than the header are returned as is.
pub fn share_identifier(encoded: &str) -> String {
    encoded.get(..IDENTIFIER_CHARS).unwrap_or(encoded).to_string()
}

/// Strips all whitespace, as left behind by copying shares out of documents
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self))
    }
}

impl FromStr for Share {
    type Err = ShamirError;

    fn from_str(s: &str) -> Result<Self> {
        decode(s)
    }
}

impl TryFrom<String> for Share {
    type Error = ShamirError;

    fn try_from(value: String) -> Result<Self> {
        decode(&value)
    }
}

impl From<Share> for String {
    fn from(share: Share) -> Self {
        encode(&share)
    }
}
