//! `K{number}-{share}` wrapper used in QR codes and for copy/paste
//!
//! `number` is the 1-based keeper position assigned when the shares were
//! generated. It only labels the piece for humans and is independent of the
//! index stored inside the share.

use crate::codec;
use crate::error::{Result, ShamirError};
use crate::shamir::Share;

const PREFIX: char = 'K';
const SEPARATOR: char = '-';

/// A parsed transport string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportShare {
    /// 0-based keeper position
    pub keeper_index: usize,
    /// Encoded share, not yet validated
    pub share: String,
}

impl TransportShare {
    /// Decodes the carried share
    pub fn decode(&self) -> Result<Share> {
        codec::decode(&self.share)
    }
}

/// Wraps an encoded share for keeper `keeper_index` (0-based)
///
/// The printed number is `keeper_index + 1`, widened so that every `usize`
/// index survives [`parse_from_transport`].
///
/// # Example
/// ```
/// use keeper_share::transport::{format_for_transport, parse_from_transport};
///
/// let wrapped = format_for_transport("030101ab", 0);
/// assert_eq!(wrapped, "K1-030101ab");
///
/// let parsed = parse_from_transport(&wrapped).unwrap();
/// assert_eq!(parsed.keeper_index, 0);
/// assert_eq!(parsed.share, "030101ab");
/// ```
pub fn format_for_transport(share: &str, keeper_index: usize) -> String {
    format!("{PREFIX}{}{SEPARATOR}{share}", keeper_index as u128 + 1)
}

/// Splits a transport string into keeper index and share text
///
/// Requires a literal `K`, one or more decimal digits, a `-`, then a
/// non-empty single-line share. The share itself is not validated here.
pub fn parse_from_transport(data: &str) -> Result<TransportShare> {
    let rest = data
        .strip_prefix(PREFIX)
        .ok_or_else(|| ShamirError::MalformedTransport("missing 'K' prefix".into()))?;
    let (number, share) = rest
        .split_once(SEPARATOR)
        .ok_or_else(|| ShamirError::MalformedTransport("missing '-' separator".into()))?;

    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ShamirError::MalformedTransport(
            "keeper number must be decimal digits".into(),
        ));
    }
    if share.is_empty() || share.contains(['\n', '\r', '\u{2028}', '\u{2029}']) {
        return Err(ShamirError::MalformedTransport(
            "share must be a non-empty single line".into(),
        ));
    }

    let keeper_index = number
        .parse::<u128>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            ShamirError::MalformedTransport(format!("keeper number {number} is out of range"))
        })?;

    Ok(TransportShare {
        keeper_index,
        share: share.to_string(),
    })
}

/// Case-insensitive match of `^K\d+-[0-9a-f]+$`
pub fn is_valid_transport_format(data: &str) -> bool {
    let Some(rest) = data.strip_prefix(['K', 'k']) else {
        return false;
    };
    let Some((number, share)) = rest.split_once(SEPARATOR) else {
        return false;
    };
    !number.is_empty()
        && number.bytes().all(|b| b.is_ascii_digit())
        && !share.is_empty()
        && share.bytes().all(|b| b.is_ascii_hexdigit())
}
