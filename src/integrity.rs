//! Opt-in check that a reconstruction is the original secret
//!
//! `combine` cannot tell shares from different splits apart. Storing a
//! SHA-256 digest of the secret next to the shares and checking it after
//! reconstruction catches that, without changing the share format.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Result, ShamirError};
use crate::shamir::{Share, combine};

const DIGEST_SIZE: usize = 32; // SHA-256 output size

/// SHA-256 digest of a secret, kept alongside its shares
///
/// # Example
/// ```
/// use keeper_share::{SecretDigest, integrity::combine_verified, split};
///
/// let secret = b"recovery phrase";
/// let digest = SecretDigest::of(secret);
/// let shares = split(secret, 3, 2).unwrap();
///
/// assert_eq!(combine_verified(&shares[..2], &digest).unwrap(), secret);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SecretDigest([u8; DIGEST_SIZE]);

impl SecretDigest {
    pub fn of(secret: &[u8]) -> Self {
        let mut digest = [0u8; DIGEST_SIZE];
        digest.copy_from_slice(&Sha256::digest(secret));
        Self(digest)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Constant-time comparison against the digest of `candidate`
    pub fn matches(&self, candidate: &[u8]) -> bool {
        let calculated = Sha256::digest(candidate);
        let mut diff = 0u8;
        for (a, b) in calculated.iter().zip(self.0.iter()) {
            diff |= a ^ b;
        }
        diff == 0
    }

    /// # Errors
    /// [`ShamirError::IntegrityCheckFailed`] if `candidate` is not the secret.
    pub fn verify(&self, candidate: &[u8]) -> Result<()> {
        if self.matches(candidate) {
            Ok(())
        } else {
            Err(ShamirError::IntegrityCheckFailed)
        }
    }
}

/// [`combine`] followed by a digest check
pub fn combine_verified(shares: &[Share], digest: &SecretDigest) -> Result<Vec<u8>> {
    let secret = combine(shares)?;
    digest.verify(&secret)?;
    Ok(secret)
}

impl fmt::Display for SecretDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for SecretDigest {
    type Err = ShamirError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| ShamirError::MalformedEncoding(e.to_string()))?;
        let digest: [u8; DIGEST_SIZE] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            ShamirError::MalformedEncoding(format!(
                "digest must be {DIGEST_SIZE} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(digest))
    }
}

impl TryFrom<String> for SecretDigest {
    type Error = ShamirError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SecretDigest> for String {
    fn from(digest: SecretDigest) -> Self {
        digest.to_string()
    }
}
