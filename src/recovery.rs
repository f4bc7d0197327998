//! Collecting pieces from keepers until the secret can be recovered
//!
//! Pieces arrive one at a time, pasted from a document or scanned from a QR
//! code, either as bare hex or wrapped as `K{number}-{share}`.

use crate::codec;
use crate::error::{Result, ShamirError};
use crate::integrity::SecretDigest;
use crate::shamir::{MIN_THRESHOLD, Share, combine};
use crate::transport;

/// A piece accepted into a [`RecoverySession`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedPiece {
    /// 0-based keeper position, when the piece came in transport form
    pub keeper_index: Option<usize>,
    pub share: Share,
}

impl CollectedPiece {
    pub fn identifier(&self) -> String {
        self.share.identifier()
    }
}

/// Accumulates shares and reports progress towards the threshold
///
/// # Example
/// ```
/// use keeper_share::{RecoverySession, split_secret, transport::format_for_transport};
///
/// let shares = split_secret("open sesame", 3, 2).unwrap();
///
/// let mut session = RecoverySession::new();
/// session.add_piece(&shares[2]).unwrap();
/// assert_eq!(session.remaining(), 1);
///
/// session.add_piece(&format_for_transport(&shares[0], 0)).unwrap();
/// assert!(session.is_ready());
/// assert_eq!(session.recover().unwrap(), b"open sesame");
/// ```
#[derive(Debug, Default)]
pub struct RecoverySession {
    pieces: Vec<CollectedPiece>,
}

impl RecoverySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes, validates and stores one piece
    ///
    /// # Errors
    /// - [`ShamirError::MalformedTransport`] for a broken `K…-…` wrapper
    /// - [`ShamirError::MalformedEncoding`] if the share fails validation
    /// - [`ShamirError::InconsistentShares`] if the threshold or payload
    ///   length differs from the pieces already held
    /// - [`ShamirError::DuplicateShare`] if a piece with the same
    ///   threshold and index is already held
    pub fn add_piece(&mut self, raw: &str) -> Result<&CollectedPiece> {
        let cleaned = codec::normalize(raw);
        if cleaned.is_empty() {
            return Err(ShamirError::MalformedEncoding("empty input".into()));
        }

        let (keeper_index, encoded) = if cleaned.starts_with('K') {
            let parsed = transport::parse_from_transport(&cleaned)?;
            (Some(parsed.keeper_index), parsed.share)
        } else {
            (None, cleaned)
        };

        if !codec::validate(&encoded) {
            log::warn!("rejected piece with invalid share format");
            return Err(ShamirError::MalformedEncoding(
                "not a valid share".into(),
            ));
        }
        let share = codec::decode(&encoded)?;

        if let Some(first) = self.pieces.first() {
            if share.threshold != first.share.threshold {
                log::warn!("rejected piece from a split with another threshold");
                return Err(ShamirError::InconsistentShares(format!(
                    "piece needs {} shares, collected pieces need {}",
                    share.threshold, first.share.threshold
                )));
            }
            if share.data.len() != first.share.data.len() {
                log::warn!("rejected piece from a split of another length");
                return Err(ShamirError::InconsistentShares(format!(
                    "piece carries {} bytes, collected pieces carry {}",
                    share.data.len(),
                    first.share.data.len()
                )));
            }
        }

        let identifier = share.identifier();
        if self.pieces.iter().any(|p| p.identifier() == identifier) {
            log::warn!("rejected duplicate piece {identifier}");
            return Err(ShamirError::DuplicateShare(identifier));
        }

        self.pieces.push(CollectedPiece {
            keeper_index,
            share,
        });
        Ok(&self.pieces[self.pieces.len() - 1])
    }

    /// Removes the piece with the given identifier, if held
    pub fn remove_piece(&mut self, identifier: &str) -> Option<CollectedPiece> {
        let position = self
            .pieces
            .iter()
            .position(|p| p.identifier() == identifier)?;
        Some(self.pieces.remove(position))
    }

    pub fn pieces(&self) -> &[CollectedPiece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Threshold recorded in the first piece
    pub fn threshold(&self) -> Option<u8> {
        self.pieces.first().map(|p| p.share.threshold)
    }

    /// Pieces still missing before recovery can be attempted
    pub fn remaining(&self) -> usize {
        let needed = self
            .threshold()
            .map_or(MIN_THRESHOLD, |t| (t as usize).max(MIN_THRESHOLD));
        needed.saturating_sub(self.pieces.len())
    }

    pub fn is_ready(&self) -> bool {
        !self.is_empty() && self.remaining() == 0
    }

    /// Combines the collected pieces
    ///
    /// The result is not authenticated; use [`Self::recover_verified`] when a
    /// digest of the secret is available.
    pub fn recover(&self) -> Result<Vec<u8>> {
        let shares: Vec<Share> = self.pieces.iter().map(|p| p.share.clone()).collect();
        combine(&shares)
    }

    pub fn recover_verified(&self, digest: &SecretDigest) -> Result<Vec<u8>> {
        let secret = self.recover()?;
        digest.verify(&secret)?;
        Ok(secret)
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }
}
