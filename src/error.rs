use thiserror::Error;

/// Error type for splitting, combining and share encoding
///
/// Every kind is distinct so callers can tell "not enough pieces yet" apart
/// from "pieces don't belong together".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShamirError {
    /// Threshold below 2 (a single share would already be the secret)
    #[error("Threshold must be at least 2, got {threshold}")]
    ThresholdTooLow { threshold: usize },

    /// Threshold exceeds total shares
    #[error("Threshold {threshold} exceeds total shares {total_shares}")]
    ThresholdExceedsShareCount {
        threshold: usize,
        total_shares: usize,
    },

    /// Share indices are a single byte, so at most 255 shares exist
    #[error("Cannot create {0} shares, the maximum is 255")]
    TooManyShares(usize),

    /// Fewer than two shares supplied to combine
    #[error("Need at least 2 shares, got {got}")]
    InsufficientShares { got: usize },

    /// Shares disagree on threshold, payload length or reuse an index
    #[error("Inconsistent shares: {0}")]
    InconsistentShares(String),

    /// Fewer shares than the threshold recorded in them
    #[error("Need at least {needed} shares to reconstruct, got {got}")]
    BelowThreshold { needed: u8, got: usize },

    /// Encoded share is not valid hex or is too short
    #[error("Malformed share encoding: {0}")]
    MalformedEncoding(String),

    /// Transport string does not match `K{index}-{share}`
    #[error("Malformed transport string: {0}")]
    MalformedTransport(String),

    /// Field division by zero; signals a violated invariant upstream
    #[error("Division by zero in GF(256)")]
    DivisionByZero,

    /// A share with the same identifier was already collected
    #[error("Share {0} was already added")]
    DuplicateShare(String),

    /// Reconstructed secret does not match the recorded digest
    #[error("Data integrity check failed")]
    IntegrityCheckFailed,

    /// Secret exceeds the configured length limit
    #[error("Secret is {len} bytes, the configured limit is {max}")]
    SecretTooLong { len: usize, max: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The OS entropy source could not seed the generator
    #[error("Random source failure: {0}")]
    Randomness(String),
}

pub type Result<T> = std::result::Result<T, ShamirError>;
