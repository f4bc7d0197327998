//! Threshold secret sharing for handing a recovery phrase to trusted keepers
//!
//! A secret is split into N shares so that any T of them reconstruct it
//! exactly while fewer than T reveal nothing. Arithmetic is over GF(256)
//! (reduction polynomial 0x11D), one random polynomial per secret byte, with
//! Lagrange interpolation at zero for reconstruction.
//!
//! Shares travel as lowercase hex (`threshold`, `index`, payload) and may be
//! wrapped as `K{number}-{hex}` for QR codes.
//!
//! # Quick Start
//!
//! ```
//! use keeper_share::{ShamirShare, codec};
//!
//! // Create a scheme with 5 shares and threshold 3
//! let mut scheme = ShamirShare::builder(5, 3).build().unwrap();
//!
//! // Split a secret
//! let secret = b"my secret data";
//! let shares = scheme.split(secret).unwrap();
//!
//! // Hand out the encoded form
//! let encoded: Vec<String> = shares.iter().map(codec::encode).collect();
//! assert!(encoded.iter().all(|s| codec::validate(s)));
//!
//! // Reconstruct from any 3
//! let loaded = vec![
//!     codec::decode(&encoded[4]).unwrap(),
//!     codec::decode(&encoded[1]).unwrap(),
//!     codec::decode(&encoded[2]).unwrap(),
//! ];
//! let reconstructed = ShamirShare::reconstruct(&loaded).unwrap();
//! assert_eq!(reconstructed, secret);
//! ```
//!
//! # Authenticity
//!
//! Combining enough shares that come from *different* splits yields a
//! meaningless byte string that cannot be told apart from a real secret.
//! Keep a [`SecretDigest`] next to the shares and use
//! [`integrity::combine_verified`] if that matters.

pub mod codec;
mod config;
mod error;
mod finite_field;
pub mod integrity;
pub mod polynomial;
pub mod recovery;
mod shamir;
pub mod transport;

pub use config::{Config, SplitMode};
pub use error::{Result, ShamirError};
pub use finite_field::{FiniteField, REDUCTION_POLYNOMIAL};
pub use integrity::SecretDigest;
pub use polynomial::Polynomial;
pub use recovery::{CollectedPiece, RecoverySession};
pub use shamir::{
    MAX_SHARES, MIN_THRESHOLD, ShamirShare, ShamirShareBuilder, Share, combine, combine_shares,
    split, split_batch, split_secret, split_with_rng,
};
pub use transport::{
    TransportShare, format_for_transport, is_valid_transport_format, parse_from_transport,
};

// Re-export common types for convenience
pub mod prelude {
    pub use super::{
        Config, RecoverySession, Result, SecretDigest, ShamirError, ShamirShare, Share, SplitMode,
        combine, split,
    };
}
