use rand::rngs::OsRng;
use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::codec;
use crate::config::{Config, SplitMode};
use crate::error::{Result, ShamirError};
use crate::finite_field::FiniteField;
use crate::polynomial::Polynomial;

/// Share indices are one byte and zero is reserved for the secret itself
pub const MAX_SHARES: usize = 255;

/// Smallest threshold that actually splits anything
pub const MIN_THRESHOLD: usize = 2;

/// A share in Shamir's Secret Sharing scheme
///
/// Each share holds the evaluations of the per-byte polynomials at `index`.
/// Fewer than `threshold` shares reveal nothing about the secret.
///
/// Serializes as its hex encoding (see [`codec`]).
///
/// # Example
/// ```
/// use keeper_share::ShamirShare;
///
/// let mut shamir = ShamirShare::builder(5, 3).build().unwrap();
/// let shares = shamir.split(b"secret").unwrap();
/// let share = &shares[0];
///
/// assert_eq!(share.index, 1);
/// assert_eq!(share.threshold, 3);
/// assert_eq!(share.data.len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[cfg_attr(feature = "zeroize", derive(Zeroize, ZeroizeOnDrop))]
pub struct Share {
    /// Minimum number of shares required for reconstruction
    pub threshold: u8,
    /// Index of the share (x-coordinate in the polynomial)
    pub index: u8,
    /// The share data (y-coordinates for each byte of the secret)
    pub data: Vec<u8>,
}

impl Share {
    /// Hex of the `(threshold, index)` header, usable for deduplication
    pub fn identifier(&self) -> String {
        hex::encode([self.threshold, self.index])
    }
}

/// Checks split parameters in a fixed order and narrows them to bytes
fn validate_parameters(total_shares: usize, threshold: usize) -> Result<(u8, u8)> {
    if threshold > total_shares {
        return Err(ShamirError::ThresholdExceedsShareCount {
            threshold,
            total_shares,
        });
    }
    if threshold < MIN_THRESHOLD {
        return Err(ShamirError::ThresholdTooLow { threshold });
    }
    if total_shares > MAX_SHARES {
        return Err(ShamirError::TooManyShares(total_shares));
    }
    // threshold <= total_shares <= 255
    Ok((total_shares as u8, threshold as u8))
}

/// ChaCha20 generator seeded from the operating system
fn os_seeded_rng() -> Result<ChaCha20Rng> {
    ChaCha20Rng::try_from_rng(&mut OsRng).map_err(|e| ShamirError::Randomness(e.to_string()))
}

/// Splits `secret` into `total_shares` shares, any `threshold` of which reconstruct it
///
/// Randomness comes from a ChaCha20 generator freshly seeded from the OS.
///
/// # Errors
/// - [`ShamirError::ThresholdExceedsShareCount`] if `threshold > total_shares`
/// - [`ShamirError::ThresholdTooLow`] if `threshold < 2`
/// - [`ShamirError::TooManyShares`] if `total_shares > 255`
///
/// # Example
/// ```
/// use keeper_share::{combine, split};
///
/// let shares = split(b"test-secret!", 5, 3).unwrap();
/// assert_eq!(shares.len(), 5);
/// assert_eq!(combine(&shares[1..4]).unwrap(), b"test-secret!");
/// ```
pub fn split(secret: &[u8], total_shares: usize, threshold: usize) -> Result<Vec<Share>> {
    validate_parameters(total_shares, threshold)?;
    let mut rng = os_seeded_rng()?;
    split_with_rng(secret, total_shares, threshold, &mut rng)
}

/// Same as [`split`] but draws coefficients from the supplied generator
///
/// Pass a seeded CSPRNG to get reproducible fixtures.
pub fn split_with_rng<R: CryptoRng + ?Sized>(
    secret: &[u8],
    total_shares: usize,
    threshold: usize,
    rng: &mut R,
) -> Result<Vec<Share>> {
    split_with_mode(secret, total_shares, threshold, rng, SplitMode::Sequential)
}

/// Splits many secrets with the same parameters on the rayon pool
///
/// Each secret gets its own OS-seeded generator.
pub fn split_batch<S>(secrets: &[S], total_shares: usize, threshold: usize) -> Result<Vec<Vec<Share>>>
where
    S: AsRef<[u8]> + Sync,
{
    validate_parameters(total_shares, threshold)?;
    secrets
        .par_iter()
        .map(|secret| split(secret.as_ref(), total_shares, threshold))
        .collect()
}

fn split_with_mode<R: CryptoRng + ?Sized>(
    secret: &[u8],
    total_shares: usize,
    threshold: usize,
    rng: &mut R,
    mode: SplitMode,
) -> Result<Vec<Share>> {
    let (total_shares, threshold) = validate_parameters(total_shares, threshold)?;
    log::debug!(
        "splitting {}-byte secret into {} shares with threshold {}",
        secret.len(),
        total_shares,
        threshold
    );

    // Fresh random coefficients 1..t for every secret byte
    let degree = threshold as usize - 1;
    let mut random = vec![0u8; secret.len() * degree];
    rng.fill_bytes(&mut random);

    let polynomials: Vec<Polynomial> = secret
        .iter()
        .zip(random.chunks_exact(degree))
        .map(|(&byte, coefficients)| Polynomial::from_secret_byte(byte, coefficients))
        .collect();
    #[cfg(feature = "zeroize")]
    random.zeroize();

    let evaluate_at = |index: u8| {
        let x = FiniteField::new(index);
        Share {
            threshold,
            index,
            data: polynomials.iter().map(|p| p.evaluate(x).0).collect(),
        }
    };

    let shares = match mode {
        SplitMode::Sequential => (1..=total_shares).map(evaluate_at).collect(),
        SplitMode::Parallel => (1..=total_shares).into_par_iter().map(evaluate_at).collect(),
    };

    Ok(shares)
}

/// Reconstructs the secret from shares using Lagrange interpolation at x = 0
///
/// Any `threshold` shares from the same split give back the secret byte for
/// byte; extra shares are accepted. Shares from *different* splits that agree
/// on threshold and length produce an unrelated byte string: there is no
/// built-in authenticity check (see [`crate::integrity`] for an opt-in one).
///
/// # Errors
/// - [`ShamirError::InsufficientShares`] for fewer than two shares
/// - [`ShamirError::InconsistentShares`] if thresholds or payload lengths
///   differ, or an index appears twice
/// - [`ShamirError::BelowThreshold`] for fewer shares than the recorded threshold
pub fn combine(shares: &[Share]) -> Result<Vec<u8>> {
    if shares.len() < MIN_THRESHOLD {
        return Err(ShamirError::InsufficientShares { got: shares.len() });
    }

    let threshold = shares[0].threshold;
    let secret_len = shares[0].data.len();

    if shares.iter().any(|s| s.threshold != threshold) {
        return Err(ShamirError::InconsistentShares(
            "shares have mismatched thresholds".into(),
        ));
    }
    if shares.iter().any(|s| s.data.len() != secret_len) {
        return Err(ShamirError::InconsistentShares(
            "shares have mismatched data lengths".into(),
        ));
    }
    let mut seen = [false; 256];
    for share in shares {
        if std::mem::replace(&mut seen[share.index as usize], true) {
            return Err(ShamirError::InconsistentShares(format!(
                "share index {} appears more than once",
                share.index
            )));
        }
    }
    if shares.len() < threshold as usize {
        return Err(ShamirError::BelowThreshold {
            needed: threshold,
            got: shares.len(),
        });
    }

    log::debug!(
        "combining {} shares of {} bytes with threshold {}",
        shares.len(),
        secret_len,
        threshold
    );

    let basis = lagrange_basis(shares)?;

    let secret = (0..secret_len)
        .into_par_iter()
        .map(|byte_idx| {
            shares
                .iter()
                .zip(&basis)
                .fold(FiniteField::ZERO, |acc, (share, &weight)| {
                    acc + weight * FiniteField::new(share.data[byte_idx])
                })
                .0
        })
        .collect();

    Ok(secret)
}

/// Lagrange basis values at x = 0: `∏_{j≠i} x_j / (x_i - x_j)` for each share
///
/// Depends only on the indices, so it is computed once per combine.
fn lagrange_basis(shares: &[Share]) -> Result<Vec<FiniteField>> {
    let xs: Vec<FiniteField> = shares.iter().map(|s| FiniteField::new(s.index)).collect();

    xs.iter()
        .enumerate()
        .map(|(i, &x_i)| {
            xs.iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .try_fold(FiniteField::ONE, |acc, (_, &x_j)| -> Result<FiniteField> {
                    Ok(acc * x_j.divide(x_i - x_j)?)
                })
        })
        .collect()
}

/// Splits UTF-8 text and returns the shares in their hex encoding
pub fn split_secret(secret: &str, total_shares: usize, threshold: usize) -> Result<Vec<String>> {
    let shares = split(secret.as_bytes(), total_shares, threshold)?;
    Ok(shares.iter().map(codec::encode).collect())
}

/// Decodes hex shares, combines them and returns the text
///
/// Bytes that are not valid UTF-8 (typically from mixing shares of different
/// splits) are replaced with U+FFFD.
pub fn combine_shares<S: AsRef<str>>(shares: &[S]) -> Result<String> {
    if shares.len() < MIN_THRESHOLD {
        return Err(ShamirError::InsufficientShares { got: shares.len() });
    }
    let decoded = shares
        .iter()
        .map(|s| codec::decode(s.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let mut secret = combine(&decoded)?;
    let text = String::from_utf8_lossy(&secret).into_owned();
    #[cfg(feature = "zeroize")]
    secret.zeroize();

    Ok(text)
}

/// Shamir's Secret Sharing scheme with fixed parameters
///
/// Holds a ChaCha20 CSPRNG, seeded from the OS by default or from an explicit
/// seed for reproducible output.
///
/// # Example
/// ```
/// use keeper_share::ShamirShare;
///
/// // Create a scheme with 5 total shares and threshold of 3
/// let mut scheme = ShamirShare::builder(5, 3).build().unwrap();
///
/// let secret = b"my secret data";
/// let shares = scheme.split(secret).unwrap();
///
/// // Reconstruct with 3 shares
/// let reconstructed = ShamirShare::reconstruct(&shares[0..3]).unwrap();
/// assert_eq!(reconstructed, secret);
/// ```
pub struct ShamirShare {
    total_shares: u8,
    threshold: u8,
    config: Config,
    rng: ChaCha20Rng,
}

/// Builder for [`ShamirShare`]
///
/// # Example
/// ```
/// use keeper_share::{Config, ShamirShare, SplitMode};
///
/// let config = Config::new().with_mode(SplitMode::Parallel);
///
/// let shamir = ShamirShare::builder(5, 3)
///     .with_config(config)
///     .with_seed([7u8; 32])
///     .build()
///     .unwrap();
/// assert_eq!(shamir.threshold(), 3);
/// ```
pub struct ShamirShareBuilder {
    total_shares: usize,
    threshold: usize,
    config: Config,
    seed: Option<[u8; 32]>,
}

impl ShamirShareBuilder {
    /// Creates a new builder with the specified parameters and default configuration
    pub fn new(total_shares: usize, threshold: usize) -> Self {
        Self {
            total_shares,
            threshold,
            config: Config::default(),
            seed: None,
        }
    }

    /// Sets a custom configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Seeds the generator explicitly instead of from the OS
    ///
    /// Only for tests and fixtures: anyone holding the seed can recompute the
    /// random coefficients.
    pub fn with_seed(mut self, seed: [u8; 32]) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the scheme with validation
    ///
    /// # Errors
    /// The same parameter errors as [`split`], in the same order, plus
    /// [`ShamirError::InvalidConfig`] and [`ShamirError::Randomness`].
    pub fn build(self) -> Result<ShamirShare> {
        let (total_shares, threshold) = validate_parameters(self.total_shares, self.threshold)?;
        self.config.validate()?;

        let rng = match self.seed {
            Some(seed) => ChaCha20Rng::from_seed(seed),
            None => os_seeded_rng()?,
        };

        Ok(ShamirShare {
            total_shares,
            threshold,
            config: self.config,
            rng,
        })
    }
}

impl ShamirShare {
    /// Creates a builder for configuring a scheme
    pub fn builder(total_shares: usize, threshold: usize) -> ShamirShareBuilder {
        ShamirShareBuilder::new(total_shares, threshold)
    }

    pub fn total_shares(&self) -> u8 {
        self.total_shares
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Splits a secret into `total_shares` shares ordered by index
    ///
    /// # Errors
    /// [`ShamirError::SecretTooLong`] if the configured length limit is exceeded.
    pub fn split(&mut self, secret: &[u8]) -> Result<Vec<Share>> {
        self.config.check_secret_len(secret.len())?;
        split_with_mode(
            secret,
            self.total_shares as usize,
            self.threshold as usize,
            &mut self.rng,
            self.config.mode,
        )
    }

    /// Reconstructs the original secret; see [`combine`]
    pub fn reconstruct(shares: &[Share]) -> Result<Vec<u8>> {
        combine(shares)
    }
}
