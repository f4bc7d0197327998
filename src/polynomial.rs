//! Polynomial evaluation over GF(256)
//!
//! One polynomial is built per secret byte: the constant term is the secret
//! byte, the remaining `threshold - 1` coefficients are random.

use crate::finite_field::FiniteField;

#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Evaluates the polynomial with the given coefficients (lowest degree first) at `x`
///
/// At `x == 0` the constant term is returned directly. Otherwise Horner's
/// method folds from the highest degree down: `acc = acc * x + c`.
///
/// # Example
/// ```
/// use keeper_share::{FiniteField, polynomial::evaluate};
///
/// let coefficients = [FiniteField::new(42), FiniteField::new(7)];
/// assert_eq!(evaluate(&coefficients, FiniteField::ZERO), FiniteField::new(42));
/// assert_eq!(evaluate(&coefficients, FiniteField::ONE), FiniteField::new(42 ^ 7));
/// ```
#[inline]
pub fn evaluate(coefficients: &[FiniteField], x: FiniteField) -> FiniteField {
    if x == FiniteField::ZERO {
        return coefficients.first().copied().unwrap_or_default();
    }
    coefficients
        .iter()
        .rev()
        .fold(FiniteField::ZERO, |acc, &coefficient| acc * x + coefficient)
}

/// A polynomial over GF(256), coefficients ordered from degree 0 upwards
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "zeroize", derive(Zeroize, ZeroizeOnDrop))]
pub struct Polynomial {
    coefficients: Vec<u8>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<u8>) -> Self {
        Self { coefficients }
    }

    /// Builds the sharing polynomial for one secret byte
    ///
    /// `random` supplies coefficients 1 and upwards, so the resulting degree is
    /// `random.len()`.
    pub fn from_secret_byte(secret: u8, random: &[u8]) -> Self {
        let mut coefficients = Vec::with_capacity(random.len() + 1);
        coefficients.push(secret);
        coefficients.extend_from_slice(random);
        Self { coefficients }
    }

    /// Degree of the polynomial (0 for a constant or empty polynomial)
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// The constant term, i.e. the shared secret byte
    pub fn constant_term(&self) -> u8 {
        self.coefficients.first().copied().unwrap_or(0)
    }

    #[inline]
    pub fn evaluate(&self, x: FiniteField) -> FiniteField {
        if x == FiniteField::ZERO {
            return FiniteField::new(self.constant_term());
        }
        self.coefficients
            .iter()
            .rev()
            .fold(FiniteField::ZERO, |acc, &coefficient| {
                acc * x + FiniteField::new(coefficient)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_returns_constant_term() {
        let poly = Polynomial::from_secret_byte(0xAB, &[0x01, 0xFF, 0x33]);
        assert_eq!(poly.evaluate(FiniteField::ZERO), FiniteField::new(0xAB));
        assert_eq!(poly.degree(), 3);
    }

    #[test]
    fn test_constant_polynomial() {
        let poly = Polynomial::from_secret_byte(0x5C, &[]);
        for x in 0..=255u8 {
            assert_eq!(poly.evaluate(FiniteField::new(x)), FiniteField::new(0x5C));
        }
    }

    #[test]
    fn test_matches_power_sum() {
        let coefficients = [0x12u8, 0x34, 0x56, 0x78];
        let poly = Polynomial::new(coefficients.to_vec());
        for x in 1..=255u8 {
            let x = FiniteField::new(x);
            let expected = coefficients
                .iter()
                .enumerate()
                .fold(FiniteField::ZERO, |acc, (power, &c)| {
                    acc + FiniteField::new(c) * x.pow(power as u32)
                });
            assert_eq!(poly.evaluate(x), expected);
        }
    }

    #[test]
    fn test_free_function_agrees_with_method() {
        let raw = [9u8, 200, 17];
        let coefficients: Vec<FiniteField> = raw.iter().copied().map(FiniteField::new).collect();
        let poly = Polynomial::new(raw.to_vec());
        for x in 0..=255u8 {
            let x = FiniteField::new(x);
            assert_eq!(evaluate(&coefficients, x), poly.evaluate(x));
        }
    }

    #[test]
    fn test_empty_polynomial_is_zero() {
        assert_eq!(evaluate(&[], FiniteField::new(3)), FiniteField::ZERO);
        assert_eq!(evaluate(&[], FiniteField::ZERO), FiniteField::ZERO);
        assert_eq!(Polynomial::new(Vec::new()).degree(), 0);
    }
}
