use std::ops::{Add, Mul, Sub};

use once_cell::sync::Lazy;

use crate::error::{Result, ShamirError};

/// Irreducible polynomial x⁸ + x⁴ + x³ + x² + 1 used to reduce products
pub const REDUCTION_POLYNOMIAL: u16 = 0x11D;

/// Exponent and logarithm tables for the generator 2
///
/// `exp[255] == exp[0]` so that `(log a + log b) % 255` never needs a branch.
struct Tables {
    exp: [u8; 256],
    log: [u8; 256],
}

impl Tables {
    fn generate() -> Self {
        let mut exp = [0u8; 256];
        let mut log = [0u8; 256];
        let mut x: u16 = 1;
        for i in 0..255 {
            exp[i] = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= REDUCTION_POLYNOMIAL;
            }
        }
        exp[255] = exp[0];
        Self { exp, log }
    }
}

static TABLES: Lazy<Tables> = Lazy::new(Tables::generate);

/// Galois Field (GF(256)) arithmetic implementation
///
/// Represents elements in GF(2⁸) reduced by x⁸ + x⁴ + x³ + x² + 1 (0x11D).
/// Multiplication and division go through log/exp tables that are built once
/// per process on first use and are read-only afterwards.
///
/// # Example
/// ```
/// use keeper_share::FiniteField;
///
/// let a = FiniteField::new(0x53);
/// let b = FiniteField::new(0xCA);
/// let sum = a + b;  // XOR operation
/// let product = a * b;
/// assert_eq!(product.divide(b).unwrap(), a);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FiniteField(pub u8);

impl FiniteField {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    /// Creates a new finite field element
    ///
    /// # Example
    /// ```
    /// use keeper_share::FiniteField;
    ///
    /// let element = FiniteField::new(0xAB);
    /// assert_eq!(element.0, 0xAB);
    /// ```
    #[inline]
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    /// Multiplies two elements: `exp[(log a + log b) mod 255]`, or zero if
    /// either operand is zero
    #[inline]
    pub fn multiply(self, other: Self) -> Self {
        if self.0 == 0 || other.0 == 0 {
            return Self::ZERO;
        }
        let tables = &*TABLES;
        let log_sum = tables.log[self.0 as usize] as usize + tables.log[other.0 as usize] as usize;
        Self(tables.exp[log_sum % 255])
    }

    /// Divides `self` by `other`
    ///
    /// # Errors
    /// Returns [`ShamirError::DivisionByZero`] when `other` is zero.
    ///
    /// # Example
    /// ```
    /// use keeper_share::FiniteField;
    ///
    /// let a = FiniteField::new(0x1D);
    /// assert_eq!(a.divide(FiniteField::new(2)).unwrap(), FiniteField::new(0x80));
    /// assert!(a.divide(FiniteField::ZERO).is_err());
    /// ```
    #[inline]
    pub fn divide(self, other: Self) -> Result<Self> {
        if other.0 == 0 {
            return Err(ShamirError::DivisionByZero);
        }
        if self.0 == 0 {
            return Ok(Self::ZERO);
        }
        let tables = &*TABLES;
        let log_diff =
            tables.log[self.0 as usize] as usize + 255 - tables.log[other.0 as usize] as usize;
        Ok(Self(tables.exp[log_diff % 255]))
    }

    /// Computes exponentiation using square-and-multiply
    ///
    /// # Example
    /// ```
    /// use keeper_share::FiniteField;
    ///
    /// let base = FiniteField::new(0x03);
    /// assert_eq!(base.pow(3), base * base * base);
    /// ```
    #[inline]
    pub fn pow(self, mut exp: u32) -> Self {
        let mut result = Self::ONE;
        let mut base = self;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.multiply(base);
            }
            base = base.multiply(base);
            exp >>= 1;
        }
        result
    }

    /// Multiplicative inverse, `None` for zero
    #[inline]
    pub fn inverse(self) -> Option<Self> {
        Self::ONE.divide(self).ok()
    }
}

impl From<u8> for FiniteField {
    #[inline]
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<FiniteField> for u8 {
    #[inline]
    fn from(value: FiniteField) -> Self {
        value.0
    }
}

/// Implements addition as XOR in GF(2⁸)
impl Add for FiniteField {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        #[allow(clippy::suspicious_arithmetic_impl)]
        let result = self.0 ^ other.0;
        Self(result)
    }
}

impl Mul for FiniteField {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        self.multiply(other)
    }
}

impl Sub for FiniteField {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        // Characteristic 2: subtraction is addition
        self.add(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_follow_generator() {
        let tables = &*TABLES;
        assert_eq!(tables.exp[0], 1);
        assert_eq!(tables.exp[7], 0x80);
        // 0x100 ^ 0x11D
        assert_eq!(tables.exp[8], 0x1D);
        assert_eq!(tables.exp[25], 3);
        assert_eq!(tables.exp[255], tables.exp[0]);
    }

    #[test]
    fn test_tables_are_inverse_mappings() {
        let tables = &*TABLES;
        for i in 0..255usize {
            assert_eq!(tables.log[tables.exp[i] as usize] as usize, i);
        }
        let mut seen = [false; 256];
        for i in 0..255 {
            seen[tables.exp[i] as usize] = true;
        }
        assert!(!seen[0]);
        assert!(seen[1..].iter().all(|&s| s));
    }

    #[test]
    fn test_addition() {
        let a = FiniteField::new(0x53);
        let b = FiniteField::new(0xCA);
        assert_eq!((a + b).0, 0x99);
        assert_eq!(a - b, a + b);
    }

    #[test]
    fn test_multiplication_by_two_reduces() {
        assert_eq!(FiniteField::new(0x80) * FiniteField::new(2), FiniteField::new(0x1D));
        assert_eq!(FiniteField::new(2).pow(25), FiniteField::new(3));
    }

    #[test]
    fn test_multiplication_by_zero() {
        for i in 0..=255u8 {
            assert_eq!(FiniteField::new(i) * FiniteField::ZERO, FiniteField::ZERO);
            assert_eq!(FiniteField::ZERO * FiniteField::new(i), FiniteField::ZERO);
        }
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            FiniteField::new(7).divide(FiniteField::ZERO),
            Err(ShamirError::DivisionByZero)
        );
        assert_eq!(
            FiniteField::ZERO.divide(FiniteField::ZERO),
            Err(ShamirError::DivisionByZero)
        );
        assert_eq!(FiniteField::ZERO.divide(FiniteField::new(9)), Ok(FiniteField::ZERO));
    }

    #[test]
    fn test_division_undoes_multiplication() {
        for a in 0..=255u8 {
            for b in 1..=255u8 {
                let (a, b) = (FiniteField::new(a), FiniteField::new(b));
                assert_eq!((a * b).divide(b).unwrap(), a);
            }
        }
    }

    #[test]
    fn test_all_inverses() {
        for i in 1..=255 {
            let a = FiniteField::new(i);
            let inv = a.inverse().unwrap();
            assert_eq!((a * inv).0, 0x01);
        }
        assert_eq!(FiniteField::ZERO.inverse(), None);
    }

    #[test]
    fn test_multiplication_associativity() {
        let a = FiniteField::new(0x53);
        let b = FiniteField::new(0xCA);
        let c = FiniteField::new(0x7B);
        assert_eq!((a * b) * c, a * (b * c));
    }

    #[test]
    fn test_commutativity() {
        for a in 0..=255u8 {
            let b = a.wrapping_mul(31).wrapping_add(7);
            assert_eq!(
                FiniteField::new(a) * FiniteField::new(b),
                FiniteField::new(b) * FiniteField::new(a)
            );
        }
    }

    #[test]
    fn test_distributivity() {
        let a = FiniteField::new(0x12);
        let b = FiniteField::new(0x34);
        let c = FiniteField::new(0x56);
        assert_eq!(a * (b + c), (a * b) + (a * c));
    }

    #[test]
    fn test_identity() {
        let value = FiniteField::new(0xAB);
        assert_eq!(value * FiniteField::ONE, value);
        assert_eq!(value.pow(0), FiniteField::ONE);
        assert_eq!(value.pow(255), FiniteField::ONE);
    }
}
