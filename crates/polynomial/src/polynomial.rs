// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Polynomial arithmetic in the truncated ring Z[x]/(x^N - 1).

use crate::errors::PolynomialError;
use crate::utils::{recenter, recenter_coefficients_mut, symmetric_center, validate_window};
use crate::Coefficient;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An element of the truncated polynomial ring Z[x]/(x^N - 1).
///
/// Coefficients are stored in ascending order of degree, so the polynomial is
/// `c_0 + c_1 * x + ... + c_{N-1} * x^{N-1}`. The ring degree `N` is the
/// number of coefficients and never changes after construction.
///
/// Equality and hashing are structural: two polynomials are equal iff they have
/// the same ring degree and identical coefficient sequences.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Polynomial {
    /// Coefficients in ascending order (constant term first).
    coefficients: Vec<Coefficient>,
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (degree, coeff) in self.coefficients.iter().enumerate().rev() {
            if *coeff == 0 {
                continue;
            }

            if !first {
                if *coeff > 0 {
                    write!(f, " + ")?;
                } else {
                    write!(f, " - ")?;
                }
            } else if *coeff < 0 {
                write!(f, "-")?;
            }
            first = false;

            let abs_coeff = coeff.unsigned_abs();
            if degree == 0 || abs_coeff != 1 {
                write!(f, "{abs_coeff}")?;
            }

            if degree > 0 {
                write!(f, "x")?;
                if degree > 1 {
                    write!(f, "^{degree}")?;
                }
            }
        }

        if first {
            write!(f, "0")?;
        }

        Ok(())
    }
}

impl From<Vec<Coefficient>> for Polynomial {
    fn from(coefficients: Vec<Coefficient>) -> Self {
        Self::new(coefficients)
    }
}

impl From<&[Coefficient]> for Polynomial {
    fn from(coefficients: &[Coefficient]) -> Self {
        Self::from_slice(coefficients)
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::Zeroize for Polynomial {
    fn zeroize(&mut self) {
        // Zeroing the slice keeps the ring degree intact.
        zeroize::Zeroize::zeroize(self.coefficients.as_mut_slice());
    }
}

impl Polynomial {
    /// Creates a new polynomial taking ownership of its coefficients.
    ///
    /// # Arguments
    ///
    /// * `coefficients` - Coefficients in ascending order of degree. The length
    ///   of the vector is the ring degree `N`.
    pub fn new(coefficients: Vec<Coefficient>) -> Self {
        Self { coefficients }
    }

    /// Creates a polynomial by copying the caller's coefficients.
    ///
    /// Later changes to the polynomial never show up in `coefficients` and
    /// vice versa.
    pub fn from_slice(coefficients: &[Coefficient]) -> Self {
        Self {
            coefficients: coefficients.to_vec(),
        }
    }

    /// Creates the zero polynomial of ring degree `n`.
    pub fn zero(n: usize) -> Self {
        Self {
            coefficients: vec![0; n],
        }
    }

    /// Creates the multiplicative identity `1` of ring degree `n`.
    pub fn one(n: usize) -> Self {
        Self::monomial(n, 0)
    }

    /// Creates `x^k` in the ring of degree `n`. The exponent wraps modulo `n`.
    pub fn monomial(n: usize, k: usize) -> Self {
        let mut coefficients = vec![0; n];
        if n > 0 {
            coefficients[k % n] = 1;
        }
        Self { coefficients }
    }

    /// Returns the coefficients of the polynomial in ascending order.
    pub fn coefficients(&self) -> &[Coefficient] {
        &self.coefficients
    }

    /// Consumes the polynomial and returns its coefficients.
    pub fn into_coefficients(self) -> Vec<Coefficient> {
        self.coefficients
    }

    /// Returns the ring degree `N`, i.e. the number of coefficients.
    pub fn ring_degree(&self) -> usize {
        self.coefficients.len()
    }

    /// Checks if the polynomial is zero.
    pub fn is_zero(&self) -> bool {
        self.coefficients.iter().all(|c| *c == 0)
    }

    fn check_dimensions(&self, other: &Self) -> Result<(), PolynomialError> {
        if self.coefficients.len() != other.coefficients.len() {
            return Err(PolynomialError::DimensionMismatch {
                left: self.coefficients.len(),
                right: other.coefficients.len(),
            });
        }
        Ok(())
    }

    /// Cyclic convolution accumulated in `i128`.
    ///
    /// With `modulus` set every partial sum is folded mod `modulus`, so the
    /// accumulator stays below `modulus` in magnitude. Operands are expected
    /// to be reduced in that case.
    fn convolve_wide(
        &self,
        other: &Self,
        modulus: Option<i128>,
    ) -> Result<Vec<i128>, PolynomialError> {
        self.check_dimensions(other)?;

        let n = self.coefficients.len();
        let mut acc = vec![0i128; n];

        for (i, a) in self.coefficients.iter().enumerate() {
            // blinding and key polynomials are sparse
            if *a == 0 {
                continue;
            }
            let a = *a as i128;
            for (j, b) in other.coefficients.iter().enumerate() {
                let k = if i + j >= n { i + j - n } else { i + j };
                let sum = a
                    .checked_mul(*b as i128)
                    .and_then(|product| acc[k].checked_add(product))
                    .ok_or(PolynomialError::ArithmeticOverflow { index: k })?;
                acc[k] = match modulus {
                    Some(m) => sum % m,
                    None => sum,
                };
            }
        }

        Ok(acc)
    }

    fn zip_wide(
        &self,
        other: &Self,
        op: impl Fn(i128, i128) -> i128,
    ) -> Result<Vec<i128>, PolynomialError> {
        self.check_dimensions(other)?;
        Ok(self
            .coefficients
            .iter()
            .zip(other.coefficients.iter())
            .map(|(a, b)| op(*a as i128, *b as i128))
            .collect())
    }

    fn narrow(wide: Vec<i128>) -> Result<Self, PolynomialError> {
        wide.into_iter()
            .enumerate()
            .map(|(index, value)| {
                Coefficient::try_from(value)
                    .map_err(|_| PolynomialError::ArithmeticOverflow { index })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    fn narrow_recentered(
        wide: Vec<i128>,
        modulus: Coefficient,
        center: Coefficient,
    ) -> Result<Self, PolynomialError> {
        validate_window(modulus, center)?;
        Ok(Self::new(
            wide.into_iter()
                .map(|value| recenter(value, modulus, center))
                .collect(),
        ))
    }

    /// Multiplies two polynomials in Z[x]/(x^N - 1).
    ///
    /// `c[k] = Σ a[i] * b[j]` over all pairs with `(i + j) mod N == k`. No
    /// modular reduction is applied.
    ///
    /// # Errors
    ///
    /// Returns `PolynomialError::DimensionMismatch` if the ring degrees differ.
    /// Returns `PolynomialError::ArithmeticOverflow` if a coefficient of the
    /// product does not fit the coefficient type.
    pub fn convolution(&self, other: &Self) -> Result<Self, PolynomialError> {
        Self::narrow(self.convolve_wide(other, None)?)
    }

    /// Multiplies two polynomials and reduces every coefficient into the
    /// symmetric window `[-q/2, q/2)`.
    ///
    /// Operands are reduced first and partial sums are folded mod q, so any
    /// coefficient values are accepted.
    ///
    /// # Errors
    ///
    /// Returns `PolynomialError::DimensionMismatch` if the ring degrees differ.
    /// Returns `PolynomialError::InvalidModulus` if `q <= 0`.
    pub fn convolution_mod(&self, other: &Self, q: Coefficient) -> Result<Self, PolynomialError> {
        // fail before the quadratic work
        validate_window(q, symmetric_center(q))?;
        let left = self.reduce_mod(q)?;
        let right = other.reduce_mod(q)?;
        Self::narrow_recentered(
            left.convolve_wide(&right, Some(q as i128))?,
            q,
            symmetric_center(q),
        )
    }

    /// Adds two polynomials coefficient by coefficient.
    ///
    /// # Errors
    ///
    /// Returns `PolynomialError::DimensionMismatch` if the ring degrees differ.
    pub fn add(&self, other: &Self) -> Result<Self, PolynomialError> {
        Self::narrow(self.zip_wide(other, |a, b| a + b)?)
    }

    /// Adds two polynomials and reduces the sum into `[-q/2, q/2)`.
    pub fn add_mod(&self, other: &Self, q: Coefficient) -> Result<Self, PolynomialError> {
        self.add_and_recenter(other, q, symmetric_center(q))
    }

    /// Subtracts `other` from `self` coefficient by coefficient.
    ///
    /// # Errors
    ///
    /// Returns `PolynomialError::DimensionMismatch` if the ring degrees differ.
    pub fn subtract(&self, other: &Self) -> Result<Self, PolynomialError> {
        Self::narrow(self.zip_wide(other, |a, b| a - b)?)
    }

    /// Subtracts `other` from `self` and reduces the difference into
    /// `[-q/2, q/2)`.
    pub fn subtract_mod(&self, other: &Self, q: Coefficient) -> Result<Self, PolynomialError> {
        self.subtract_and_recenter(other, q, symmetric_center(q))
    }

    /// Adds two polynomials and recenters every coefficient of the sum into
    /// `[center, center + modulus)`. Neither operand is modified.
    ///
    /// With `modulus = 3` and `center = -1` the result is trinary.
    pub fn add_and_recenter(
        &self,
        other: &Self,
        modulus: Coefficient,
        center: Coefficient,
    ) -> Result<Self, PolynomialError> {
        Self::narrow_recentered(self.zip_wide(other, |a, b| a + b)?, modulus, center)
    }

    /// Subtracts `other` from `self` and recenters every coefficient of the
    /// difference into `[center, center + modulus)`. Neither operand is modified.
    pub fn subtract_and_recenter(
        &self,
        other: &Self,
        modulus: Coefficient,
        center: Coefficient,
    ) -> Result<Self, PolynomialError> {
        Self::narrow_recentered(self.zip_wide(other, |a, b| a - b)?, modulus, center)
    }

    /// Recenters this polynomial in place.
    ///
    /// Every coefficient `v` is replaced by the unique `r` with
    /// `r ≡ v (mod modulus)` and `center <= r < center + modulus`. This is the
    /// only operation that mutates a polynomial; clone first to keep the
    /// original.
    ///
    /// # Errors
    ///
    /// Returns `PolynomialError::InvalidModulus` if `modulus <= 0`, in which
    /// case the polynomial is left unchanged.
    pub fn recenter_mod_q(
        &mut self,
        modulus: Coefficient,
        center: Coefficient,
    ) -> Result<(), PolynomialError> {
        recenter_coefficients_mut(&mut self.coefficients, modulus, center)
    }

    /// Returns a copy reduced into the symmetric window `[-q/2, q/2)`.
    pub fn reduce_mod(&self, q: Coefficient) -> Result<Self, PolynomialError> {
        let mut reduced = self.clone();
        reduced.recenter_mod_q(q, symmetric_center(q))?;
        Ok(reduced)
    }

    /// Multiplies each coefficient of the polynomial by a scalar.
    ///
    /// # Errors
    ///
    /// Returns `PolynomialError::ArithmeticOverflow` if a product does not fit
    /// the coefficient type.
    pub fn scalar_mul(&self, scalar: Coefficient) -> Result<Self, PolynomialError> {
        Self::narrow(
            self.coefficients
                .iter()
                .map(|x| *x as i128 * scalar as i128)
                .collect(),
        )
    }
}
