// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Ring inversion modulo a power of two.
//!
//! The inverse is first found in GF(2)[x]/(x^N - 1) with the extended
//! Euclidean algorithm and then lifted with Newton iteration
//! `b <- b * (2 - a * b)`, which squares the modulus at every step.

use crate::errors::PolynomialError;
use crate::polynomial::Polynomial;
use crate::Coefficient;

/// Polynomial over GF(2), one bit per byte, index equals degree.
/// Always trimmed so that the last entry (if any) is 1.
type Gf2Poly = Vec<u8>;

fn trim(p: &mut Gf2Poly) {
    while p.last() == Some(&0) {
        p.pop();
    }
}

fn add_gf2(a: &[u8], b: &[u8]) -> Gf2Poly {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = long.to_vec();
    for (i, c) in short.iter().enumerate() {
        out[i] ^= c;
    }
    trim(&mut out);
    out
}

fn mul_gf2(a: &[u8], b: &[u8]) -> Gf2Poly {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0u8; a.len() + b.len() - 1];
    for (i, _) in a.iter().enumerate().filter(|(_, c)| **c == 1) {
        for (j, c) in b.iter().enumerate() {
            out[i + j] ^= c;
        }
    }
    trim(&mut out);
    out
}

/// Long division over GF(2). `divisor` must be non-zero and trimmed.
fn divmod_gf2(dividend: &[u8], divisor: &[u8]) -> (Gf2Poly, Gf2Poly) {
    let mut remainder = dividend.to_vec();
    trim(&mut remainder);
    if remainder.len() < divisor.len() {
        return (Vec::new(), remainder);
    }

    let mut quotient = vec![0u8; remainder.len() - divisor.len() + 1];
    while remainder.len() >= divisor.len() {
        let shift = remainder.len() - divisor.len();
        quotient[shift] = 1;
        for (i, c) in divisor.iter().enumerate() {
            remainder[i + shift] ^= c;
        }
        trim(&mut remainder);
    }
    trim(&mut quotient);
    (quotient, remainder)
}

/// Inverse of `a` in GF(2)[x]/(x^N - 1), or `None` if gcd(a, x^N - 1) != 1.
fn invert_mod2(a: &[u8], n: usize) -> Option<Gf2Poly> {
    // x^N - 1 == x^N + 1 over GF(2)
    let mut r0 = vec![0u8; n + 1];
    r0[0] = 1;
    r0[n] = 1;
    let mut r1 = a.to_vec();
    trim(&mut r1);

    // s_i * a == r_i (mod x^N - 1)
    let mut s0: Gf2Poly = Vec::new();
    let mut s1: Gf2Poly = vec![1];

    while !r1.is_empty() {
        let (quotient, remainder) = divmod_gf2(&r0, &r1);
        let s2 = add_gf2(&s0, &mul_gf2(&quotient, &s1));
        r0 = std::mem::replace(&mut r1, remainder);
        s0 = std::mem::replace(&mut s1, s2);
    }

    if r0 != [1] {
        return None;
    }

    let mut inverse = vec![0u8; n];
    for (i, c) in s0.iter().enumerate() {
        inverse[i % n] ^= c;
    }
    Some(inverse)
}

impl Polynomial {
    /// Computes the inverse of this polynomial in (Z/qZ)[x]/(x^N - 1).
    ///
    /// The result is reduced into the symmetric window `[-q/2, q/2)`.
    ///
    /// # Errors
    ///
    /// Returns `PolynomialError::InvalidModulus` unless `q` is a power of two
    /// and at least 2.
    /// Returns `PolynomialError::NotInvertible` if the polynomial is not a
    /// unit in the ring.
    pub fn inverse_mod_power_of_two(&self, q: Coefficient) -> Result<Self, PolynomialError> {
        if q < 2 || q & (q - 1) != 0 {
            return Err(PolynomialError::InvalidModulus { modulus: q });
        }

        let n = self.ring_degree();
        if n == 0 {
            return Err(PolynomialError::NotInvertible { modulus: q });
        }

        let bits: Gf2Poly = self
            .coefficients()
            .iter()
            .map(|c| c.rem_euclid(2) as u8)
            .collect();
        let inverse_mod2 =
            invert_mod2(&bits, n).ok_or(PolynomialError::NotInvertible { modulus: 2 })?;

        let mut inverse = Polynomial::new(inverse_mod2.into_iter().map(Coefficient::from).collect());
        let mut modulus: Coefficient = 2;
        while modulus < q {
            modulus = modulus.saturating_mul(modulus).min(q);

            let product = self.convolution_mod(&inverse, modulus)?;
            let mut correction: Vec<Coefficient> =
                product.coefficients().iter().map(|c| -c).collect();
            correction[0] += 2;

            inverse = inverse.convolution_mod(&Polynomial::new(correction), modulus)?;
        }

        let inverse = inverse.reduce_mod(q)?;
        if self.convolution_mod(&inverse, q)? != Polynomial::one(n).reduce_mod(q)? {
            return Err(PolynomialError::NotInvertible { modulus: q });
        }

        Ok(inverse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divmod_gf2() {
        // x^3 + 1 = (x + 1)(x^2 + x + 1)
        let (q, r) = divmod_gf2(&[1, 0, 0, 1], &[1, 1]);
        assert_eq!(q, vec![1, 1, 1]);
        assert!(r.is_empty());

        // x^2 = 1 * (x^2 + 1) + 1
        let (q, r) = divmod_gf2(&[0, 0, 1], &[1, 0, 1]);
        assert_eq!(q, vec![1]);
        assert_eq!(r, vec![1]);
    }

    #[test]
    fn test_invert_mod2() {
        let a = vec![1, 1, 1, 0, 0];
        let inverse = invert_mod2(&a, 5).unwrap();
        let product = mul_gf2(&a, &inverse);
        let mut folded = vec![0u8; 5];
        for (i, c) in product.iter().enumerate() {
            folded[i % 5] ^= c;
        }
        assert_eq!(folded, vec![1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_invert_mod2_rejects_non_units() {
        // 1 + x divides x^N - 1
        assert!(invert_mod2(&[1, 1, 0, 0, 0], 5).is_none());
        assert!(invert_mod2(&[0, 0, 0, 0, 0], 5).is_none());
    }

    #[test]
    fn test_inverse_mod_2048() {
        let a = Polynomial::new(vec![1, 1, 1, 0, 0]);
        let inverse = a.inverse_mod_power_of_two(2048).unwrap();
        assert_eq!(
            a.convolution_mod(&inverse, 2048).unwrap(),
            Polynomial::one(5)
        );
        assert!(inverse.coefficients().iter().all(|c| (-1024..1024).contains(c)));
    }

    #[test]
    fn test_inverse_of_ntru_style_key() {
        // f = 1 + 3F with F = x - x^3 + x^6 - x^9
        let mut coefficients = vec![0; 11];
        coefficients[0] = 1;
        coefficients[1] = 3;
        coefficients[3] = -3;
        coefficients[6] = 3;
        coefficients[9] = -3;
        let f = Polynomial::new(coefficients);
        let inverse = f.inverse_mod_power_of_two(32).unwrap();
        assert_eq!(f.convolution_mod(&inverse, 32).unwrap(), Polynomial::one(11));
    }

    #[test]
    fn test_one_is_self_inverse() {
        let one = Polynomial::one(7);
        assert_eq!(one.inverse_mod_power_of_two(256).unwrap(), one);
    }

    #[test]
    fn test_non_invertible() {
        let a = Polynomial::new(vec![1, 1, 0, 0, 0]);
        assert_eq!(
            a.inverse_mod_power_of_two(2048),
            Err(PolynomialError::NotInvertible { modulus: 2 })
        );
        assert!(Polynomial::zero(0).inverse_mod_power_of_two(4).is_err());
    }

    #[test]
    fn test_invalid_modulus() {
        let a = Polynomial::one(3);
        for q in [0, 1, 3, 12, -8] {
            assert_eq!(
                a.inverse_mod_power_of_two(q),
                Err(PolynomialError::InvalidModulus { modulus: q })
            );
        }
    }
}
