// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Coefficient reduction helpers.

use crate::errors::PolynomialError;
use crate::Coefficient;

/// Returns the lower bound of the symmetric window for modulus `q`.
///
/// For even `q` the window is `[-q/2, q/2)`; for odd `q` it is
/// `[-(q-1)/2, (q-1)/2]`.
pub fn symmetric_center(q: Coefficient) -> Coefficient {
    -(q / 2)
}

/// Checks that `modulus` is positive and that the window
/// `[center, center + modulus)` fits the coefficient type.
pub fn validate_window(modulus: Coefficient, center: Coefficient) -> Result<(), PolynomialError> {
    if modulus <= 0 || center.checked_add(modulus - 1).is_none() {
        return Err(PolynomialError::InvalidModulus { modulus });
    }
    Ok(())
}

/// Reduces a number modulo a modulus.
///
/// # Arguments
///
/// * `x` - The number to reduce
/// * `modulus` - The modulus to reduce by, must be positive
///
/// # Returns
///
/// The reduced number in the range [0, modulus)
pub fn reduce(x: i128, modulus: Coefficient) -> Coefficient {
    // rem_euclid of a positive modulus always lands in [0, modulus)
    x.rem_euclid(modulus as i128) as Coefficient
}

/// Maps `x` to the unique `r` with `r ≡ x (mod modulus)` and
/// `center <= r < center + modulus`.
///
/// The caller is expected to have checked the window with [`validate_window`].
pub fn recenter(x: i128, modulus: Coefficient, center: Coefficient) -> Coefficient {
    let offset = (x - center as i128).rem_euclid(modulus as i128);
    (offset + center as i128) as Coefficient
}

/// Recenters every coefficient of `coefficients` in place.
///
/// # Arguments
///
/// * `coefficients` - A mutable slice of coefficients to be recentered
/// * `modulus` - The window size, must be positive
/// * `center` - Lower bound of the window
pub fn recenter_coefficients_mut(
    coefficients: &mut [Coefficient],
    modulus: Coefficient,
    center: Coefficient,
) -> Result<(), PolynomialError> {
    validate_window(modulus, center)?;
    coefficients
        .iter_mut()
        .for_each(|x| *x = recenter(*x as i128, modulus, center));
    Ok(())
}

/// Recenters polynomial coefficients into `[center, center + modulus)`.
///
/// This function creates a new vector and leaves the input untouched.
pub fn recenter_coefficients(
    coefficients: &[Coefficient],
    modulus: Coefficient,
    center: Coefficient,
) -> Result<Vec<Coefficient>, PolynomialError> {
    validate_window(modulus, center)?;
    Ok(coefficients
        .iter()
        .map(|x| recenter(*x as i128, modulus, center))
        .collect())
}

/// Reduces each coefficient into `[0, modulus)`.
pub fn reduce_coefficients(
    coefficients: &[Coefficient],
    modulus: Coefficient,
) -> Result<Vec<Coefficient>, PolynomialError> {
    recenter_coefficients(coefficients, modulus, 0)
}

/// Checks if all coefficients in a slice are within a centered range.
///
/// This function verifies that every coefficient falls within the inclusive
/// range [lower_bound, upper_bound]. Protocol code uses it to confirm that a
/// polynomial is trinary.
pub fn range_check_centered(
    coefficients: &[Coefficient],
    lower_bound: Coefficient,
    upper_bound: Coefficient,
) -> bool {
    coefficients
        .iter()
        .all(|coeff| *coeff >= lower_bound && *coeff <= upper_bound)
}
