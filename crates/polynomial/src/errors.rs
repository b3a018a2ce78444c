// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for ring operations.

use thiserror::Error;

/// Errors that can occur during polynomial ring operations.
///
/// Every variant is a contract violation by the caller; none are transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolynomialError {
    /// Operands of a binary operation live in rings of different degree
    #[error("Dimension mismatch: left operand has {left} coefficients, right operand has {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// Modulus or window size is not usable for reduction
    #[error("Invalid modulus: {modulus}")]
    InvalidModulus { modulus: i64 },

    /// An unreduced result does not fit the coefficient type
    #[error("Arithmetic overflow in coefficient {index}")]
    ArithmeticOverflow { index: usize },

    /// The polynomial has no inverse in the requested ring
    #[error("Polynomial is not invertible modulo {modulus}")]
    NotInvertible { modulus: i64 },
}
