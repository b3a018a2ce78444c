// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! # NTRU Polynomial Ring
//!
//! Arithmetic in the truncated polynomial ring Z[x]/(x^N - 1) that NTRUEncrypt
//! is built on.
//!
//! ## Features
//!
//! - Cyclic convolution, with and without reduction modulo q.
//! - Addition and subtraction, with and without reduction modulo q.
//! - Recentering into an arbitrary window `[center, center + m)`, in place or
//!   fused with addition/subtraction.
//! - Inversion modulo a power of two, as needed for key generation.
//! - Serialization: optional serde support (`serde` feature).
//! - Zeroization of key material (`zeroize` feature).
//!
//! ## Conventions
//!
//! A polynomial of ring degree `N` has exactly `N` coefficients stored in
//! ascending order. "Reduced modulo q" always means the symmetric window
//! `[-q/2, q/2)`. Binary operations on polynomials of different ring degree
//! fail with [`PolynomialError::DimensionMismatch`].

pub mod errors;
pub mod inverse;
pub mod polynomial;
pub mod utils;

pub use errors::PolynomialError;
pub use polynomial::Polynomial;
pub use utils::*;

/// Coefficient type of ring elements.
pub type Coefficient = i64;
