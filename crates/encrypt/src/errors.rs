// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use ntru_params::ParamsError;
use ntru_polynomial::PolynomialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NtruError {
    #[error("Message of {len} bytes exceeds the limit of {max} bytes")]
    MessageTooLong { len: usize, max: usize },

    /// Deliberately carries no detail about which check failed.
    #[error("Decryption failed")]
    DecryptionFailure,

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Gave up after {attempts} attempts to {operation}")]
    RetriesExhausted {
        operation: &'static str,
        attempts: usize,
    },

    #[error("Key encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error(transparent)]
    Polynomial(#[from] PolynomialError),
}

pub type Result<T> = std::result::Result<T, NtruError>;
