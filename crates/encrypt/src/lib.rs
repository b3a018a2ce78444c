// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! NTRUEncrypt public key encryption over `Z[x]/(x^N - 1)`.
//!
//! ```no_run
//! use ntru_encrypt::{generate_key_pair, NtruPreset};
//! use rand::rngs::OsRng;
//!
//! let pair = generate_key_pair(&NtruPreset::Ees401Ep1.params(), &mut OsRng)?;
//! let ciphertext = pair.public.encrypt(b"hello", &mut OsRng)?;
//! assert_eq!(pair.private.decrypt(&ciphertext)?, b"hello");
//! # Ok::<(), ntru_encrypt::NtruError>(())
//! ```

mod cipher;
pub mod encoding;
mod errors;
pub mod generators;
mod keys;

pub use errors::{NtruError, Result};
pub use keys::{generate_key_pair, KeyPair, PrivateKey, PublicKey};
pub use ntru_params::{KeyParams, NtruPreset};
