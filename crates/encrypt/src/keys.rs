// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use ntru_params::KeyParams;
use ntru_polynomial::{range_check_centered, Polynomial, PolynomialError};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use zeroize::Zeroize;

use crate::errors::{NtruError, Result};
use crate::generators::random_ternary;

const MAX_ATTEMPTS: usize = 1000;

/// Public key `h = p * g * f^-1 (mod q)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    pub(crate) params: KeyParams,
    pub(crate) h: Polynomial,
}

/// Private key `f = 1 + p * F` together with the matching public polynomial.
///
/// The private polynomial is wiped when the key is dropped.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKey {
    pub(crate) params: KeyParams,
    pub(crate) h: Polynomial,
    pub(crate) f: Polynomial,
}

#[derive(Clone)]
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.f.zeroize();
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Checks that `h` is a ring element of the right degree reduced mod q.
fn check_public(params: &KeyParams, h: &Polynomial) -> Result<()> {
    params.validate()?;
    if h.ring_degree() != params.n {
        return Err(NtruError::InvalidKey(format!(
            "expected {} coefficients, found {}",
            params.n,
            h.ring_degree()
        )));
    }
    if !range_check_centered(h.coefficients(), -(params.q / 2), params.q / 2 - 1) {
        return Err(NtruError::InvalidKey(
            "public polynomial is not reduced mod q".to_string(),
        ));
    }
    Ok(())
}

impl PublicKey {
    pub fn params(&self) -> &KeyParams {
        &self.params
    }

    pub fn h(&self) -> &Polynomial {
        &self.h
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decodes a key written by [`PublicKey::to_bytes`] and checks it against
    /// its own parameter set.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let key: PublicKey = bincode::deserialize(bytes)?;
        check_public(&key.params, &key.h)?;
        Ok(key)
    }
}

impl PrivateKey {
    pub fn params(&self) -> &KeyParams {
        &self.params
    }

    /// The public key belonging to this private key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            params: self.params,
            h: self.h.clone(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decodes a key written by [`PrivateKey::to_bytes`].
    ///
    /// Besides the checks applied to public keys this verifies that `f` has
    /// the shape `1 + p * F` with ternary `F`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let key: PrivateKey = bincode::deserialize(bytes)?;
        check_public(&key.params, &key.h)?;
        if key.f.ring_degree() != key.params.n {
            return Err(NtruError::InvalidKey(
                "private polynomial has the wrong degree".to_string(),
            ));
        }

        let p = key.params.p;
        let mut shifted = key.f.coefficients().to_vec();
        let ternary = match shifted[0].checked_sub(1) {
            Some(first) => {
                shifted[0] = first;
                shifted.iter().all(|c| c % p == 0 && (-p..=p).contains(c))
            }
            None => false,
        };
        shifted.zeroize();
        if !ternary {
            return Err(NtruError::InvalidKey(
                "private polynomial is not of the form 1 + pF".to_string(),
            ));
        }
        Ok(key)
    }
}

/// Generates a key pair for `params`.
///
/// `F` gets `df` coefficients equal to +1 and `df` equal to -1 and is redrawn
/// until `f = 1 + p * F` is invertible mod q. `g` gets `dg` coefficients equal
/// to +1 and `dg - 1` equal to -1 and is redrawn until it is invertible mod 2.
#[instrument(skip_all, fields(n = params.n))]
pub fn generate_key_pair<R: RngCore + CryptoRng>(
    params: &KeyParams,
    rng: &mut R,
) -> Result<KeyPair> {
    params.validate()?;
    let n = params.n;

    let (f, fq) = retry("find an invertible f", || {
        let mut big_f = random_ternary(rng, n, params.df, params.df);
        let f = big_f.scalar_mul(params.p)?.add(&Polynomial::one(n))?;
        big_f.zeroize();
        match f.inverse_mod_power_of_two(params.q) {
            Ok(fq) => Ok(Some((f, fq))),
            Err(PolynomialError::NotInvertible { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    })?;

    let g = retry("find an invertible g", || {
        let g = random_ternary(rng, n, params.dg, params.dg - 1);
        match g.inverse_mod_power_of_two(2) {
            Ok(_) => Ok(Some(g)),
            Err(PolynomialError::NotInvertible { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    })?;

    let h = fq
        .convolution_mod(&g, params.q)?
        .scalar_mul(params.p)?
        .reduce_mod(params.q)?;

    Ok(KeyPair {
        public: PublicKey {
            params: *params,
            h: h.clone(),
        },
        private: PrivateKey {
            params: *params,
            h,
            f,
        },
    })
}

/// Runs `attempt` until it yields a value, giving up after a fixed number of
/// tries.
pub(crate) fn retry<T>(
    operation: &'static str,
    mut attempt: impl FnMut() -> Result<Option<T>>,
) -> Result<T> {
    for attempts in 1..=MAX_ATTEMPTS {
        if let Some(value) = attempt()? {
            if attempts > 1 {
                debug!("{operation}: succeeded after {attempts} attempts");
            }
            return Ok(value);
        }
    }
    Err(NtruError::RetriesExhausted {
        operation,
        attempts: MAX_ATTEMPTS,
    })
}
