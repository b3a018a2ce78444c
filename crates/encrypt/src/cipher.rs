// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use ntru_params::KeyParams;
use ntru_polynomial::{Coefficient, Polynomial};
use rand::{CryptoRng, RngCore};
use tracing::{debug, instrument};
use zeroize::{Zeroize, Zeroizing};

use crate::encoding::{bits_to_trits, pack_mod_q, trits_to_bits, unpack_mod_q};
use crate::errors::{NtruError, Result};
use crate::generators::{blinding_polynomial, mgf};
use crate::keys::{retry, PrivateKey, PublicKey};

/// Trinary values recenter into `[-1, 2)`.
const TRIT_CENTER: Coefficient = -1;

/// Total length of the message buffer `salt || len || msg || padding`.
fn buffer_len(params: &KeyParams) -> usize {
    params.salt_len() + 1 + params.max_msg_len_bytes
}

/// Seed of the blinding polynomial: `OID || msg || salt || htrunc`.
fn blinding_seed(
    params: &KeyParams,
    msg: &[u8],
    salt: &[u8],
    packed_h: &[u8],
) -> Zeroizing<Vec<u8>> {
    let htrunc = &packed_h[..params.salt_len().min(packed_h.len())];
    let mut seed = Zeroizing::new(Vec::with_capacity(3 + msg.len() + salt.len() + htrunc.len()));
    seed.extend_from_slice(&params.oid);
    seed.extend_from_slice(msg);
    seed.extend_from_slice(salt);
    seed.extend_from_slice(htrunc);
    seed
}

/// `R = r * h (mod q)` for the blinding polynomial derived from `seed`.
fn blinded_key(params: &KeyParams, h: &Polynomial, seed: &[u8]) -> Result<Polynomial> {
    let r = blinding_polynomial(seed, params.n, params.c, params.dr);
    Ok(r.convolution_mod(h, params.q)?)
}

/// Every trit value must occur at least `dm0` times.
fn has_enough_of_each_trit(m: &Polynomial, dm0: usize) -> bool {
    [-1, 0, 1]
        .iter()
        .all(|value| m.coefficients().iter().filter(|c| *c == value).count() >= dm0)
}

impl PublicKey {
    /// Largest message this key can encrypt.
    pub fn max_msg_len(&self) -> usize {
        self.params.max_msg_len_bytes
    }

    /// Encrypts `msg` and returns the packed ciphertext.
    ///
    /// A fresh salt is drawn until the masked message carries at least `dm0`
    /// of each trit value.
    ///
    /// # Errors
    ///
    /// Returns `NtruError::MessageTooLong` if `msg` exceeds
    /// [`PublicKey::max_msg_len`].
    #[instrument(skip_all, fields(n = self.params.n, len = msg.len()))]
    pub fn encrypt<R: RngCore + CryptoRng>(&self, msg: &[u8], rng: &mut R) -> Result<Vec<u8>> {
        let params = &self.params;
        if msg.len() > params.max_msg_len_bytes {
            return Err(NtruError::MessageTooLong {
                len: msg.len(),
                max: params.max_msg_len_bytes,
            });
        }

        let packed_h = pack_mod_q(&self.h, params.q)?;
        let salt_len = params.salt_len();

        let e = retry("draw a balanced masked message", || {
            let mut buffer = Zeroizing::new(vec![0u8; buffer_len(params)]);
            rng.fill_bytes(&mut buffer[..salt_len]);
            // max_msg_len_bytes never exceeds u8::MAX
            buffer[salt_len] = msg.len() as u8;
            buffer[salt_len + 1..salt_len + 1 + msg.len()].copy_from_slice(msg);

            let mut m_trin = bits_to_trits(&buffer, params.n)
                .map(Polynomial::new)
                .ok_or_else(|| NtruError::InvalidKey("message buffer exceeds N trits".into()))?;

            let seed = blinding_seed(params, msg, &buffer[..salt_len], &packed_h);
            let big_r = blinded_key(params, &self.h, &seed)?;
            let mask = mgf(&pack_mod_q(&big_r, params.q)?, params.n);

            let m_prime = m_trin.add_and_recenter(&mask, params.p, TRIT_CENTER)?;
            m_trin.zeroize();
            if !has_enough_of_each_trit(&m_prime, params.dm0) {
                debug!("masked message is unbalanced, redrawing the salt");
                return Ok(None);
            }

            Ok(Some(big_r.add_mod(&m_prime, params.q)?))
        })?;

        pack_mod_q(&e, params.q)
    }
}

impl PrivateKey {
    /// Decrypts a ciphertext produced by [`PublicKey::encrypt`].
    ///
    /// Every failure, whether malformed input, a wrong key or tampering, is
    /// reported as `NtruError::DecryptionFailure`.
    #[instrument(skip_all, fields(n = self.params.n))]
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.try_decrypt(ciphertext).map_err(|e| {
            debug!("decryption rejected: {e}");
            NtruError::DecryptionFailure
        })
    }

    fn try_decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let params = &self.params;
        let e = unpack_mod_q(ciphertext, params.n, params.q).ok_or(NtruError::DecryptionFailure)?;

        let mut a = self.f.convolution_mod(&e, params.q)?;
        a.recenter_mod_q(params.p, TRIT_CENTER)?;
        let m_prime = a;
        if !has_enough_of_each_trit(&m_prime, params.dm0) {
            return Err(NtruError::DecryptionFailure);
        }

        let big_r = e.subtract_mod(&m_prime, params.q)?;
        let mask = mgf(&pack_mod_q(&big_r, params.q)?, params.n);
        let mut m_trin = m_prime.subtract_and_recenter(&mask, params.p, TRIT_CENTER)?;

        let buffer = Zeroizing::new(trits_to_bits(m_trin.coefficients(), buffer_len(params))?);
        m_trin.zeroize();

        let salt_len = params.salt_len();
        let salt = &buffer[..salt_len];
        let len = usize::from(buffer[salt_len]);
        if len > params.max_msg_len_bytes {
            return Err(NtruError::DecryptionFailure);
        }
        let msg = &buffer[salt_len + 1..salt_len + 1 + len];
        if buffer[salt_len + 1 + len..].iter().any(|b| *b != 0) {
            return Err(NtruError::DecryptionFailure);
        }

        let packed_h = pack_mod_q(&self.h, params.q)?;
        let seed = blinding_seed(params, msg, salt, &packed_h);
        if blinded_key(params, &self.h, &seed)? != big_r {
            return Err(NtruError::DecryptionFailure);
        }

        Ok(msg.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{generate_key_pair, KeyPair};
    use ntru_params::NtruPreset;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn setup(preset: NtruPreset) -> (KeyPair, ChaCha20Rng) {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let pair = generate_key_pair(&preset.params(), &mut rng).unwrap();
        (pair, rng)
    }

    #[test]
    fn test_encrypt_decrypt() {
        let (pair, mut rng) = setup(NtruPreset::Ees401Ep1);
        let ct = pair.public.encrypt(b"test message", &mut rng).unwrap();
        assert_eq!(ct.len(), 2 * 401);
        assert_eq!(pair.private.decrypt(&ct).unwrap(), b"test message");
    }

    #[test]
    fn test_empty_and_full_messages() {
        let (pair, mut rng) = setup(NtruPreset::Ees401Ep1);

        let ct = pair.public.encrypt(b"", &mut rng).unwrap();
        assert_eq!(pair.private.decrypt(&ct).unwrap(), Vec::<u8>::new());

        let msg = vec![0xa5; pair.public.max_msg_len()];
        let ct = pair.public.encrypt(&msg, &mut rng).unwrap();
        assert_eq!(pair.private.decrypt(&ct).unwrap(), msg);
    }

    #[test]
    fn test_encryption_is_randomized() {
        let (pair, mut rng) = setup(NtruPreset::Ees401Ep1);
        let a = pair.public.encrypt(b"same", &mut rng).unwrap();
        let b = pair.public.encrypt(b"same", &mut rng).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_message_too_long() {
        let (pair, mut rng) = setup(NtruPreset::Ees401Ep1);
        let msg = vec![0u8; 61];
        assert!(matches!(
            pair.public.encrypt(&msg, &mut rng),
            Err(NtruError::MessageTooLong { len: 61, max: 60 })
        ));
    }

    #[test]
    fn test_tampered_ciphertext_is_rejected() {
        let (pair, mut rng) = setup(NtruPreset::Ees401Ep1);
        let ct = pair.public.encrypt(b"integrity", &mut rng).unwrap();

        let mut tampered = ct.clone();
        // bump one coefficient by one, staying below q
        tampered[1] ^= 1;
        assert!(matches!(
            pair.private.decrypt(&tampered),
            Err(NtruError::DecryptionFailure)
        ));

        assert!(matches!(
            pair.private.decrypt(&ct[..ct.len() - 2]),
            Err(NtruError::DecryptionFailure)
        ));

        let mut out_of_range = ct;
        out_of_range[0] = 0xff;
        assert!(pair.private.decrypt(&out_of_range).is_err());
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let (pair, mut rng) = setup(NtruPreset::Ees401Ep1);
        let other = generate_key_pair(&NtruPreset::Ees401Ep1.params(), &mut rng).unwrap();
        let ct = pair.public.encrypt(b"for pair only", &mut rng).unwrap();
        assert!(matches!(
            other.private.decrypt(&ct),
            Err(NtruError::DecryptionFailure)
        ));
    }

    #[test]
    fn test_masked_message_balance() {
        let balanced = Polynomial::new(vec![-1, 0, 1, -1, 0, 1]);
        assert!(has_enough_of_each_trit(&balanced, 2));
        assert!(!has_enough_of_each_trit(&balanced, 3));
    }
}
