// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Byte level encodings used by the protocol.
//!
//! Messages travel as trits: every 3 bits of the message buffer become 2
//! trits. Ring elements modulo q travel as big-endian `u16` values in
//! `[0, q)`.

use ntru_polynomial::{reduce_coefficients, Coefficient, Polynomial};

use crate::errors::{NtruError, Result};

fn digit_to_trit(digit: u8) -> Coefficient {
    match digit {
        0 => 0,
        1 => 1,
        _ => -1,
    }
}

fn trit_to_digit(trit: Coefficient) -> Option<u8> {
    match trit {
        0 => Some(0),
        1 => Some(1),
        -1 => Some(2),
        _ => None,
    }
}

/// Number of 3-bit groups needed to carry `byte_len` bytes.
fn group_count(byte_len: usize) -> usize {
    (byte_len * 8).div_ceil(3)
}

/// Encodes `bytes` into `n` trits, two trits per 3 bits, most significant bit
/// first. The final group is padded with zero bits and unused trits are zero.
///
/// Returns `None` if the bytes do not fit.
pub fn bits_to_trits(bytes: &[u8], n: usize) -> Option<Vec<Coefficient>> {
    let groups = group_count(bytes.len());
    if 2 * groups > n {
        return None;
    }

    let bit = |i: usize| -> u8 {
        bytes
            .get(i / 8)
            .map(|byte| (byte >> (7 - i % 8)) & 1)
            .unwrap_or(0)
    };

    let mut trits = vec![0; n];
    for group in 0..groups {
        let value = (bit(3 * group) << 2) | (bit(3 * group + 1) << 1) | bit(3 * group + 2);
        trits[2 * group] = digit_to_trit(value / 3);
        trits[2 * group + 1] = digit_to_trit(value % 3);
    }
    Some(trits)
}

/// Decodes `byte_len` bytes from trits written by [`bits_to_trits`].
///
/// Fails on the unused pair `(-1, -1)`, on non-zero padding bits and on
/// non-zero trits past the encoded groups.
pub fn trits_to_bits(trits: &[Coefficient], byte_len: usize) -> Result<Vec<u8>> {
    let groups = group_count(byte_len);
    if 2 * groups > trits.len() {
        return Err(NtruError::DecryptionFailure);
    }
    if trits[2 * groups..].iter().any(|t| *t != 0) {
        return Err(NtruError::DecryptionFailure);
    }

    let mut bytes = vec![0u8; byte_len];
    for group in 0..groups {
        let high = trit_to_digit(trits[2 * group]).ok_or(NtruError::DecryptionFailure)?;
        let low = trit_to_digit(trits[2 * group + 1]).ok_or(NtruError::DecryptionFailure)?;
        let value = 3 * high + low;
        if value > 7 {
            return Err(NtruError::DecryptionFailure);
        }

        for offset in 0..3 {
            let index = 3 * group + offset;
            let bit = (value >> (2 - offset)) & 1;
            match bytes.get_mut(index / 8) {
                Some(byte) => *byte |= bit << (7 - index % 8),
                None if bit != 0 => return Err(NtruError::DecryptionFailure),
                None => {}
            }
        }
    }
    Ok(bytes)
}

/// Packs a ring element as big-endian `u16` values in `[0, q)`.
pub fn pack_mod_q(poly: &Polynomial, q: Coefficient) -> Result<Vec<u8>> {
    let reduced = reduce_coefficients(poly.coefficients(), q)?;
    let mut bytes = Vec::with_capacity(2 * reduced.len());
    for value in reduced {
        let value = u16::try_from(value)
            .map_err(|_| NtruError::InvalidKey(format!("modulus {q} does not fit in 16 bits")))?;
        bytes.extend_from_slice(&value.to_be_bytes());
    }
    Ok(bytes)
}

/// Unpacks `n` big-endian `u16` values and maps them into `[-q/2, q/2)`.
///
/// Returns `None` if the length is wrong or a value is not below `q`.
pub fn unpack_mod_q(bytes: &[u8], n: usize, q: Coefficient) -> Option<Polynomial> {
    if bytes.len() != 2 * n {
        return None;
    }

    let coefficients = bytes
        .chunks_exact(2)
        .map(|pair| Coefficient::from(u16::from_be_bytes([pair[0], pair[1]])))
        .map(|value| (value < q).then_some(value))
        .collect::<Option<Vec<_>>>()?;
    Polynomial::new(coefficients).reduce_mod(q).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_bits_to_two_trits() {
        // 000 001 010 011 100 101 110 111
        let bytes = [0b0000_0101, 0b0011_1001, 0b0111_0111];
        let trits = bits_to_trits(&bytes, 16).unwrap();
        assert_eq!(
            trits,
            vec![0, 0, 0, 1, 0, -1, 1, 0, 1, 1, 1, -1, -1, 0, -1, 1]
        );
        assert_eq!(trits_to_bits(&trits, 3).unwrap(), bytes);
    }

    #[test]
    fn test_partial_group_is_zero_padded() {
        // 8 bits need three groups, the last one carries two data bits
        let trits = bits_to_trits(&[0xff], 7).unwrap();
        assert_eq!(trits, vec![-1, 1, -1, 1, -1, 0, 0]);
        assert_eq!(trits_to_bits(&trits, 1).unwrap(), vec![0xff]);
    }

    #[test]
    fn test_bits_to_trits_rejects_overflow() {
        assert!(bits_to_trits(&[0u8; 3], 15).is_none());
        assert!(bits_to_trits(&[0u8; 3], 16).is_some());
    }

    #[test]
    fn test_trits_to_bits_rejects_invalid_pair() {
        let mut trits = bits_to_trits(&[0x12, 0x34], 12).unwrap();
        trits[2] = -1;
        trits[3] = -1;
        assert!(matches!(
            trits_to_bits(&trits, 2),
            Err(NtruError::DecryptionFailure)
        ));
    }

    #[test]
    fn test_trits_to_bits_rejects_dirty_tail() {
        let mut trits = bits_to_trits(&[0xab], 8).unwrap();
        trits[7] = 1;
        assert!(trits_to_bits(&trits, 1).is_err());

        // the third group of a single byte only has two data bits
        let mut trits = bits_to_trits(&[0x00], 6).unwrap();
        trits[5] = 1;
        assert!(trits_to_bits(&trits, 1).is_err());
    }

    #[test]
    fn test_pack_mod_q() {
        let poly = Polynomial::new(vec![-1, 0, 1023, -1024]);
        let bytes = pack_mod_q(&poly, 2048).unwrap();
        assert_eq!(bytes, vec![0x07, 0xff, 0x00, 0x00, 0x03, 0xff, 0x04, 0x00]);
        assert_eq!(unpack_mod_q(&bytes, 4, 2048).unwrap(), poly);
    }

    #[test]
    fn test_unpack_mod_q_rejects_bad_input() {
        assert!(unpack_mod_q(&[0, 1, 0], 2, 2048).is_none());
        assert!(unpack_mod_q(&[0x08, 0x00, 0, 0], 2, 2048).is_none());
    }
}
