// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Deterministic and random sources of ternary polynomials.

use ntru_polynomial::{Coefficient, Polynomial};
use rand::{seq::index, CryptoRng, RngCore};
use sha2::{Digest, Sha256};

/// SHA-256 in counter mode: block `i` is `SHA-256(seed || i)` with `i` as a
/// big-endian `u32`.
struct HashStream<'a> {
    seed: &'a [u8],
    counter: u32,
    block: Vec<u8>,
    position: usize,
}

impl<'a> HashStream<'a> {
    fn new(seed: &'a [u8]) -> Self {
        Self {
            seed,
            counter: 0,
            block: Vec::new(),
            position: 0,
        }
    }

    fn next_byte(&mut self) -> u8 {
        if self.position == self.block.len() {
            let mut hasher = Sha256::new();
            hasher.update(self.seed);
            hasher.update(self.counter.to_be_bytes());
            self.block = hasher.finalize().to_vec();
            self.counter = self.counter.wrapping_add(1);
            self.position = 0;
        }
        let byte = self.block[self.position];
        self.position += 1;
        byte
    }
}

/// Mask generation: expands `seed` into `n` trits.
///
/// Every byte below 243 = 3^5 yields five base-3 digits, least significant
/// first, mapped 0 -> 0, 1 -> 1, 2 -> -1. Larger bytes are skipped.
pub fn mgf(seed: &[u8], n: usize) -> Polynomial {
    let mut stream = HashStream::new(seed);
    let mut trits = Vec::with_capacity(n + 4);
    while trits.len() < n {
        let mut byte = stream.next_byte();
        if byte >= 243 {
            continue;
        }
        for _ in 0..5 {
            trits.push(match byte % 3 {
                0 => 0,
                1 => 1,
                _ => -1,
            });
            byte /= 3;
        }
    }
    trits.truncate(n);
    Polynomial::new(trits)
}

/// Index generation: reads the hash stream of `seed` as `c`-bit big-endian
/// integers and turns them into ring positions without modulo bias.
pub struct IndexGenerator<'a> {
    stream: HashStream<'a>,
    n: usize,
    c: u32,
    limit: u64,
    accumulator: u64,
    available: u32,
}

impl<'a> IndexGenerator<'a> {
    /// `c` must be in `1..=31` with `2^c >= n`.
    pub fn new(seed: &'a [u8], n: usize, c: u32) -> Self {
        let range = 1u64 << c;
        let n64 = n as u64;
        Self {
            stream: HashStream::new(seed),
            n,
            c,
            limit: range - range % n64,
            accumulator: 0,
            available: 0,
        }
    }

    fn next_value(&mut self) -> u64 {
        while self.available < self.c {
            self.accumulator = (self.accumulator << 8) | u64::from(self.stream.next_byte());
            self.available += 8;
        }
        self.available -= self.c;
        let value = (self.accumulator >> self.available) & ((1u64 << self.c) - 1);
        self.accumulator &= (1u64 << self.available) - 1;
        value
    }

    /// Next index in `[0, n)`.
    pub fn next_index(&mut self) -> usize {
        loop {
            let value = self.next_value();
            if value < self.limit {
                return (value % self.n as u64) as usize;
            }
        }
    }
}

/// Derives the blinding polynomial from `seed`: `d` coefficients equal to +1
/// followed by `d` coefficients equal to -1, at distinct positions.
pub fn blinding_polynomial(seed: &[u8], n: usize, c: u32, d: usize) -> Polynomial {
    let mut generator = IndexGenerator::new(seed, n, c);
    let mut coefficients = vec![0; n];
    for sign in [1, -1] {
        let mut placed = 0;
        while placed < d {
            let index = generator.next_index();
            if coefficients[index] == 0 {
                coefficients[index] = sign;
                placed += 1;
            }
        }
    }
    Polynomial::new(coefficients)
}

/// Samples a ternary polynomial with `plus` coefficients equal to +1 and
/// `minus` equal to -1 at uniformly random positions.
pub fn random_ternary<R: RngCore + CryptoRng>(
    rng: &mut R,
    n: usize,
    plus: usize,
    minus: usize,
) -> Polynomial {
    let mut coefficients: Vec<Coefficient> = vec![0; n];
    for (i, position) in index::sample(rng, n, plus + minus).into_iter().enumerate() {
        coefficients[position] = if i < plus { 1 } else { -1 };
    }
    Polynomial::new(coefficients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn count(poly: &Polynomial, value: Coefficient) -> usize {
        poly.coefficients().iter().filter(|c| **c == value).count()
    }

    #[test]
    fn test_mgf_is_deterministic_and_trinary() {
        let mask = mgf(b"seed", 401);
        assert_eq!(mask.ring_degree(), 401);
        assert_eq!(mask, mgf(b"seed", 401));
        assert_ne!(mask, mgf(b"seee", 401));
        assert!(mask.coefficients().iter().all(|c| (-1..=1).contains(c)));
        // a uniform mask uses every trit value
        for value in [-1, 0, 1] {
            assert!(count(&mask, value) > 80);
        }
    }

    #[test]
    fn test_mgf_prefix_is_stable() {
        let short = mgf(b"prefix", 10);
        let long = mgf(b"prefix", 600);
        assert_eq!(short.coefficients(), &long.coefficients()[..10]);
    }

    #[test]
    fn test_index_generator_reads_c_bits() {
        let mut generator = IndexGenerator::new(b"abc", 1 << 12, 12);
        let mut stream = HashStream::new(b"abc");
        let bytes: Vec<u8> = (0..3).map(|_| stream.next_byte()).collect();
        let first = (usize::from(bytes[0]) << 4) | usize::from(bytes[1] >> 4);
        let second = (usize::from(bytes[1] & 0x0f) << 8) | usize::from(bytes[2]);
        // n = 2^12 accepts every value
        assert_eq!(generator.next_index(), first);
        assert_eq!(generator.next_index(), second);
    }

    #[test]
    fn test_index_generator_stays_in_range() {
        let mut generator = IndexGenerator::new(b"range", 401, 11);
        for _ in 0..5000 {
            assert!(generator.next_index() < 401);
        }
    }

    #[test]
    fn test_blinding_polynomial() {
        let r = blinding_polynomial(b"sData", 401, 11, 113);
        assert_eq!(count(&r, 1), 113);
        assert_eq!(count(&r, -1), 113);
        assert_eq!(count(&r, 0), 401 - 226);
        assert_eq!(r, blinding_polynomial(b"sData", 401, 11, 113));
    }

    #[test]
    fn test_random_ternary() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let g = random_ternary(&mut rng, 449, 149, 148);
        assert_eq!(count(&g, 1), 149);
        assert_eq!(count(&g, -1), 148);
        assert_eq!(count(&g, 0), 449 - 297);
    }
}
