// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use ntru_polynomial::{Coefficient, Polynomial};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn arb_coefficients(n: usize) -> impl Strategy<Value = Vec<Coefficient>> {
    prop::collection::vec(-5000i64..5000, n)
}

fn arb_pair() -> impl Strategy<Value = (Vec<Coefficient>, Vec<Coefficient>)> {
    (1usize..48).prop_flat_map(|n| (arb_coefficients(n), arb_coefficients(n)))
}

fn naive_convolution(a: &[Coefficient], b: &[Coefficient]) -> Vec<Coefficient> {
    let n = a.len();
    (0..n)
        .map(|k| (0..n).map(|i| a[i] * b[(k + n - i) % n]).sum())
        .collect()
}

fn hash_of(poly: &Polynomial) -> u64 {
    let mut hasher = DefaultHasher::new();
    poly.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    #[test]
    fn identity_convolution(a in (1usize..64).prop_flat_map(arb_coefficients)) {
        let poly = Polynomial::new(a.clone());
        let one = Polynomial::one(a.len());
        prop_assert_eq!(poly.convolution(&one).unwrap(), poly);
    }

    #[test]
    fn convolution_by_x_rotates(a in (1usize..64).prop_flat_map(arb_coefficients)) {
        let n = a.len();
        let rotated = Polynomial::new(a.clone()).convolution(&Polynomial::monomial(n, 1)).unwrap();
        for i in 0..n {
            prop_assert_eq!(rotated.coefficients()[(i + 1) % n], a[i]);
        }
    }

    #[test]
    fn convolution_matches_double_sum((a, b) in arb_pair()) {
        let expected = naive_convolution(&a, &b);
        let product = Polynomial::new(a).convolution(&Polynomial::new(b)).unwrap();
        prop_assert_eq!(product.coefficients(), expected.as_slice());
    }

    #[test]
    fn convolution_is_commutative((a, b) in arb_pair()) {
        let a = Polynomial::new(a);
        let b = Polynomial::new(b);
        prop_assert_eq!(a.convolution(&b).unwrap(), b.convolution(&a).unwrap());
    }

    #[test]
    fn convolution_mod_reduces_raw_product((a, b) in arb_pair(), log_q in 1u32..13) {
        let q = 1i64 << log_q;
        let a = Polynomial::new(a);
        let b = Polynomial::new(b);
        let raw = a.convolution(&b).unwrap();
        let reduced = a.convolution_mod(&b, q).unwrap();
        prop_assert_eq!(raw.reduce_mod(q).unwrap(), reduced.clone());
        for c in reduced.coefficients() {
            prop_assert!(-q / 2 <= *c && *c < q / 2);
        }
    }

    #[test]
    fn recenter_window_correctness(
        values in prop::collection::vec(any::<i64>(), 1..32),
        m in 1i64..5000,
        center in -5000i64..5000,
    ) {
        let mut poly = Polynomial::from_slice(&values);
        poly.recenter_mod_q(m, center).unwrap();
        for (r, v) in poly.coefficients().iter().zip(values.iter()) {
            prop_assert!(center <= *r && *r < center + m);
            prop_assert_eq!((*r as i128 - *v as i128).rem_euclid(m as i128), 0);
        }
    }

    #[test]
    fn recenter_is_idempotent(
        values in prop::collection::vec(-100000i64..100000, 1..32),
        m in 1i64..5000,
        center in -5000i64..5000,
    ) {
        let mut once = Polynomial::new(values);
        once.recenter_mod_q(m, center).unwrap();
        let mut twice = once.clone();
        twice.recenter_mod_q(m, center).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn add_then_subtract_is_identity_mod_q((a, b) in arb_pair(), log_q in 1u32..13) {
        let q = 1i64 << log_q;
        let a = Polynomial::new(a);
        let b = Polynomial::new(b);
        let round_trip = a.add_mod(&b, q).unwrap().subtract_mod(&b, q).unwrap();
        prop_assert_eq!(round_trip, a.reduce_mod(q).unwrap());
    }

    #[test]
    fn add_and_recenter_leaves_operands(
        (a, b) in arb_pair(),
        center in -3i64..1,
    ) {
        let left = Polynomial::new(a.clone());
        let right = Polynomial::new(b.clone());
        let sum = left.add_and_recenter(&right, 3, center).unwrap();
        let back = sum.subtract_and_recenter(&right, 3, center).unwrap();
        let mut expected = left.clone();
        expected.recenter_mod_q(3, center).unwrap();
        prop_assert_eq!(back, expected);
        prop_assert_eq!(left.coefficients(), a.as_slice());
        prop_assert_eq!(right.coefficients(), b.as_slice());
    }

    #[test]
    fn flipping_a_coefficient_breaks_equality(
        a in (1usize..64).prop_flat_map(arb_coefficients),
        index in any::<prop::sample::Index>(),
    ) {
        let original = Polynomial::new(a.clone());
        let copy = Polynomial::new(a.clone());
        prop_assert_eq!(&original, &copy);
        prop_assert_eq!(hash_of(&original), hash_of(&copy));

        let mut changed = a;
        let i = index.index(changed.len());
        changed[i] += 1;
        let changed = Polynomial::new(changed);
        prop_assert_ne!(&original, &changed);
        prop_assert_ne!(hash_of(&original), hash_of(&changed));
    }
}
