// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::{BigUint, ModInverse};
use num_traits::{CheckedSub, One, Zero};

/// L(x) = (x - 1) / p
///
/// Defined only on the subgroup `x ≡ 1 (mod p)`, where the division is exact.
/// Returns `None` for any other `x`, or when `p` is zero.
#[inline]
pub fn l_function(x: &BigUint, p: &BigUint) -> Option<BigUint> {
    if p.is_zero() {
        return None;
    }

    let x_minus_1 = x.checked_sub(&BigUint::one())?;
    if !(&x_minus_1 % p).is_zero() {
        return None;
    }

    Some(x_minus_1 / p)
}

/// Computes modular inverse a⁻¹ mod b, if it exists.
pub fn mod_inverse(a: &BigUint, b: &BigUint) -> Option<BigUint> {
    if a.is_zero() {
        return None;
    }

    a.mod_inverse(b)?.to_biguint()
}
