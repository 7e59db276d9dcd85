// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::util::{l_function, mod_inverse};
use crate::util::random::RandomSource;
use crate::{Error, Result};

/// Decryption trapdoor derived from the generator `g` and the secret prime `p`.
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub(crate) struct Trapdoor {
    /// g^(p-1) mod p²
    pub(crate) g_p: BigUint,

    /// L(g_p)⁻¹ mod p
    pub(crate) inv_l_g_p: BigUint,
}

/// Derive the trapdoor for generator `g`.
///
/// Returns `None` if `g` is unsuitable: either `g^(p-1) ≢ 1 (mod p)`
/// (p divides g) or `L(g^(p-1))` has no inverse modulo p
/// (g^(p-1) ≡ 1 (mod p²)).
pub(crate) fn compute_trapdoor(
    g: &BigUint,
    p: &BigUint,
    p_squared: &BigUint,
    p_minus_1: &BigUint,
) -> Option<Trapdoor> {
    let g_p = g.modpow(p_minus_1, p_squared);
    let l_g_p = l_function(&g_p, p)?;
    let inv_l_g_p = mod_inverse(&l_g_p, p)?;

    Some(Trapdoor { g_p, inv_l_g_p })
}

/// Sample a generator `g ∈ [0, n)` with a well-defined trapdoor.
///
/// Unsuitable candidates are resampled, at most `max_attempts` draws in total.
///
/// # Errors
///
/// [`Error::RandomSource`] if sampling fails, [`Error::TrapdoorConstruction`]
/// if every candidate was unsuitable.
pub(crate) fn find_generator<R: RandomSource + ?Sized>(
    rng: &mut R,
    n: &BigUint,
    p: &BigUint,
    p_squared: &BigUint,
    p_minus_1: &BigUint,
    max_attempts: usize,
) -> Result<(BigUint, Trapdoor)> {
    for attempt in 1..=max_attempts {
        let g = rng.random_below(n)?;

        if let Some(trapdoor) = compute_trapdoor(&g, p, p_squared, p_minus_1) {
            debug!(attempt, "selected generator");
            return Ok((g, trapdoor));
        }

        debug!(attempt, "generator has no trapdoor, resampling");
    }

    Err(Error::TrapdoorConstruction { attempts: max_attempts })
}
