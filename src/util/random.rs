// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Randomness consumed by the cryptosystem: prime search and uniform sampling.
//!
//! Every draw goes through [`RngCore::try_fill_bytes`], so an entropy source
//! that cannot produce output surfaces as [`Error::RandomSource`] instead of
//! a panic. Prime search uses:
//! - Candidates with the two top bits set, so that a product of two `k`-bit
//!   primes has exactly `2k` bits
//! - A sieve with small primes to reject bad candidates early
//! - Incremental search from a random odd starting point
//! - Miller-Rabin with a round count chosen from the bit length

use num_bigint_dig::BigUint;
use num_bigint_dig::prime::probably_prime;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::{Error, Result};

/// Small odd primes for sieving candidates before Miller-Rabin.
const SIEVE_PRIMES: &[u32] = &[
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307,
    311, 313, 317, 331, 337, 347, 349, 353, 359, 367, 373, 379, 383, 389, 397, 401, 409, 419, 421,
    431, 433, 439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509, 521, 523, 541, 547,
    557, 563, 569, 571, 577, 587, 593, 599, 601, 607, 613, 617, 619, 631, 641, 643, 647, 653, 659,
    661, 673, 677, 683, 691, 701, 709, 719, 727, 733, 739, 743, 751, 757, 761, 769, 773, 787, 797,
    809, 811, 821, 823, 827, 829, 839, 853, 857, 859, 863, 877, 881, 883, 887, 907, 911, 919, 929,
    937, 941, 947, 953, 967, 971, 977, 983, 991, 997,
];

/// Maximum increment steps before restarting with a new random base.
const MAX_INCREMENT: u32 = 1 << 16;

/// Minimum bit length accepted by [`random_prime`].
pub const MIN_PRIME_BITS: usize = 16;

/// A cryptographically secure source of big integers.
///
/// Implemented for every [`RngCore`] + [`CryptoRng`], e.g. `OsRng` or
/// `StdRng`.
pub trait RandomSource {
    /// Sample uniformly from `[0, bound)`.
    fn random_below(&mut self, bound: &BigUint) -> Result<BigUint>;

    /// Sample a random prime of exactly `bits` bits.
    fn random_prime(&mut self, bits: usize) -> Result<BigUint>;
}

impl<R: RngCore + CryptoRng + ?Sized> RandomSource for R {
    fn random_below(&mut self, bound: &BigUint) -> Result<BigUint> {
        random_below(self, bound)
    }

    fn random_prime(&mut self, bits: usize) -> Result<BigUint> {
        random_prime(self, bits)
    }
}

/// Uniform sample from `[0, bound)` by masked rejection sampling.
///
/// Each attempt succeeds with probability above 1/2. A zero bound is
/// rejected with [`Error::InvalidBound`].
pub fn random_below<R: RngCore + ?Sized>(rng: &mut R, bound: &BigUint) -> Result<BigUint> {
    if bound.is_zero() {
        return Err(Error::InvalidBound);
    }

    let bits = bound.bits();
    let mut bytes = vec![0u8; bits.div_ceil(8)];
    let excess = bytes.len() * 8 - bits;

    loop {
        rng.try_fill_bytes(&mut bytes)?;
        bytes[0] &= 0xffu8 >> excess;

        let candidate = BigUint::from_bytes_be(&bytes);
        if &candidate < bound {
            bytes.zeroize();
            return Ok(candidate);
        }
    }
}

/// Generate a random prime of exactly `bits` bits.
///
/// # Errors
///
/// Returns [`Error::InvalidKeySize`] if `bits < MIN_PRIME_BITS`, and
/// [`Error::RandomSource`] if the entropy source fails.
pub fn random_prime<R: RngCore + ?Sized>(rng: &mut R, bits: usize) -> Result<BigUint> {
    if bits < MIN_PRIME_BITS {
        return Err(Error::InvalidKeySize { min: MIN_PRIME_BITS, actual: bits });
    }

    let rounds = optimal_miller_rabin_rounds(bits);
    let mut bytes = vec![0u8; bits.div_ceil(8)];

    loop {
        let mut candidate = generate_candidate(rng, bits, &mut bytes)?;

        for _ in 0..MAX_INCREMENT {
            // walked past 2^bits
            if candidate.bits() != bits {
                break;
            }

            if !divisible_by_small_prime(&candidate) && probably_prime(&candidate, rounds) {
                bytes.zeroize();
                return Ok(candidate);
            }

            candidate += 2u32;
        }
    }
}

/// Draw a random odd candidate with the two most significant bits set.
fn generate_candidate<R: RngCore + ?Sized>(
    rng: &mut R,
    bits: usize,
    bytes: &mut [u8],
) -> Result<BigUint> {
    rng.try_fill_bytes(bytes)?;

    let excess = bytes.len() * 8 - bits;
    bytes[0] &= 0xffu8 >> excess;

    let mut candidate = BigUint::from_bytes_be(bytes);
    candidate |= BigUint::one() << (bits - 1);
    candidate |= BigUint::one() << (bits - 2);
    candidate |= BigUint::one();

    Ok(candidate)
}

/// Returns true if `n` is divisible by one of the sieve primes.
///
/// Candidates are always larger than every sieve prime.
#[inline]
fn divisible_by_small_prime(n: &BigUint) -> bool {
    SIEVE_PRIMES.iter().any(|&prime| (n % prime).is_zero())
}

/// Miller-Rabin rounds for an error probability below 2^-128.
///
/// Reference: FIPS 186-4 Table C.1
#[inline]
const fn optimal_miller_rabin_rounds(bits: usize) -> usize {
    match bits {
        0..=256 => 40,
        257..=512 => 15,
        513..=1024 => 10,
        1025..=2048 => 6,
        2049..=4096 => 4,
        _ => 3,
    }
}

/// Entropy source that always fails.
#[cfg(test)]
pub(crate) struct FailingRng;

#[cfg(test)]
impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        unreachable!("only try_fill_bytes is used")
    }

    fn next_u64(&mut self) -> u64 {
        unreachable!("only try_fill_bytes is used")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        unreachable!("only try_fill_bytes is used")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        Err(rand::Error::new("entropy source unavailable"))
    }
}

#[cfg(test)]
impl CryptoRng for FailingRng {}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use num_traits::ToPrimitive;
    use rand::SeedableRng;
    use rand::rngs::{OsRng, StdRng};

    #[test]
    fn generates_prime_with_exact_bit_length() {
        let mut rng = OsRng;

        for bits in [16, 64, 171, 256] {
            let p = random_prime(&mut rng, bits).unwrap();
            assert_eq!(p.bits(), bits, "wrong bit length for {bits}");
            assert!(probably_prime(&p, 20), "{p} is not prime");
        }
    }

    #[test]
    fn top_two_bits_are_set() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = random_prime(&mut rng, 128).unwrap();

        let floor = (BigUint::one() << 127) | (BigUint::one() << 126);
        assert!(p >= floor);
    }

    #[test]
    fn product_of_primes_has_double_bit_length() {
        let mut rng = OsRng;
        let p = random_prime(&mut rng, 96).unwrap();
        let q = random_prime(&mut rng, 96).unwrap();

        assert_eq!((&p * &q).bits(), 192);
    }

    #[test]
    fn rejects_small_bit_lengths() {
        let mut rng = OsRng;
        assert!(matches!(
            random_prime(&mut rng, 8),
            Err(Error::InvalidKeySize { min: MIN_PRIME_BITS, actual: 8 })
        ));
    }

    #[test]
    fn generated_primes_are_distinct() {
        let mut rng = OsRng;
        let p1 = random_prime(&mut rng, 128).unwrap();
        let p2 = random_prime(&mut rng, 128).unwrap();
        assert_ne!(p1, p2);
    }

    #[test]
    fn seeded_source_is_reproducible() {
        let a = random_prime(&mut StdRng::seed_from_u64(42), 128).unwrap();
        let b = random_prime(&mut StdRng::seed_from_u64(42), 128).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn random_below_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let bound = BigUint::from(1000u32);

        for _ in 0..500 {
            assert!(random_below(&mut rng, &bound).unwrap() < bound);
        }
    }

    #[test]
    fn random_below_covers_small_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let bound = BigUint::from(5u32);

        let mut seen = [false; 5];
        for _ in 0..200 {
            let v = random_below(&mut rng, &bound).unwrap();
            seen[v.to_usize().unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn random_below_rejects_zero_bound() {
        let mut rng = OsRng;
        assert_eq!(random_below(&mut rng, &BigUint::zero()), Err(Error::InvalidBound));
        assert_eq!(rng.random_below(&BigUint::zero()), Err(Error::InvalidBound));
    }

    #[test]
    fn failing_source_surfaces_error() {
        let bound = BigUint::from(1u32) << 64;

        assert!(matches!(random_below(&mut FailingRng, &bound), Err(Error::RandomSource(_))));
        assert!(matches!(random_prime(&mut FailingRng, 64), Err(Error::RandomSource(_))));
        assert!(matches!(FailingRng.random_prime(64), Err(Error::RandomSource(_))));
    }
}
