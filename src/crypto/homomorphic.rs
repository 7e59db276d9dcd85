// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Homomorphic;
use crate::ciphertext::Ciphertext;
use crate::error::Result;
use crate::keypair::PublicKey;
use crate::util::random::RandomSource;

use num_bigint_dig::BigUint;
use rand::{CryptoRng, RngCore};

impl Homomorphic for PublicKey {
    // E(m₁) · E(m₂) = E(m₁ + m₂)
    fn add_cipher(&self, c1: &Ciphertext, c2: &Ciphertext) -> Ciphertext {
        Ciphertext::new((c1.value() * c2.value()) % &self.n)
    }

    // E(m)^k = E(k · m)
    fn mul_cipher(&self, c: &Ciphertext, scalar: &BigUint) -> Ciphertext {
        Ciphertext::new(c.value().modpow(scalar, &self.n))
    }

    // E(m) · g^k = E(m + k)
    fn add_plain(&self, c: &Ciphertext, k: &BigUint) -> Ciphertext {
        let gk = self.g.modpow(k, &self.n);
        Ciphertext::new((c.value() * gk) % &self.n)
    }

    fn rerandomize_with_rng<R>(&self, c: &Ciphertext, rng: &mut R) -> Result<Ciphertext>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let r = rng.random_below(&self.n)?;
        let hr = self.h.modpow(&r, &self.n);
        Ok(Ciphertext::new((c.value() * hr) % &self.n))
    }
}
