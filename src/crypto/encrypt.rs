// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Encrypt;
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keypair::{PrivateKey, PublicKey};
use crate::util::random::RandomSource;

use num_bigint_dig::BigUint;
use rand::{CryptoRng, RngCore};

impl Encrypt for PublicKey {
    fn encrypt_with_rng<P, R>(&self, plaintext: P, rng: &mut R) -> Result<Ciphertext>
    where
        P: AsRef<[u8]>,
        R: RngCore + CryptoRng + ?Sized,
    {
        let m = BigUint::from_bytes_be(plaintext.as_ref());

        let max_bits = self.max_message_bits();
        if m.bits() > max_bits {
            return Err(Error::MessageOutOfRange { max_bits, actual_bits: m.bits() });
        }

        encrypt_value(self, &m, rng)
    }
}

/// The key holder knows `p`, so the whole message space `[0, p)` is usable.
impl Encrypt for PrivateKey {
    fn encrypt_with_rng<P, R>(&self, plaintext: P, rng: &mut R) -> Result<Ciphertext>
    where
        P: AsRef<[u8]>,
        R: RngCore + CryptoRng + ?Sized,
    {
        let m = BigUint::from_bytes_be(plaintext.as_ref());
        if m >= self.p {
            return Err(Error::MessageOutOfRange {
                max_bits: self.p.bits(),
                actual_bits: m.bits(),
            });
        }

        encrypt_value(&self.public_key, &m, rng)
    }
}

/// c = g^m · h^r mod n, with r uniform in [0, n).
fn encrypt_value<R>(pub_key: &PublicKey, m: &BigUint, rng: &mut R) -> Result<Ciphertext>
where
    R: RandomSource + ?Sized,
{
    let n = &pub_key.n;
    let r = rng.random_below(n)?;

    let gm = pub_key.g.modpow(m, n);
    let hr = pub_key.h.modpow(&r, n);

    Ok(Ciphertext::new((gm * hr) % n))
}
