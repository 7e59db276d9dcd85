// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Decrypt, util};
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keypair::PrivateKey;

use num_bigint_dig::BigUint;
use num_traits::Zero;

impl Decrypt for PrivateKey {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<BigUint> {
        let c = ciphertext.value();
        if c.is_zero() || c >= self.public_key.n() {
            return Err(Error::InvalidCiphertext);
        }

        // m = L(c^(p-1) mod p²) · L(g^(p-1) mod p²)⁻¹ mod p
        //
        // Working modulo p² instead of n is enough because m < p.
        let c_p = c.modpow(&self.p_minus_1, &self.p_squared);

        // c_p ≢ 1 (mod p) only when p divides c, which no encryption produces
        let l_c_p = util::l_function(&c_p, &self.p).ok_or(Error::InvalidCiphertext)?;

        Ok((l_c_p * &self.trapdoor.inv_l_g_p) % &self.p)
    }
}
