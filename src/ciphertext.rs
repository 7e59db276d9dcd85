// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::ops::Deref;

use num_bigint_dig::BigUint;

/// An encrypted value `c ∈ [0, n)`.
///
/// A ciphertext carries no reference to the key it was produced under; it is
/// identified only by its numeric value modulo `n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    value: BigUint,
}

impl Ciphertext {
    pub fn new(value: BigUint) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn into_value(self) -> BigUint {
        self.value
    }

    /// Big-endian encoding of the ciphertext value.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.value.to_bytes_be()
    }

    /// Decode a ciphertext from big-endian bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(BigUint::from_bytes_be(bytes))
    }
}

impl Deref for Ciphertext {
    type Target = BigUint;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<BigUint> for Ciphertext {
    fn from(value: BigUint) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ciphertext_serialization() {
        let val = BigUint::from(0xDEADBEEFu64);
        let c = Ciphertext::new(val.clone());

        let bytes = c.to_bytes();
        let c_restored = Ciphertext::from_bytes(&bytes);

        assert_eq!(c, c_restored);
        assert_eq!(c_restored.value(), &val);
        assert_eq!(bytes, vec![0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn deref_exposes_integer() {
        let c = Ciphertext::from(BigUint::from(255u32));
        assert_eq!(c.bits(), 8);
        assert_eq!(c.into_value(), BigUint::from(255u32));
    }
}
