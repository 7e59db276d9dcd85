// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Okamoto-Uchiyama Cryptosystem
//!
//! Probabilistic public-key encryption with additive homomorphism, based on
//! the hardness of factoring n = p²q.
//!
//! Reference: [Okamoto & Uchiyama (1998), EUROCRYPT](https://link.springer.com/chapter/10.1007/BFb0054135)
//!
//! ## Homomorphism
//!
//! Multiplying two ciphertexts adds their plaintexts, raising a ciphertext to
//! a public power multiplies its plaintext. Plaintext arithmetic wraps modulo
//! the secret prime p. See [`Homomorphic`].
//!
//! ## Message space
//!
//! Plaintexts live in `[0, p)`. Since p is secret, encryption under a
//! [`PublicKey`] accepts messages of at most
//! [`PublicKey::max_message_bits`] bits; the [`PrivateKey`] holder may use
//! the full range.
//!
//! ## Security
//!
//! The private key (p, q and the decryption trapdoor) is zeroized on drop via
//! the `zeroize` crate. Operations are not constant-time.
//!
//! ## Example
//!
//! ```rust,no_run
//! use oucrypt::{BigUint, Decrypt, Encrypt, Homomorphic, KeyPair};
//!
//! let keypair = KeyPair::generate_with_size(2048).expect("key generation failed");
//! let pk = keypair.public_key();
//!
//! let a = pk.encrypt(15u32.to_be_bytes()).expect("encryption failed");
//! let b = pk.encrypt(20u32.to_be_bytes()).expect("encryption failed");
//!
//! let sum = pk.add_cipher(&a, &b);
//! let twice = pk.mul_cipher(&a, &BigUint::from(2u32));
//!
//! assert_eq!(keypair.decrypt(&sum).unwrap(), BigUint::from(35u32));
//! assert_eq!(keypair.decrypt(&twice).unwrap(), BigUint::from(30u32));
//! ```

mod ciphertext;
mod crypto;
mod error;
mod keypair;
mod util;

pub use ciphertext::*;
pub use crypto::{Decrypt, Encrypt, Homomorphic};
pub use error::*;
pub use keypair::*;
pub use util::random::{MIN_PRIME_BITS, RandomSource};

pub use num_bigint_dig::BigUint;
