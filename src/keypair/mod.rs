// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod util;

use util::Trapdoor;

use crate::ciphertext::Ciphertext;
use crate::crypto::util::mod_inverse;
use crate::error::{Error, Result};
use crate::util::random::RandomSource;
use crate::{Decrypt, Encrypt, Homomorphic};

use num_bigint_dig::BigUint;
use num_bigint_dig::prime::probably_prime;
use num_traits::{One, Zero};
use rand::rngs::{OsRng, StdRng};
use rand::{CryptoRng, RngCore, SeedableRng};
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Miller-Rabin rounds applied to externally supplied factors.
const IMPORT_PRIMALITY_ROUNDS: usize = 20;

/// Public parameters of the cryptosystem.
///
/// The modulus follows the form `n = p²q`. `g` is the generator and
/// `h = g^n mod n` the randomization base used during encryption. None of
/// these values reveal the factorization of `n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) n: BigUint,
    pub(crate) g: BigUint,
    pub(crate) h: BigUint,
    pub(crate) bit_length: usize,
}

impl PublicKey {
    /// Construct a new public key from its components.
    ///
    /// All parameters must be non-zero and strictly smaller than `n`, `g`
    /// must be a unit modulo `n`, `h` must equal `g^n mod n`, and `n` must
    /// have `bit_length` or `bit_length - 1` bits.
    pub fn new(n: BigUint, g: BigUint, h: BigUint, bit_length: usize) -> Result<Self> {
        if n.is_zero() || g.is_zero() || h.is_zero() {
            return Err(Error::InvalidPublicKey);
        }
        if g >= n || h >= n {
            return Err(Error::InvalidPublicKey);
        }
        if n.bits() > bit_length || n.bits() + 1 < bit_length {
            return Err(Error::InvalidPublicKey);
        }
        if mod_inverse(&g, &n).is_none() {
            return Err(Error::InvalidPublicKey);
        }
        if g.modpow(&n, &n) != h {
            return Err(Error::InvalidPublicKey);
        }

        Ok(Self { n, g, h, bit_length })
    }

    /// Return the public modulus `n`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Return the generator `g`.
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Return the randomization base `h`.
    pub fn h(&self) -> &BigUint {
        &self.h
    }

    /// Return the requested bit length of the modulus.
    pub fn bit_length(&self) -> usize {
        self.bit_length
    }

    /// Largest message size, in bits, accepted by public-key encryption.
    ///
    /// The true message space is `[0, p)` with `p` secret. Generated keys
    /// give `p` exactly `bit_length / 3` bits, and `n` never has more than
    /// `bit_length` bits, so every message of at most `|n| / 3 - 1` bits is
    /// strictly smaller than `p`. The bound is taken from `n` itself so an
    /// overstated `bit_length` cannot widen it.
    pub fn max_message_bits(&self) -> usize {
        (self.n.bits() / 3).saturating_sub(1)
    }
}

/// Secret key material.
///
/// Embeds the matching [`PublicKey`] and adds the factorization of `n` and
/// the decryption trapdoor. Sensitive fields are zeroized on drop.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct PrivateKey {
    #[zeroize(skip)]
    pub(crate) public_key: PublicKey,
    pub(crate) p: BigUint,
    pub(crate) q: BigUint,
    pub(crate) p_minus_1: BigUint,
    pub(crate) p_squared: BigUint,
    pub(crate) trapdoor: Trapdoor,
}

impl PrivateKey {
    /// Construct a private key from its components.
    ///
    /// Validates that the provided factors are distinct primes reconstructing
    /// the public modulus and that the public generator yields a usable
    /// trapdoor.
    pub fn new(public_key: PublicKey, p: BigUint, q: BigUint) -> Result<Self> {
        if p.is_zero() || q.is_zero() || p == q {
            return Err(Error::InvalidPrivateKey);
        }
        if !probably_prime(&p, IMPORT_PRIMALITY_ROUNDS)
            || !probably_prime(&q, IMPORT_PRIMALITY_ROUNDS)
        {
            return Err(Error::InvalidPrivateKey);
        }
        if p.bits() <= public_key.max_message_bits() {
            return Err(Error::InvalidPrivateKey);
        }

        let p_squared = &p * &p;
        if &p_squared * &q != *public_key.n() {
            return Err(Error::InvalidPrivateKey);
        }

        let p_minus_1 = &p - BigUint::one();
        let trapdoor = util::compute_trapdoor(public_key.g(), &p, &p_squared, &p_minus_1)
            .ok_or(Error::InvalidPrivateKey)?;

        Ok(Self::from_parts(public_key, p, q, p_squared, p_minus_1, trapdoor))
    }

    pub(crate) fn from_parts(
        public_key: PublicKey,
        p: BigUint,
        q: BigUint,
        p_squared: BigUint,
        p_minus_1: BigUint,
        trapdoor: Trapdoor,
    ) -> Self {
        Self { public_key, p, q, p_minus_1, p_squared, trapdoor }
    }

    /// Return a reference to the associated public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

/// A complete key pair consisting of public and private components.
///
/// Secret material is zeroized when dropped.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct KeyPair {
    #[zeroize(skip)]
    public: PublicKey,
    secret: PrivateKey,
}

impl KeyPair {
    /// Generate a key pair with default parameters (2048-bit modulus).
    pub fn generate() -> Result<Self> {
        KeyPairBuilder::new().build()
    }

    /// Generate a key pair with a custom modulus size.
    pub fn generate_with_size(bit_length: usize) -> Result<Self> {
        KeyPairBuilder::new().bit_length(bit_length).build()
    }

    /// Generate a key pair drawing all randomness from `rng`.
    pub fn generate_with_rng<R>(rng: &mut R, bit_length: usize) -> Result<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        KeyPairBuilder::new().bit_length(bit_length).build_with_rng(rng)
    }

    /// Return the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Return the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.secret
    }
}

/// Generate an Okamoto-Uchiyama key pair whose modulus has about
/// `bit_length` bits.
pub fn generate_key<R>(rng: &mut R, bit_length: usize) -> Result<KeyPair>
where
    R: RngCore + CryptoRng + ?Sized,
{
    KeyPair::generate_with_rng(rng, bit_length)
}

impl Encrypt for KeyPair {
    fn encrypt_with_rng<P, R>(&self, plaintext: P, rng: &mut R) -> Result<Ciphertext>
    where
        P: AsRef<[u8]>,
        R: RngCore + CryptoRng + ?Sized,
    {
        self.public.encrypt_with_rng(plaintext, rng)
    }
}

impl Decrypt for KeyPair {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<BigUint> {
        self.secret.decrypt(ciphertext)
    }
}

impl Homomorphic for KeyPair {
    fn add_cipher(&self, c1: &Ciphertext, c2: &Ciphertext) -> Ciphertext {
        self.public.add_cipher(c1, c2)
    }

    fn mul_cipher(&self, c: &Ciphertext, scalar: &BigUint) -> Ciphertext {
        self.public.mul_cipher(c, scalar)
    }

    fn add_plain(&self, c: &Ciphertext, k: &BigUint) -> Ciphertext {
        self.public.add_plain(c, k)
    }

    fn rerandomize_with_rng<R>(&self, c: &Ciphertext, rng: &mut R) -> Result<Ciphertext>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        self.public.rerandomize_with_rng(c, rng)
    }
}

/// Builder for generating key pairs with configurable parameters.
#[derive(Debug, Clone)]
pub struct KeyPairBuilder {
    bit_length: usize,
    generator_attempts: usize,
}

impl KeyPairBuilder {
    /// Minimum recommended for production (NIST/ENISA standard)
    pub const MIN_SECURE_BITS: usize = 2048;

    /// Absolute minimum enforced in production builds
    #[cfg(not(feature = "allow-weak-keys"))]
    pub const ABSOLUTE_MIN_BITS: usize = 512;

    #[cfg(feature = "allow-weak-keys")]
    pub const ABSOLUTE_MIN_BITS: usize = 128;

    /// Generators drawn before giving up on trapdoor construction.
    pub const DEFAULT_GENERATOR_ATTEMPTS: usize = 16;

    /// Create a builder with default parameters.
    pub fn new() -> Self {
        Self {
            bit_length: Self::MIN_SECURE_BITS,
            generator_attempts: Self::DEFAULT_GENERATOR_ATTEMPTS,
        }
    }

    /// Set the desired modulus bit length.
    pub fn bit_length(mut self, bits: usize) -> Self {
        self.bit_length = bits;
        self
    }

    /// Set how many generators may be sampled before key generation fails.
    pub fn generator_attempts(mut self, attempts: usize) -> Self {
        self.generator_attempts = attempts;
        self
    }

    /// Generate the key pair using the operating system's entropy source.
    pub fn build(self) -> Result<KeyPair> {
        self.build_with_rng(&mut OsRng)
    }

    /// Generate the key pair drawing all randomness from `rng`.
    ///
    /// The primes `p` and `q` are searched concurrently, each with its own
    /// generator seeded from `rng`. Both searches are joined before either
    /// result is used.
    pub fn build_with_rng<R>(self, rng: &mut R) -> Result<KeyPair>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        if self.bit_length < Self::ABSOLUTE_MIN_BITS {
            return Err(Error::InvalidKeySize {
                min: Self::ABSOLUTE_MIN_BITS,
                actual: self.bit_length,
            });
        }

        if self.bit_length < Self::MIN_SECURE_BITS {
            warn!(
                bit_length = self.bit_length,
                recommended = Self::MIN_SECURE_BITS,
                "generating a cryptographically weak key"
            );
        }

        // Modulus structure: n = p²q, so |n| = 2|p| + |q|.
        let p_bits = self.bit_length / 3;
        let q_bits = self.bit_length - 2 * p_bits;
        debug!(p_bits, q_bits, "searching for primes");

        let mut p_rng = StdRng::from_rng(&mut *rng)?;
        let mut q_rng = StdRng::from_rng(&mut *rng)?;

        let (p_result, q_result) =
            rayon::join(|| p_rng.random_prime(p_bits), || q_rng.random_prime(q_bits));

        let p = p_result?;
        let q = q_result?;

        if p == q {
            return Err(Error::KeyGenerationFailed("Primes must be distinct".into()));
        }

        let p_squared = &p * &p;
        let p_minus_1 = &p - BigUint::one();
        let n = &p_squared * &q;

        let (g, trapdoor) = util::find_generator(
            rng,
            &n,
            &p,
            &p_squared,
            &p_minus_1,
            self.generator_attempts,
        )?;
        let h = g.modpow(&n, &n);

        debug!(modulus_bits = n.bits(), "key pair generated");

        let public = PublicKey::new(n, g, h, self.bit_length)?;
        let secret =
            PrivateKey::from_parts(public.clone(), p, q, p_squared, p_minus_1, trapdoor);

        Ok(KeyPair { public, secret })
    }
}

impl Default for KeyPairBuilder {
    fn default() -> Self {
        Self::new()
    }
}
