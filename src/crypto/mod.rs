mod decrypt;
mod encrypt;
mod homomorphic;
pub(crate) mod util;

use crate::ciphertext::Ciphertext;
use crate::error::Result;

use num_bigint_dig::BigUint;
use num_traits::One;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

/// Encrypts a single plaintext.
pub trait Encrypt {
    /// Encrypt a plaintext, drawing the blinding factor from `rng`.
    ///
    /// The plaintext is interpreted as a big-endian unsigned integer and must
    /// lie in the key's message space, otherwise
    /// [`Error::MessageOutOfRange`](crate::Error::MessageOutOfRange) is
    /// returned.
    fn encrypt_with_rng<P, R>(&self, plaintext: P, rng: &mut R) -> Result<Ciphertext>
    where
        P: AsRef<[u8]>,
        R: RngCore + CryptoRng + ?Sized;

    /// Encrypt a plaintext using the operating system's entropy source.
    ///
    /// Encrypting the same plaintext twice yields different ciphertexts.
    fn encrypt<P: AsRef<[u8]>>(&self, plaintext: P) -> Result<Ciphertext> {
        self.encrypt_with_rng(plaintext, &mut OsRng)
    }
}

/// Recovers the plaintext of a ciphertext.
pub trait Decrypt {
    /// Recover the plaintext `m ∈ [0, p)` from a ciphertext `c ∈ (0, n)`.
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<BigUint>;
}

/// Additively homomorphic operations on ciphertexts.
///
/// These only need the public key and never learn the plaintexts. All
/// results are reduced modulo `n`; plaintext arithmetic wraps modulo the
/// secret prime `p`. There is no ciphertext-by-ciphertext multiplication.
pub trait Homomorphic {
    /// Returns a ciphertext of `(m₁ + m₂) mod p`.
    fn add_cipher(&self, c1: &Ciphertext, c2: &Ciphertext) -> Ciphertext;

    /// Returns a ciphertext of `(m · scalar) mod p`.
    fn mul_cipher(&self, c: &Ciphertext, scalar: &BigUint) -> Ciphertext;

    /// Returns a ciphertext of `(m + k) mod p` for a public constant `k`.
    fn add_plain(&self, c: &Ciphertext, k: &BigUint) -> Ciphertext;

    /// Returns a fresh-looking ciphertext of the same plaintext.
    fn rerandomize_with_rng<R>(&self, c: &Ciphertext, rng: &mut R) -> Result<Ciphertext>
    where
        R: RngCore + CryptoRng + ?Sized;

    /// Like [`rerandomize_with_rng`](Homomorphic::rerandomize_with_rng), with
    /// the operating system's entropy source.
    fn rerandomize(&self, c: &Ciphertext) -> Result<Ciphertext> {
        self.rerandomize_with_rng(c, &mut OsRng)
    }

    /// Homomorphic sum of any number of ciphertexts.
    ///
    /// Starts from `1`, the deterministic encryption of zero, so the result
    /// of an empty sum is not blinded. Rerandomize it before publishing.
    fn sum<'c, I>(&self, ciphertexts: I) -> Ciphertext
    where
        I: IntoIterator<Item = &'c Ciphertext>,
    {
        ciphertexts
            .into_iter()
            .fold(Ciphertext::new(BigUint::one()), |acc, c| self.add_cipher(&acc, c))
    }
}

#[cfg(test)]
mod test_encryption {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::error::Error;
    use crate::keypair::KeyPair;
    use crate::util::random::FailingRng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn create_test_keypair() -> KeyPair {
        KeyPair::generate_with_size(512).unwrap()
    }

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let keypair = create_test_keypair();
        let message = b"hello world!";

        let ciphertext = keypair.public_key().encrypt(message).unwrap();
        let plaintext = keypair.private_key().decrypt(&ciphertext).unwrap();

        assert_eq!(plaintext, BigUint::from_bytes_be(message));
        assert_eq!(plaintext.to_bytes_be(), message);
    }

    #[test]
    fn ciphertext_is_reduced() {
        let keypair = create_test_keypair();

        let ciphertext = keypair.encrypt(b"bounded").unwrap();
        assert!(ciphertext.value() < keypair.public_key().n());
    }

    #[test]
    fn probabilistic_encryption() {
        let keypair = create_test_keypair();
        let message = b"Hello world";

        let c1 = keypair.encrypt(message).unwrap();
        let c2 = keypair.encrypt(message).unwrap();

        // different random r values MUST produce different ciphertexts
        assert_ne!(c1.value(), c2.value());
        assert_eq!(keypair.decrypt(&c1).unwrap(), keypair.decrypt(&c2).unwrap());
    }

    #[test]
    fn seeded_encryption_is_deterministic() {
        let keypair = create_test_keypair();

        let c1 = keypair.encrypt_with_rng(b"seeded", &mut StdRng::seed_from_u64(9)).unwrap();
        let c2 = keypair.encrypt_with_rng(b"seeded", &mut StdRng::seed_from_u64(9)).unwrap();

        assert_eq!(c1, c2);
    }

    #[test]
    fn zero_message() {
        let keypair = create_test_keypair();

        for encoding in [&b""[..], &[0u8][..], &[0u8, 0, 0][..]] {
            let c = keypair.encrypt(encoding).unwrap();
            assert_eq!(keypair.decrypt(&c).unwrap(), BigUint::from(0u32));
        }
    }

    #[test]
    fn max_public_message() {
        let keypair = create_test_keypair();
        let max_bits = keypair.public_key().max_message_bits();

        let largest = (BigUint::one() << max_bits) - BigUint::one();
        let c = keypair.encrypt(largest.to_bytes_be()).unwrap();

        assert_eq!(keypair.decrypt(&c).unwrap(), largest);
    }

    #[test]
    fn public_key_rejects_message_above_bound() {
        let keypair = create_test_keypair();
        let max_bits = keypair.public_key().max_message_bits();

        let too_large = BigUint::one() << max_bits;
        let result = keypair.public_key().encrypt(too_large.to_bytes_be());

        assert_eq!(
            result,
            Err(Error::MessageOutOfRange { max_bits, actual_bits: max_bits + 1 })
        );
    }

    #[test]
    fn plaintext_larger_than_modulus() {
        let keypair = create_test_keypair();
        let too_large = keypair.public_key().n() + BigUint::one();

        let result = keypair.encrypt(too_large.to_bytes_be());
        assert!(matches!(result, Err(Error::MessageOutOfRange { .. })));
    }

    #[test]
    fn private_key_encrypts_up_to_p_minus_one() {
        let keypair = create_test_keypair();
        let priv_key = keypair.private_key();

        // max safe value is p - 1
        let max_safe = &priv_key.p - BigUint::one();
        let ciphertext = priv_key.encrypt(max_safe.to_bytes_be()).unwrap();
        let decrypted = priv_key.decrypt(&ciphertext).unwrap();

        assert_eq!(max_safe, decrypted);
    }

    #[test]
    fn private_key_rejects_p() {
        let keypair = create_test_keypair();
        let priv_key = keypair.private_key();

        let result = priv_key.encrypt(priv_key.p.to_bytes_be());
        assert!(matches!(result, Err(Error::MessageOutOfRange { .. })));
    }

    #[test]
    fn random_source_failure_aborts_encryption() {
        let keypair = create_test_keypair();

        let result = keypair.encrypt_with_rng(b"entropy", &mut FailingRng);
        assert!(matches!(result, Err(Error::RandomSource(_))));
    }

    #[test]
    fn encrypt_utf8() {
        let keypair = create_test_keypair();
        let msg = "こんにちは世界";

        let ciphertext = keypair.encrypt(msg).unwrap();
        let decrypted = keypair.decrypt(&ciphertext).unwrap();

        assert_eq!(String::from_utf8(decrypted.to_bytes_be()).unwrap(), msg);
    }
}
