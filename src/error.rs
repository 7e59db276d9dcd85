// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Errors that can occur during key generation, encryption and decryption.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid key size: must be at least {min} bits, got {actual}")]
    InvalidKeySize { min: usize, actual: usize },

    #[error("Ciphertext is invalid or corrupted")]
    InvalidCiphertext,

    #[error("Message of {actual_bits} bits exceeds the {max_bits}-bit message space")]
    MessageOutOfRange { max_bits: usize, actual_bits: usize },

    #[error("Random source failure: {0}")]
    RandomSource(String),

    #[error("Sampling bound must be positive")]
    InvalidBound,

    #[error("No suitable generator found after {attempts} attempts")]
    TrapdoorConstruction { attempts: usize },

    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid private key")]
    InvalidPrivateKey,
}

impl From<rand::Error> for Error {
    fn from(err: rand::Error) -> Self {
        Error::RandomSource(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
