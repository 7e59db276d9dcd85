#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigUint;
use oucrypt::{Decrypt, Encrypt, Error, KeyPair};
use std::sync::OnceLock;

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    // 128-bit keys are insecure, but keep the fuzzer fast
    let key_pair = KEYPAIR.get_or_init(|| KeyPair::generate_with_size(128).unwrap());
    let pub_key = key_pair.public_key();

    let plaintext = BigUint::from_bytes_be(data);

    match pub_key.encrypt(data) {
        Ok(ciphertext) => {
            assert!(ciphertext.value() < pub_key.n());

            let decrypted = key_pair.decrypt(&ciphertext).unwrap();
            assert_eq!(plaintext, decrypted);
        }
        Err(Error::MessageOutOfRange { max_bits, actual_bits }) => {
            assert!(plaintext.bits() > pub_key.max_message_bits());
            assert_eq!(max_bits, pub_key.max_message_bits());
            assert_eq!(actual_bits, plaintext.bits());
        }
        Err(e) => panic!("unexpected encryption error: {e}"),
    }
});
