#![no_main]

use libfuzzer_sys::fuzz_target;
use oucrypt::{Ciphertext, Decrypt, Error, KeyPair};

use std::sync::OnceLock;

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let keypair = KEYPAIR.get_or_init(|| KeyPair::generate_with_size(128).unwrap());
    let n = keypair.public_key().n();

    // arbitrary bytes must never panic: either a value or InvalidCiphertext
    let ciphertext = Ciphertext::from_bytes(data);
    match keypair.decrypt(&ciphertext) {
        Ok(_) => assert!(ciphertext.value() < n),
        Err(Error::InvalidCiphertext) => {}
        Err(e) => panic!("unexpected decryption error: {e}"),
    }
});
