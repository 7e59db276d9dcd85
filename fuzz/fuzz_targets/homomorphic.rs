#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigUint;
use oucrypt::{Decrypt, Encrypt, Homomorphic, KeyPair};

use std::sync::OnceLock;

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    if data.len() < 6 {
        return;
    }
    let keypair = KEYPAIR.get_or_init(|| KeyPair::generate_with_size(128).unwrap());
    let public_key = keypair.public_key();

    // two 2-byte messages and a 2-byte scalar, far below the message bound
    let m1 = BigUint::from_bytes_be(&data[0..2]);
    let m2 = BigUint::from_bytes_be(&data[2..4]);
    let k = BigUint::from_bytes_be(&data[4..6]);

    let Ok(c1) = public_key.encrypt(&data[0..2]) else {
        return;
    };
    let Ok(c2) = public_key.encrypt(&data[2..4]) else {
        return;
    };

    let sum = public_key.add_cipher(&c1, &c2);
    assert_eq!(keypair.decrypt(&sum).unwrap(), &m1 + &m2);

    let scaled = public_key.mul_cipher(&c1, &k);
    assert_eq!(keypair.decrypt(&scaled).unwrap(), &m1 * &k);
});
