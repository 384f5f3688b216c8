use num_bigint::BigUint;
use rsa_cipher::{RsaCipher, RsaKeyPair};

fn main() -> cipher_core::Result<()> {
    // Textbook key: P = 61, Q = 53, E = 17
    let textbook = RsaCipher::new(RsaKeyPair::from_primes(
        BigUint::from(61u32),
        BigUint::from(53u32),
        BigUint::from(17u32),
    )?);
    print!("{}", textbook.keys().summary());

    let (c, step) = textbook.encrypt_number_with_trace(&BigUint::from(65u32));
    println!("{step}");
    println!("65 -> {c} -> {}", textbook.decrypt_number(&c));

    let rsa = RsaCipher::generate(256)?;
    println!("public key: {}", rsa.keys().public_key_string());

    let (ciphertext, steps) = rsa.encrypt_text_with_trace("Hi!");
    for step in &steps {
        println!("{step}");
    }
    println!("decrypted: {}", rsa.decrypt_text(&ciphertext)?);
    Ok(())
}
