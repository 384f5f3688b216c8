use crate::progress::{run_blocking, run_with_progress, CliResult};
use crate::{KeyPaths, PlayfairCommand, RsaCommand};
use cipher_core::{CipherError, CipherInput, CipherOutput, TraceRecord};
use num_bigint::BigUint;
use num_traits::Zero;
use playfair_cipher::PlayfairCipher;
use rsa_cipher::number_theory::parse_decimal;
use rsa_cipher::{export_keys, RsaCipher, RsaKeyGenerator, RsaKeyPair};
use std::path::Path;

pub async fn playfair(command: PlayfairCommand, quiet: bool) -> CliResult<()> {
    match command {
        PlayfairCommand::Matrix { key } => {
            print!("{}", PlayfairCipher::new(&key)?.square());
        }
        PlayfairCommand::Encrypt { key, trace, text } => {
            let cipher = PlayfairCipher::new(&key)?;
            if trace {
                let (ciphertext, steps) = cipher.encrypt_with_trace(&text);
                print_trace(&steps);
                println!("{ciphertext}");
            } else {
                println!("{}", cipher.encrypt(&text));
            }
        }
        PlayfairCommand::Decrypt { key, trace, text } => {
            let cipher = PlayfairCipher::new(&key)?;
            if trace {
                let (plaintext, steps) = cipher.decrypt_with_trace(&text);
                print_trace(&steps);
                println!("{plaintext}");
            } else {
                println!("{}", cipher.decrypt(&text));
            }
        }
        PlayfairCommand::EncryptFile { key, input, output } => {
            let cipher = PlayfairCipher::new(&key)?;
            run_with_progress("Encrypting", quiet, move |progress| {
                cipher.encrypt_file(
                    &CipherInput::File(input),
                    &mut CipherOutput::File(output),
                    progress,
                )
            })
            .await?;
        }
        PlayfairCommand::DecryptFile { key, input, output } => {
            let cipher = PlayfairCipher::new(&key)?;
            run_with_progress("Decrypting", quiet, move |progress| {
                cipher.decrypt_file(
                    &CipherInput::File(input),
                    &mut CipherOutput::File(output),
                    progress,
                )
            })
            .await?;
        }
    }
    Ok(())
}

pub async fn rsa(command: RsaCommand, quiet: bool) -> CliResult<()> {
    match command {
        RsaCommand::Generate { bits, rounds, keys } => {
            let generator = RsaKeyGenerator::new(bits).with_rounds(rounds);
            let pair = run_blocking(move || generator.generate()).await?;
            print!("{}", pair.summary());
            export_if_requested(&pair, &keys)?;
        }
        RsaCommand::Manual { p, q, e, keys } => {
            let (p, q, e) = (parse_decimal(&p)?, parse_decimal(&q)?, parse_decimal(&e)?);
            let pair = run_blocking(move || RsaKeyPair::from_primes(p, q, e)).await?;
            print!("{}", pair.summary());
            export_if_requested(&pair, &keys)?;
        }
        RsaCommand::Info { keys } => {
            print!("{}", load_keys(&keys)?.summary());
        }
        RsaCommand::Encrypt { keys, trace, text } => {
            let cipher = RsaCipher::new(load_keys(&keys)?);
            if trace {
                let (ciphertext, steps) = cipher.encrypt_text_with_trace(&text);
                print_trace(&steps);
                println!("{ciphertext}");
            } else {
                println!("{}", cipher.encrypt_text(&text));
            }
        }
        RsaCommand::Decrypt { keys, trace, text } => {
            let cipher = RsaCipher::new(load_keys(&keys)?);
            if trace {
                let (plaintext, steps) = cipher.decrypt_text_with_trace(&text)?;
                print_trace(&steps);
                println!("{plaintext}");
            } else {
                println!("{}", cipher.decrypt_text(&text)?);
            }
        }
        RsaCommand::EncryptNumber { keys, trace, number } => {
            let cipher = RsaCipher::new(load_keys(&keys)?);
            let m = parse_decimal(&number)?;
            let (c, step) = cipher.encrypt_number_with_trace(&m);
            if trace {
                println!("{step}");
            }
            println!("{c}");
        }
        RsaCommand::DecryptNumber { keys, trace, number } => {
            let cipher = RsaCipher::new(load_keys(&keys)?);
            let c = parse_decimal(&number)?;
            let (m, step) = cipher.decrypt_number_with_trace(&c);
            if trace {
                println!("{step}");
            }
            println!("{m}");
        }
        RsaCommand::EncryptFile { keys, input, output } => {
            let cipher = RsaCipher::new(load_keys(&keys)?);
            run_with_progress("Encrypting", quiet, move |progress| {
                cipher.encrypt_file(
                    &CipherInput::File(input),
                    &mut CipherOutput::File(output),
                    progress,
                )
            })
            .await?;
        }
        RsaCommand::DecryptFile { keys, input, output } => {
            let cipher = RsaCipher::new(load_keys(&keys)?);
            run_with_progress("Decrypting", quiet, move |progress| {
                cipher.decrypt_file(
                    &CipherInput::File(input),
                    &mut CipherOutput::File(output),
                    progress,
                )
            })
            .await?;
        }
    }
    Ok(())
}

pub fn detect(path: &Path) {
    let verdict = if playfair_cipher::is_encrypted_file(path) {
        "playfair"
    } else if rsa_cipher::is_encrypted_file(path) {
        "rsa"
    } else {
        "none"
    };
    println!("{verdict}");
}

/// Starts from empty key material and overlays whichever key files are given.
fn load_keys(paths: &KeyPaths) -> Result<RsaKeyPair, CipherError> {
    if paths.public.is_none() && paths.private.is_none() {
        return Err(CipherError::invalid_argument(
            "no key given: pass --public and/or --private",
        ));
    }
    let mut keys = RsaKeyPair::from_components(BigUint::zero(), BigUint::zero(), BigUint::zero());
    if let Some(path) = &paths.public {
        keys = keys.load_public_key(path)?;
    }
    if let Some(path) = &paths.private {
        keys = keys.load_private_key(path)?;
    }
    Ok(keys)
}

fn export_if_requested(keys: &RsaKeyPair, paths: &KeyPaths) -> Result<(), CipherError> {
    match (&paths.public, &paths.private) {
        (Some(public), Some(private)) => export_keys(keys, public, private),
        (None, None) => Ok(()),
        _ => Err(CipherError::invalid_argument(
            "exporting needs both --public and --private",
        )),
    }
}

fn print_trace(steps: &[TraceRecord]) {
    for step in steps {
        println!("{step}");
    }
}
