//! Plain-text key files: `{E}\n{N}` for the public key, `{D}\n{N}` for the
//! private key.

use crate::number_theory::parse_decimal;
use crate::rsa::keygen::RsaKeyPair;
use cipher_core::{CipherError, Result};
use num_bigint::BigUint;
use std::fs;
use std::path::Path;

/// Writes the public and private key files.
pub fn export_keys(keys: &RsaKeyPair, public_path: &Path, private_path: &Path) -> Result<()> {
    write_pair(public_path, keys.e(), keys.n())?;
    write_pair(private_path, keys.d(), keys.n())?;
    log::info!(
        "exported RSA keys to {} and {}",
        public_path.display(),
        private_path.display()
    );
    Ok(())
}

/// Reads (E, N) from a public key file.
pub fn import_public_key(path: &Path) -> Result<(BigUint, BigUint)> {
    read_pair(path)
}

/// Reads (D, N) from a private key file.
pub fn import_private_key(path: &Path) -> Result<(BigUint, BigUint)> {
    read_pair(path)
}

impl RsaKeyPair {
    /// Replaces E and N with the contents of a public key file.
    pub fn load_public_key(self, path: &Path) -> Result<Self> {
        let (e, n) = import_public_key(path)?;
        Ok(self.with_public_key(e, n))
    }

    /// Replaces D and N with the contents of a private key file.
    pub fn load_private_key(self, path: &Path) -> Result<Self> {
        let (d, n) = import_private_key(path)?;
        Ok(self.with_private_key(d, n))
    }
}

fn write_pair(path: &Path, exponent: &BigUint, modulus: &BigUint) -> Result<()> {
    fs::write(path, format!("{exponent}\n{modulus}"))
        .map_err(|e| CipherError::io(format!("cannot write key file {}", path.display()), e))
}

fn read_pair(path: &Path) -> Result<(BigUint, BigUint)> {
    let text = fs::read_to_string(path)
        .map_err(|e| CipherError::io(format!("cannot read key file {}", path.display()), e))?;
    parse_pair(&text)
}

/// First two non-empty lines as (exponent, modulus).
pub(crate) fn parse_pair(text: &str) -> Result<(BigUint, BigUint)> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
    match (lines.next(), lines.next()) {
        (Some(exponent), Some(modulus)) => Ok((parse_decimal(exponent)?, parse_decimal(modulus)?)),
        _ => Err(CipherError::invalid_argument(
            "key file must hold two lines: exponent and modulus",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_crlf_and_trailing_whitespace() {
        let (e, n) = parse_pair("17 \r\n3233\r\n\r\n").unwrap();
        assert_eq!(e, BigUint::from(17u8));
        assert_eq!(n, BigUint::from(3233u32));
    }

    #[test]
    fn rejects_single_line() {
        assert!(parse_pair("17\n").is_err());
        assert!(parse_pair("").is_err());
    }

    #[test]
    fn rejects_non_numeric_line() {
        let err = parse_pair("17\nabc").unwrap_err();
        assert_eq!(err.kind(), cipher_core::ErrorKind::InvalidArgument);
    }
}
