//! Line-oriented container for RSA-encrypted files.
//!
//! ```text
//! RSA_ENCRYPTED
//! <original byte count>
//! <C for byte 0>
//! <C for byte 1>
//! ...
//! ```

use crate::number_theory::{mod_pow, parse_decimal};
use crate::rsa::rsa::RsaCipher;
use cipher_core::{
    read_all, read_text, write_all, CipherError, CipherInput, CipherOutput, ProgressReporter,
    ProgressSink, Result,
};
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const FILE_HEADER: &str = "RSA_ENCRYPTED";

/// Progress is reported once per this many bytes.
const PROGRESS_STRIDE: usize = 1000;

impl RsaCipher {
    /// Encrypts every byte on its own line after the two header lines.
    pub fn encode(&self, data: &[u8], progress: &dyn ProgressSink) -> String {
        let reporter = ProgressReporter::new(progress);
        let (e, n) = (self.keys().e(), self.keys().n());

        let mut out = format!("{FILE_HEADER}\n{}\n", data.len());
        for (i, &byte) in data.iter().enumerate() {
            let c = mod_pow(&BigUint::from(byte), e, n);
            out.push_str(&c.to_string());
            out.push('\n');
            if i % PROGRESS_STRIDE == 0 {
                reporter.step(i, data.len());
            }
        }

        reporter.finish();
        out
    }

    /// Parses the container and decrypts it back into bytes.
    ///
    /// Fails with `CorruptData` on a bad header, on a line that is not a
    /// number, on a recovered value above 255 (usually a wrong key), or when
    /// the number of bytes does not match the declared length.
    pub fn decode(&self, container: &str, progress: &dyn ProgressSink) -> Result<Vec<u8>> {
        let reporter = ProgressReporter::new(progress);
        let mut lines = container.lines();

        if lines.next().map(str::trim_end) != Some(FILE_HEADER) {
            return Err(CipherError::corrupt_data(
                "input was not encrypted with RSA or is damaged",
            ));
        }
        let original_len = lines
            .next()
            .and_then(|line| line.trim().parse::<usize>().ok())
            .ok_or_else(|| CipherError::corrupt_data("RSA header has no valid byte count"))?;

        let (d, n) = (self.keys().d(), self.keys().n());
        // The count comes from the file; every byte needs at least one line.
        let mut bytes = Vec::with_capacity(original_len.min(container.len() / 2));
        for line in lines.map(str::trim).filter(|line| !line.is_empty()) {
            let c = parse_decimal(line)
                .map_err(|_| CipherError::corrupt_data(format!("not a number: {line:?}")))?;
            let byte = mod_pow(&c, d, n).to_u8().ok_or_else(|| {
                CipherError::corrupt_data("decrypted value is not a byte: wrong key or damaged data")
            })?;
            if bytes.len() % PROGRESS_STRIDE == 0 {
                reporter.step(bytes.len(), original_len);
            }
            bytes.push(byte);
        }

        if bytes.len() != original_len {
            return Err(CipherError::corrupt_data(format!(
                "expected {original_len} bytes, recovered {}",
                bytes.len()
            )));
        }

        reporter.finish();
        Ok(bytes)
    }

    pub fn encrypt_file(
        &self,
        input: &CipherInput,
        output: &mut CipherOutput,
        progress: &dyn ProgressSink,
    ) -> Result<()> {
        let data = read_all(input)?;
        log::info!("RSA: encrypting {} bytes", data.len());
        let container = self.encode(&data, progress);
        write_all(output, container.as_bytes())
    }

    pub fn decrypt_file(
        &self,
        input: &CipherInput,
        output: &mut CipherOutput,
        progress: &dyn ProgressSink,
    ) -> Result<()> {
        let container = read_text(input)?;
        let data = self.decode(&container, progress)?;
        log::info!("RSA: decrypted {} bytes", data.len());
        write_all(output, &data)
    }
}

/// Whether the file's first line is the RSA container header.
/// Unreadable files count as not encrypted.
pub fn is_encrypted_file(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut first_line = String::new();
    match BufReader::new(file).read_line(&mut first_line) {
        Ok(_) => first_line.trim_end() == FILE_HEADER,
        Err(_) => false,
    }
}
