//! Whole-file container for the Playfair cipher.
//!
//! Each byte becomes two letters (one per nibble, `A`-`I` for 0-8 and `K`-`Q`
//! for 9-15, `J` never used), the letters are substituted pair by pair, and
//! the result is written after a `PLAYFAIR_ENCRYPTED|<byte count>` line.

use crate::crypto::digraph::Direction;
use crate::crypto::playfair::{reject_pair, PlayfairCipher, ProgressSpan};
use cipher_core::{
    read_all, read_text, write_all, CipherError, CipherInput, CipherOutput, ProgressReporter,
    ProgressSink, Result,
};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const FILE_HEADER_PREFIX: &str = "PLAYFAIR_ENCRYPTED|";

pub fn nibble_to_letter(nibble: u8) -> char {
    let nibble = nibble & 0x0F;
    if nibble <= 8 {
        (b'A' + nibble) as char
    } else {
        (b'A' + nibble + 1) as char
    }
}

pub fn letter_to_nibble(letter: char) -> Option<u8> {
    match letter.to_ascii_uppercase() {
        c @ 'A'..='I' => Some(c as u8 - b'A'),
        c @ 'K'..='Q' => Some(c as u8 - b'A' - 1),
        _ => None,
    }
}

impl PlayfairCipher {
    /// Encodes raw bytes into the encrypted container text.
    pub fn encode(&self, data: &[u8], progress: &dyn ProgressSink) -> String {
        let reporter = ProgressReporter::new(progress);

        let mut letters = String::with_capacity(data.len() * 2);
        for (i, &byte) in data.iter().enumerate() {
            letters.push(nibble_to_letter(byte >> 4));
            letters.push(nibble_to_letter(byte & 0x0F));
            reporter.span(0, 50, i, data.len());
        }

        let span = ProgressSpan {
            reporter: &reporter,
            from: 50,
            to: 100,
        };
        let body = self.lenient(&letters, Direction::Encrypt, None, Some(span));

        reporter.finish();
        format!("{FILE_HEADER_PREFIX}{}\n{body}", data.len())
    }

    /// Decodes container text back into the original bytes.
    ///
    /// Fails with `CorruptData` on a missing or malformed header, on letters
    /// that are not in the square, when fewer letters than declared remain, or
    /// when a letter decodes to something that is not a nibble. A wrong key is
    /// only noticed through the last check and may otherwise yield garbage.
    pub fn decode(&self, container: &str, progress: &dyn ProgressSink) -> Result<Vec<u8>> {
        let reporter = ProgressReporter::new(progress);

        if !container.starts_with(FILE_HEADER_PREFIX) {
            return Err(CipherError::corrupt_data(
                "input was not encrypted with Playfair or is damaged",
            ));
        }
        let (header, body) = container
            .split_once('\n')
            .ok_or_else(|| CipherError::corrupt_data("Playfair header line is not terminated"))?;
        let original_len = parse_header(header.trim_end_matches('\r'))?;

        let span = ProgressSpan {
            reporter: &reporter,
            from: 0,
            to: 50,
        };
        let letters: Vec<char> = self
            .transform(body, Direction::Decrypt, reject_pair, None, Some(span))?
            .chars()
            .collect();

        if original_len
            .checked_mul(2)
            .map_or(true, |needed| letters.len() < needed)
        {
            return Err(CipherError::corrupt_data(format!(
                "decrypted data is too short: {} letters for {} bytes",
                letters.len(),
                original_len
            )));
        }

        let mut bytes = Vec::with_capacity(original_len);
        for (i, pair) in letters.chunks_exact(2).take(original_len).enumerate() {
            let (Some(high), Some(low)) = (letter_to_nibble(pair[0]), letter_to_nibble(pair[1]))
            else {
                return Err(CipherError::corrupt_data(
                    "cannot decode file: wrong key or damaged data",
                ));
            };
            bytes.push((high << 4) | low);
            reporter.span(50, 100, i, original_len);
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
        log::info!("Playfair: encrypting {} bytes", data.len());
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
        log::info!("Playfair: decrypted {} bytes", data.len());
        write_all(output, &data)
    }
}

fn parse_header(header: &str) -> Result<usize> {
    let parts: Vec<&str> = header.split('|').collect();
    match parts.as_slice() {
        [_, count] => count
            .parse::<usize>()
            .map_err(|_| CipherError::corrupt_data(format!("bad byte count in header: {count:?}"))),
        _ => Err(CipherError::corrupt_data("Playfair header is damaged")),
    }
}

/// Whether the file's first line carries the Playfair container header.
/// Unreadable files count as not encrypted.
pub fn is_encrypted_file(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut first_line = String::new();
    match BufReader::new(file).read_line(&mut first_line) {
        Ok(_) => first_line.starts_with(FILE_HEADER_PREFIX),
        Err(_) => false,
    }
}
