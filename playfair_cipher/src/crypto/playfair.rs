use crate::crypto::digraph::{normalize_ciphertext, prepare_text, substitute, Direction};
use crate::crypto::key_square::{normalize_key, KeySquare};
use cipher_core::trace::{self, TraceRecord};
use cipher_core::{CipherError, ProgressReporter, Result};
use std::convert::Infallible;

/// Slice `[from, to]` of a progress run covered by one transform pass.
pub(crate) struct ProgressSpan<'r, 'a> {
    pub reporter: &'r ProgressReporter<'a>,
    pub from: u8,
    pub to: u8,
}

/// Unknown-letter policy for file payloads: the pair is an error.
pub(crate) fn reject_pair(a: char, b: char) -> Result<()> {
    Err(CipherError::corrupt_data(format!(
        "pair {a}{b} cannot be decrypted: wrong key or damaged data"
    )))
}

/// Unknown-letter policy for free text: the pair is dropped.
fn skip_pair(a: char, b: char) -> std::result::Result<(), Infallible> {
    log::debug!("skipping pair {a}{b}: letter not in square");
    Ok(())
}

/// Playfair cipher bound to one key.
///
/// The key and its square are fixed at construction; a new key means a new
/// value, so one instance can be shared between threads freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayfairCipher {
    key: String,
    square: KeySquare,
}

impl PlayfairCipher {
    pub fn new(key: &str) -> Result<Self> {
        if key.is_empty() {
            return Err(CipherError::invalid_argument("key cannot be empty"));
        }
        let key = normalize_key(key);
        let square = KeySquare::from_key(&key);
        log::debug!("built Playfair square for a {}-character key", key.chars().count());
        Ok(Self { key, square })
    }

    /// The normalized key (uppercase, `J` replaced by `I`).
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn square(&self) -> &KeySquare {
        &self.square
    }

    pub fn encrypt(&self, plaintext: &str) -> String {
        self.encrypt_traced(plaintext, None)
    }

    pub fn encrypt_with_trace(&self, plaintext: &str) -> (String, Vec<TraceRecord>) {
        let mut records = Vec::new();
        let ciphertext = self.encrypt_traced(plaintext, Some(&mut records));
        (ciphertext, records)
    }

    /// Decrypts to the prepared plaintext; filler letters are not removed.
    pub fn decrypt(&self, ciphertext: &str) -> String {
        self.decrypt_traced(ciphertext, None)
    }

    pub fn decrypt_with_trace(&self, ciphertext: &str) -> (String, Vec<TraceRecord>) {
        let mut records = Vec::new();
        let plaintext = self.decrypt_traced(ciphertext, Some(&mut records));
        (plaintext, records)
    }

    fn encrypt_traced(&self, plaintext: &str, trace: Option<&mut Vec<TraceRecord>>) -> String {
        self.lenient(&prepare_text(plaintext), Direction::Encrypt, trace, None)
    }

    fn decrypt_traced(&self, ciphertext: &str, trace: Option<&mut Vec<TraceRecord>>) -> String {
        self.lenient(&normalize_ciphertext(ciphertext), Direction::Decrypt, trace, None)
    }

    pub(crate) fn lenient(
        &self,
        letters: &str,
        direction: Direction,
        trace: Option<&mut Vec<TraceRecord>>,
        progress: Option<ProgressSpan<'_, '_>>,
    ) -> String {
        match self.transform(letters, direction, skip_pair, trace, progress) {
            Ok(out) => out,
            Err(never) => match never {},
        }
    }

    /// Runs `letters` through the square two at a time. An odd trailing
    /// letter is dropped. A pair with a letter outside the square goes to
    /// `on_unknown`, which either lets it be skipped or stops the run.
    pub(crate) fn transform<E>(
        &self,
        letters: &str,
        direction: Direction,
        mut on_unknown: impl FnMut(char, char) -> std::result::Result<(), E>,
        mut trace: Option<&mut Vec<TraceRecord>>,
        progress: Option<ProgressSpan<'_, '_>>,
    ) -> std::result::Result<String, E> {
        let chars: Vec<char> = letters.chars().collect();
        let pairs = chars.len() / 2;
        let mut out = String::with_capacity(chars.len());

        for (i, pair) in chars.chunks_exact(2).enumerate() {
            if let Some(span) = &progress {
                span.reporter.span(span.from, span.to, i, pairs);
            }
            let (a, b) = (pair[0], pair[1]);
            let Some(sub) = substitute(&self.square, a, b, direction) else {
                on_unknown(a, b)?;
                continue;
            };

            let (c1, c2) = sub.output;
            out.push(c1);
            out.push(c2);
            trace::push(&mut trace, || {
                TraceRecord::new(
                    format!("{a}{b}"),
                    sub.positions.0.to_string(),
                    Some(sub.positions.1.to_string()),
                    sub.rule.name(),
                    format!("{c1}{c2}"),
                )
            });
        }

        Ok(out)
    }
}
