use crate::number_theory::{mod_pow, parse_decimal};
use crate::rsa::keygen::{RsaKeyGenerator, RsaKeyPair};
use cipher_core::trace::{self, TraceRecord};
use cipher_core::Result;
use num_bigint::BigUint;

pub const ENCRYPT_RULE: &str = "C = M^E mod N";
pub const DECRYPT_RULE: &str = "M = C^D mod N";

/// Textbook RSA over a fixed key pair.
///
/// Text is encrypted one UTF-8 byte at a time with no padding, so equal bytes
/// give equal ciphertext numbers. This is a teaching scheme, not a secure one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaCipher {
    keys: RsaKeyPair,
}

impl RsaCipher {
    pub fn new(keys: RsaKeyPair) -> Self {
        Self { keys }
    }

    /// Generates a fresh key pair and wraps it.
    pub fn generate(bit_length: usize) -> Result<Self> {
        RsaKeyGenerator::new(bit_length).generate().map(Self::new)
    }

    pub fn keys(&self) -> &RsaKeyPair {
        &self.keys
    }

    /// M^E mod N, for any M the caller supplies.
    pub fn encrypt_number(&self, m: &BigUint) -> BigUint {
        mod_pow(m, self.keys.e(), self.keys.n())
    }

    /// C^D mod N
    pub fn decrypt_number(&self, c: &BigUint) -> BigUint {
        mod_pow(c, self.keys.d(), self.keys.n())
    }

    pub fn encrypt_number_with_trace(&self, m: &BigUint) -> (BigUint, TraceRecord) {
        let c = self.encrypt_number(m);
        let record = TraceRecord::new(
            m.to_string(),
            format!("E = {}", self.keys.e()),
            Some(format!("N = {}", self.keys.n())),
            ENCRYPT_RULE,
            c.to_string(),
        );
        (c, record)
    }

    pub fn decrypt_number_with_trace(&self, c: &BigUint) -> (BigUint, TraceRecord) {
        let m = self.decrypt_number(c);
        let record = TraceRecord::new(
            c.to_string(),
            "D = (private)",
            Some(format!("N = {}", self.keys.n())),
            DECRYPT_RULE,
            m.to_string(),
        );
        (m, record)
    }

    /// Encrypts each UTF-8 byte separately; the result is the ciphertext
    /// numbers in decimal, separated by single spaces.
    pub fn encrypt_text(&self, plaintext: &str) -> String {
        self.encrypt_text_traced(plaintext, None)
    }

    pub fn encrypt_text_with_trace(&self, plaintext: &str) -> (String, Vec<TraceRecord>) {
        let mut records = Vec::new();
        let ciphertext = self.encrypt_text_traced(plaintext, Some(&mut records));
        (ciphertext, records)
    }

    /// Reverses [`RsaCipher::encrypt_text`]. Every recovered value is cut down
    /// to its low byte and the bytes are decoded as lossy UTF-8, so a wrong
    /// key usually produces garbage rather than an error.
    ///
    /// Fails with `InvalidArgument` on a token that is not a decimal number.
    pub fn decrypt_text(&self, ciphertext: &str) -> Result<String> {
        self.decrypt_text_traced(ciphertext, None)
    }

    pub fn decrypt_text_with_trace(&self, ciphertext: &str) -> Result<(String, Vec<TraceRecord>)> {
        let mut records = Vec::new();
        let plaintext = self.decrypt_text_traced(ciphertext, Some(&mut records))?;
        Ok((plaintext, records))
    }

    fn encrypt_text_traced(
        &self,
        plaintext: &str,
        mut trace: Option<&mut Vec<TraceRecord>>,
    ) -> String {
        let numbers: Vec<String> = plaintext
            .bytes()
            .map(|b| {
                let c = self.encrypt_number(&BigUint::from(b));
                trace::push(&mut trace, || {
                    TraceRecord::new(
                        display_byte(b),
                        b.to_string(),
                        Some(b.to_string()),
                        ENCRYPT_RULE,
                        c.to_string(),
                    )
                });
                c.to_string()
            })
            .collect();
        numbers.join(" ")
    }

    fn decrypt_text_traced(
        &self,
        ciphertext: &str,
        mut trace: Option<&mut Vec<TraceRecord>>,
    ) -> Result<String> {
        let mut bytes = Vec::new();
        for token in ciphertext.split_whitespace() {
            let c = parse_decimal(token)?;
            let b = low_byte(&self.decrypt_number(&c));
            bytes.push(b);
            trace::push(&mut trace, || {
                TraceRecord::new(
                    display_byte(b),
                    b.to_string(),
                    Some(c.to_string()),
                    DECRYPT_RULE,
                    b.to_string(),
                )
            });
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Lowest byte of a value; anything above 255 is truncated.
pub(crate) fn low_byte(value: &BigUint) -> u8 {
    value.to_bytes_le().first().copied().unwrap_or(0)
}

/// Quoted character for printable ASCII, `?` for everything else.
fn display_byte(b: u8) -> String {
    if b.is_ascii_graphic() || b == b' ' {
        format!("'{}'", b as char)
    } else {
        "?".to_string()
    }
}
