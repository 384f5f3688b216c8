use crate::number_theory::{gcd, mod_inverse};
use crate::primality::{MillerRabinTest, PrimalityTest};
use cipher_core::{ellipsize, CipherError, Result};
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::RngCore;
use std::fmt::Write;

pub const DEFAULT_BIT_LENGTH: usize = 512;
/// Each prime needs at least one byte of randomness.
pub const MIN_BIT_LENGTH: usize = 16;
pub const DEFAULT_PUBLIC_EXPONENT: u32 = 65537;

/// RSA key material: public key (E, N), private key (D, N).
///
/// P, Q and φ(N) are zero when the key was installed from (E, D, N) directly;
/// use [`RsaKeyPair::has_factors`] before relying on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    p: BigUint,
    q: BigUint,
    n: BigUint,
    phi: BigUint,
    e: BigUint,
    d: BigUint,
}

impl RsaKeyPair {
    /// Builds the key from two primes and a public exponent.
    ///
    /// Fails with `InvalidArgument` if P or Q is not a probable prime, if
    /// they are equal, or if E is not coprime with φ(N).
    pub fn from_primes(p: BigUint, q: BigUint, e: BigUint) -> Result<Self> {
        Self::from_primes_with(p, q, e, &MillerRabinTest::default(), &mut rand::thread_rng())
    }

    pub fn from_primes_with(
        p: BigUint,
        q: BigUint,
        e: BigUint,
        test: &dyn PrimalityTest,
        rng: &mut dyn RngCore,
    ) -> Result<Self> {
        if !test.is_probably_prime(&p, rng) || !test.is_probably_prime(&q, rng) {
            log::warn!("rejected manual key: P or Q is not prime");
            return Err(CipherError::invalid_argument("P and Q must be prime numbers"));
        }
        if p == q {
            return Err(CipherError::invalid_argument("P and Q must be different"));
        }

        let n = &p * &q;
        let phi = (&p - 1u8) * (&q - 1u8);
        if !gcd(&e, &phi).is_one() {
            log::warn!("rejected manual key: E shares a factor with phi(N)");
            return Err(CipherError::invalid_argument("E must be coprime with phi(N)"));
        }
        let d = mod_inverse(&e, &phi)
            .ok_or_else(|| CipherError::invalid_argument("E has no inverse modulo phi(N)"))?;

        Ok(Self { p, q, n, phi, e, d })
    }

    /// Installs imported key material verbatim. P, Q and φ(N) become unknown.
    pub fn from_components(e: BigUint, d: BigUint, n: BigUint) -> Self {
        Self {
            p: BigUint::zero(),
            q: BigUint::zero(),
            n,
            phi: BigUint::zero(),
            e,
            d,
        }
    }

    /// Replaces E and N, leaving every other field as it was.
    pub fn with_public_key(self, e: BigUint, n: BigUint) -> Self {
        Self { e, n, ..self }
    }

    /// Replaces D and N, leaving every other field as it was.
    pub fn with_private_key(self, d: BigUint, n: BigUint) -> Self {
        Self { d, n, ..self }
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn phi(&self) -> &BigUint {
        &self.phi
    }

    pub fn e(&self) -> &BigUint {
        &self.e
    }

    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// Whether P, Q and φ(N) are known.
    pub fn has_factors(&self) -> bool {
        !self.phi.is_zero()
    }

    /// (E, N)
    pub fn public_key(&self) -> (BigUint, BigUint) {
        (self.e.clone(), self.n.clone())
    }

    /// (D, N)
    pub fn private_key(&self) -> (BigUint, BigUint) {
        (self.d.clone(), self.n.clone())
    }

    /// `"(E, N)"`
    pub fn public_key_string(&self) -> String {
        format!("({}, {})", self.e, self.n)
    }

    /// `"(D, N)"`
    pub fn private_key_string(&self) -> String {
        format!("({}, {})", self.d, self.n)
    }

    /// Human-readable key listing with long numbers shortened.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        if self.has_factors() {
            let _ = writeln!(out, "P = {}", ellipsize(&self.p.to_string(), 40));
            let _ = writeln!(out, "Q = {}", ellipsize(&self.q.to_string(), 40));
            let _ = writeln!(out, "phi(N) = {}", ellipsize(&self.phi.to_string(), 38));
        }
        let _ = writeln!(out, "N = {}", ellipsize(&self.n.to_string(), 40));
        let _ = writeln!(out, "E = {}", self.e);
        let _ = writeln!(out, "D = {}", ellipsize(&self.d.to_string(), 40));
        out.push_str("Public key: (E, N)\nPrivate key: (D, N)\n");
        out
    }
}

/// RSA key generation service
pub struct RsaKeyGenerator {
    bit_length: usize,
    test: MillerRabinTest,
}

impl RsaKeyGenerator {
    pub fn new(bit_length: usize) -> Self {
        Self {
            bit_length,
            test: MillerRabinTest::default(),
        }
    }

    /// Number of Miller–Rabin rounds per candidate.
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.test = MillerRabinTest::new(rounds);
        self
    }

    pub fn bit_length(&self) -> usize {
        self.bit_length
    }

    pub fn generate(&self) -> Result<RsaKeyPair> {
        self.generate_with_rng(&mut rand::thread_rng())
    }

    /// Two distinct random probable primes of `bit_length / 2` bits, E from
    /// 65537 upwards in steps of 2 until coprime with φ(N), D = E⁻¹ mod φ(N).
    pub fn generate_with_rng(&self, rng: &mut dyn RngCore) -> Result<RsaKeyPair> {
        if self.bit_length < MIN_BIT_LENGTH {
            return Err(CipherError::invalid_argument(format!(
                "bit length must be at least {MIN_BIT_LENGTH}, got {}",
                self.bit_length
            )));
        }
        let half_bits = (self.bit_length / 2) as u64;

        let p = self.random_prime(half_bits, rng);
        let mut q = self.random_prime(half_bits, rng);
        while q == p {
            q = self.random_prime(half_bits, rng);
        }

        let n = &p * &q;
        let phi = (&p - 1u8) * (&q - 1u8);

        let mut e = BigUint::from(DEFAULT_PUBLIC_EXPONENT);
        while !gcd(&e, &phi).is_one() {
            e += 2u8;
        }
        let d = mod_inverse(&e, &phi)
            .ok_or_else(|| CipherError::invalid_argument("E has no inverse modulo phi(N)"))?;

        log::info!(
            "generated RSA key: requested {} bits, N has {} bits, E = {}",
            self.bit_length,
            n.bits(),
            e
        );
        Ok(RsaKeyPair { p, q, n, phi, e, d })
    }

    /// Odd candidate with its top bit cleared, re-rolled until it passes the test.
    fn random_prime(&self, bits: u64, rng: &mut dyn RngCore) -> BigUint {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let mut candidate = rng.gen_biguint(bits);
            candidate.set_bit(bits - 1, false);
            candidate.set_bit(0, true);
            if self.test.is_probably_prime(&candidate, rng) {
                log::debug!("found {bits}-bit prime candidate after {attempts} attempts");
                return candidate;
            }
        }
    }
}

impl Default for RsaKeyGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_BIT_LENGTH)
    }
}
