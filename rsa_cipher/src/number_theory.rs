use cipher_core::{CipherError, Result};
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let mut a = a.clone();
    let mut b = b.clone();
    while !b.is_zero() {
        let r = a % &b;
        a = b;
        b = r;
    }
    a
}

/// Returns (g, x, y) such that ax + by = g = gcd(a, b)
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;

        let tmp_r = old_r - &q * &r;
        old_r = r;
        r = tmp_r;

        let tmp_s = old_s - &q * &s;
        old_s = s;
        s = tmp_s;

        let tmp_t = old_t - &q * &t;
        old_t = t;
        t = tmp_t;
    }

    (old_r, old_s, old_t)
}

/// x with a·x ≡ 1 (mod m), normalized into [0, m). `None` when a and m are
/// not coprime or m is zero.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    if m.is_one() {
        return Some(BigUint::zero());
    }
    let m_int = BigInt::from_biguint(Sign::Plus, m.clone());
    let a_int = BigInt::from_biguint(Sign::Plus, a.clone());
    let (g, x, _) = extended_gcd(&a_int, &m_int);
    if !g.is_one() {
        return None;
    }
    x.mod_floor(&m_int).to_biguint()
}

/// base^exp mod modulus, by square-and-multiply
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_zero() {
        return BigUint::zero();
    }
    let mut base = base % modulus;
    let mut exp = exponent.clone();
    let mut result = BigUint::one() % modulus;

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }
    result
}

/// Parses a non-negative decimal integer, ignoring surrounding whitespace.
pub fn parse_decimal(token: &str) -> Result<BigUint> {
    let token = token.trim();
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CipherError::invalid_argument(format!(
            "not a non-negative integer: {token:?}"
        )));
    }
    BigUint::parse_bytes(token.as_bytes(), 10)
        .ok_or_else(|| CipherError::invalid_argument(format!("not a number: {token:?}")))
}
