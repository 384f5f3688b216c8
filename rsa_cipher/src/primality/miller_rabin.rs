use crate::number_theory::mod_pow;
use crate::primality::PrimalityTest;
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use rand::RngCore;

pub const DEFAULT_ROUNDS: u32 = 10;

/// Miller–Rabin test
#[derive(Debug, Clone, Copy)]
pub struct MillerRabinTest {
    rounds: u32,
}

impl MillerRabinTest {
    pub fn new(rounds: u32) -> Self {
        Self { rounds }
    }
}

impl Default for MillerRabinTest {
    fn default() -> Self {
        Self::new(DEFAULT_ROUNDS)
    }
}

impl PrimalityTest for MillerRabinTest {
    fn rounds(&self) -> u32 {
        self.rounds
    }

    fn run_iteration(&self, n: &BigUint, rng: &mut dyn RngCore) -> bool {
        let one = BigUint::one();
        let two = BigUint::from(2u8);
        let upper = n - &one;

        // n - 1 = 2^r * d, d odd
        let mut d = upper.clone();
        let mut r = 0u32;
        while d.is_even() {
            d >>= 1;
            r += 1;
        }

        // witness = random mod (n - 4) + 2, so it lies in [2, n - 3]
        let a = rng.gen_biguint_below(&(n - 4u8)) + &two;
        let mut x = mod_pow(&a, &d, n);

        if x == one || x == upper {
            return true;
        }

        for _ in 1..r {
            x = mod_pow(&x, &two, n);
            if x == upper {
                return true;
            }
        }

        false
    }
}
