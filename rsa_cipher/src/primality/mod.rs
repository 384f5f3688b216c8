pub(crate) mod miller_rabin;
pub use miller_rabin::{MillerRabinTest, DEFAULT_ROUNDS};

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use rand::RngCore;

/// Interface for a randomized primality test.
/// Template method: the public entry point is fixed, one round is overridden.
pub trait PrimalityTest {
    /// Number of independent rounds to run.
    fn rounds(&self) -> u32;

    /// true if n is probably prime; small and even inputs are decided
    /// without randomness, the rest stops at the first failing round.
    fn is_probably_prime(&self, n: &BigUint, rng: &mut dyn RngCore) -> bool {
        if let Some(verdict) = trivial_verdict(n) {
            return verdict;
        }
        (0..self.rounds()).all(|_| self.run_iteration(n, rng))
    }

    /// One round for an odd n >= 5.
    fn run_iteration(&self, n: &BigUint, rng: &mut dyn RngCore) -> bool;
}

fn trivial_verdict(n: &BigUint) -> Option<bool> {
    match n.to_u8() {
        Some(0 | 1) => Some(false),
        Some(2 | 3) => Some(true),
        _ if (n % 2u8).is_zero() => Some(false),
        _ => None,
    }
}

/// Convenience check with the default test and the thread-local RNG.
pub fn is_probable_prime(n: &BigUint) -> bool {
    MillerRabinTest::default().is_probably_prime(n, &mut rand::thread_rng())
}
