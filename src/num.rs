//! Modular arithmetic and primality on top of rug's GMP integers.
//!
//! Exponentiations whose exponent may be negative go through `pow_mod`, which reports a missing
//! inverse as `None` instead of panicking. Verifiers feed attacker-controlled values into these
//! functions, so nothing here may panic on well-typed input.
use rug::integer::IsPrime;
use rug::Integer;
use std::cmp::Ordering;

/// Miller-Rabin rounds used when deriving public parameters.
pub const PARAMGEN_PRIMALITY_ROUNDS: u32 = 40;

/// `base^exp mod modulus`. Negative exponents invert `base` first; `None` if it has no inverse
/// or `modulus` is zero.
pub fn pow_mod(base: &Integer, exp: &Integer, modulus: &Integer) -> Option<Integer> {
  if modulus.cmp0() == Ordering::Equal {
    return None;
  }
  base.pow_mod_ref(exp, modulus).map(Integer::from)
}

/// `base^exp mod modulus` for a non-negative exponent and positive modulus.
pub fn mod_exp(base: &Integer, exp: &Integer, modulus: &Integer) -> Integer {
  debug_assert!(exp.cmp0() != Ordering::Less);
  debug_assert!(modulus.cmp0() == Ordering::Greater);
  pow_mod(base, exp, modulus).unwrap_or_default()
}

/// Product of `base^exp` over `terms`, mod `modulus`. `None` as soon as one term fails.
pub fn multi_pow_mod(terms: &[(&Integer, &Integer)], modulus: &Integer) -> Option<Integer> {
  terms.iter().try_fold(Integer::from(1), |acc, (base, exp)| {
    Some(mul_mod(&acc, &pow_mod(base, exp, modulus)?, modulus))
  })
}

/// `a * b mod modulus`, always in `[0, modulus)`.
pub fn mul_mod(a: &Integer, b: &Integer, modulus: &Integer) -> Integer {
  modulo(Integer::from(a * b), modulus)
}

/// Euclidean remainder, always in `[0, modulus)`.
pub fn modulo(x: Integer, modulus: &Integer) -> Integer {
  let mut r = x % modulus;
  if r.cmp0() == Ordering::Less {
    r += modulus;
  }
  r
}

pub fn invert(x: &Integer, modulus: &Integer) -> Option<Integer> {
  x.invert_ref(modulus).map(Integer::from)
}

/// Probable-prime test with `rounds` Miller-Rabin rounds (after GMP's trial division and
/// Baillie-PSW).
pub fn is_prime(n: &Integer, rounds: u32) -> bool {
  *n > 1 && n.is_probably_prime(rounds) != IsPrime::No
}
