//! Group descriptions shared by coins, accumulators and proofs.
//!
//! `IntegerGroupParams` is a prime-order-q subgroup of Z_p^* with two independent generators,
//! used for Pedersen commitments. The accumulator itself lives in the RSA group Z_N^* of
//! unknown order; see `rsa`.
use crate::hash::{Transcribe, Transcript};
use crate::num::{is_prime, mod_exp, mul_mod, PARAMGEN_PRIMALITY_ROUNDS};
use rug::Integer;
use serde::{Deserialize, Serialize};

mod rsa;
pub use rsa::{QrnCommitmentGroup, RSA2048_MODULUS};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntegerGroupParams {
  #[serde(with = "crate::serialize::integer")]
  pub modulus: Integer,
  #[serde(with = "crate::serialize::integer")]
  pub order: Integer,
  #[serde(with = "crate::serialize::integer")]
  pub g: Integer,
  #[serde(with = "crate::serialize::integer")]
  pub h: Integer,
}

impl IntegerGroupParams {
  pub fn op(&self, a: &Integer, b: &Integer) -> Integer {
    mul_mod(a, b, &self.modulus)
  }

  /// `base^exp mod p` for a non-negative exponent.
  pub fn exp(&self, base: &Integer, exp: &Integer) -> Integer {
    mod_exp(base, exp, &self.modulus)
  }

  /// Pedersen commitment `g^contents * h^randomness mod p`.
  pub fn commit(&self, contents: &Integer, randomness: &Integer) -> Integer {
    self.op(&self.exp(&self.g, contents), &self.exp(&self.h, randomness))
  }

  /// Checks that p and q are prime, q divides p - 1, and g and h are non-trivial elements of the
  /// order-q subgroup.
  pub fn validate(&self) -> bool {
    let one = Integer::from(1);
    let p_minus_one = Integer::from(&self.modulus - 1);
    is_prime(&self.modulus, PARAMGEN_PRIMALITY_ROUNDS)
      && is_prime(&self.order, PARAMGEN_PRIMALITY_ROUNDS)
      && p_minus_one.is_divisible(&self.order)
      && self.g > one
      && self.h > one
      && self.g < self.modulus
      && self.h < self.modulus
      && self.g != self.h
      && self.exp(&self.g, &self.order) == one
      && self.exp(&self.h, &self.order) == one
  }
}

impl Transcribe for IntegerGroupParams {
  fn transcribe(&self, transcript: &mut Transcript) {
    transcript
      .append(&self.modulus)
      .append(&self.order)
      .append(&self.g)
      .append(&self.h);
  }
}
