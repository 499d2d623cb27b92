//! Proof that two commitments, in two different integer groups, open to the same value.
use crate::commitment::Commitment;
use crate::error::{Result, ZerocoinError};
use crate::group::IntegerGroupParams;
use crate::hash::{Transcribe, Transcript, HASH_OUTPUT_BITS};
use crate::num::pow_mod;
use crate::util::{int, random_bits};
use rand::{CryptoRng, RngCore};
use rug::Integer;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const COMMITMENT_EQUALITY_LABEL: &str = "ZEROCOIN_COMMITMENT_EQUALITY_PROOF";

/// Slack on top of the largest group size when sampling the blinding values. Covers the
/// challenge width plus a statistical hiding margin.
const RANDOMNESS_MARGIN_BITS: u32 = HASH_OUTPUT_BITS + 512;

#[allow(non_snake_case)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentProofOfKnowledge {
  #[serde(with = "crate::serialize::integer")]
  S1: Integer,
  #[serde(with = "crate::serialize::integer")]
  S2: Integer,
  #[serde(with = "crate::serialize::integer")]
  S3: Integer,
  #[serde(with = "crate::serialize::integer")]
  challenge: Integer,
}

fn randomness_bits(group_a: &IntegerGroupParams, group_b: &IntegerGroupParams) -> u32 {
  let largest = [
    &group_a.modulus,
    &group_a.order,
    &group_b.modulus,
    &group_b.order,
  ]
  .iter()
  .map(|x| x.significant_bits())
  .max()
  .unwrap_or(0);
  RANDOMNESS_MARGIN_BITS + largest
}

fn challenge(
  group_a: &IntegerGroupParams,
  group_b: &IntegerGroupParams,
  a: &Integer,
  b: &Integer,
  t1: &Integer,
  t2: &Integer,
) -> Integer {
  let mut transcript = Transcript::new();
  transcript
    .append(COMMITMENT_EQUALITY_LABEL)
    .append(t1)
    .append(t2)
    .append(a)
    .append(b)
    .append(group_a)
    .append(group_b);
  transcript.finalize()
}

impl CommitmentProofOfKnowledge {
  /// Proves that `a` and `b` hide the same contents. Fails if they do not, or if either was made
  /// in a group other than the one given.
  pub fn prove<R: RngCore + CryptoRng>(
    group_a: &IntegerGroupParams,
    group_b: &IntegerGroupParams,
    a: &Commitment,
    b: &Commitment,
    rng: &mut R,
  ) -> Result<Self> {
    if a.contents() != b.contents() {
      return Err(ZerocoinError::InvalidSpend(
        "commitments hide different values".to_owned(),
      ));
    }
    if a.group() != group_a || b.group() != group_b {
      return Err(ZerocoinError::InvalidSpend(
        "commitment made in an unexpected group".to_owned(),
      ));
    }

    let bits = randomness_bits(group_a, group_b);
    let r1 = random_bits(rng, bits);
    let r2 = random_bits(rng, bits);
    let r3 = random_bits(rng, bits);

    let t1 = group_a.commit(&r1, &r2);
    let t2 = group_b.commit(&r1, &r3);
    let c = challenge(group_a, group_b, a.value(), b.value(), &t1, &t2);

    Ok(CommitmentProofOfKnowledge {
      S1: r1 + int(a.contents() * &c),
      S2: r2 + int(a.randomness() * &c),
      S3: r3 + int(b.randomness() * &c),
      challenge: c,
    })
  }

  /// Checks the proof against the public commitment values `a` (in `group_a`) and `b` (in
  /// `group_b`).
  pub fn verify(
    &self,
    group_a: &IntegerGroupParams,
    group_b: &IntegerGroupParams,
    a: &Integer,
    b: &Integer,
  ) -> bool {
    self.check(group_a, group_b, a, b).unwrap_or(false)
  }

  fn check(
    &self,
    group_a: &IntegerGroupParams,
    group_b: &IntegerGroupParams,
    a: &Integer,
    b: &Integer,
  ) -> Option<bool> {
    let in_group = |x: &Integer, group: &IntegerGroupParams| *x > 0 && *x < group.modulus;
    if !in_group(a, group_a) || !in_group(b, group_b) {
      return Some(false);
    }

    let max_bits = randomness_bits(group_a, group_b) + 1;
    let well_formed = |s: &Integer| s.cmp0() != Ordering::Less && s.significant_bits() <= max_bits;
    if !(well_formed(&self.S1) && well_formed(&self.S2) && well_formed(&self.S3)) {
      return Some(false);
    }
    if self.challenge.cmp0() == Ordering::Less || self.challenge.significant_bits() > HASH_OUTPUT_BITS {
      return Some(false);
    }

    let minus_c = int(-&self.challenge);
    // T1 = A^-c * g1^S1 * h1^S2, T2 = B^-c * g2^S1 * h2^S3
    let t1 = group_a.op(&pow_mod(a, &minus_c, &group_a.modulus)?, &group_a.commit(&self.S1, &self.S2));
    let t2 = group_b.op(&pow_mod(b, &minus_c, &group_b.modulus)?, &group_b.commit(&self.S1, &self.S3));

    Some(challenge(group_a, group_b, a, b, &t1, &t2) == self.challenge)
  }
}

impl Transcribe for CommitmentProofOfKnowledge {
  fn transcribe(&self, transcript: &mut Transcript) {
    transcript
      .append(&self.S1)
      .append(&self.S2)
      .append(&self.S3)
      .append(&self.challenge);
  }
}
