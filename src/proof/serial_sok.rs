//! Signature of knowledge of a coin opening with a public serial number.
//!
//! Given a commitment `C = g^(a^s b^r mod p) h^R mod p'` in the serial number group (whose order
//! is the coin group modulus `p`), the prover shows it knows `r` and `R` for the revealed serial
//! `s`, and signs a message hash along the way. It is a cut-and-choose proof with one challenge
//! bit per round; `zkp_iterations` rounds give that many bits of soundness.
use crate::commitment::Commitment;
use crate::error::{Result, ZerocoinError};
use crate::hash::{Transcribe, Transcript, HASH_LENGTH_IN_BYTES};
use crate::num::{modulo, mul_mod, multi_pow_mod};
use crate::params::Params;
use crate::util::{int, random_below};
use rand::{CryptoRng, RngCore};
use rug::Integer;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialNumberSignatureOfKnowledge {
  #[serde(with = "crate::serialize::integers")]
  s_notprime: Vec<Integer>,
  #[serde(with = "crate::serialize::integers")]
  sprime: Vec<Integer>,
  #[serde(with = "serde_bytes")]
  hash: Vec<u8>,
}

fn challenge(
  params: &Params,
  commitment: &Integer,
  serial_number: &Integer,
  msghash: &Integer,
  c: &[Integer],
) -> [u8; HASH_LENGTH_IN_BYTES] {
  let mut transcript = Transcript::new();
  transcript
    .append(params)
    .append(commitment)
    .append(serial_number)
    .append(msghash)
    .append(c);
  transcript.finalize_bytes()
}

fn challenge_bit(hash: &[u8], i: usize) -> bool {
  (hash[i / 8] >> (i % 8)) & 1 == 1
}

impl SerialNumberSignatureOfKnowledge {
  /// Signs `msghash` with knowledge of the opening of `commitment`, which must commit to the
  /// coin `a^serial_number b^randomness` in the serial number group.
  pub fn prove<R: RngCore + CryptoRng>(
    params: &Params,
    serial_number: &Integer,
    randomness: &Integer,
    commitment: &Commitment,
    msghash: &Integer,
    rng: &mut R,
  ) -> Result<Self> {
    let coin_group = &params.coin_commitment_group;
    let serial_group = &params.serial_number_sok_group;
    let iterations = params.zkp_iterations as usize;
    if iterations > HASH_LENGTH_IN_BYTES * 8 {
      return Err(ZerocoinError::InvalidSpend(format!(
        "{} rounds need more challenge bits than the hash provides",
        iterations
      )));
    }
    if commitment.group() != serial_group {
      return Err(ZerocoinError::InvalidSpend(
        "serial commitment is not in the serial number group".to_owned(),
      ));
    }
    if *commitment.contents() != coin_group.commit(serial_number, randomness) {
      return Err(ZerocoinError::InvalidSpend(
        "serial commitment does not hide this coin".to_owned(),
      ));
    }

    // a^s is fixed across rounds.
    let a_exp_s = coin_group.exp(&coin_group.g, serial_number);
    let mut r = Vec::with_capacity(iterations);
    let mut v = Vec::with_capacity(iterations);
    let mut c = Vec::with_capacity(iterations);
    for _ in 0..iterations {
      let r_i = random_below(rng, &coin_group.order);
      let v_i = random_below(rng, &serial_group.order);
      let exponent = coin_group.op(&a_exp_s, &coin_group.exp(&coin_group.h, &r_i));
      c.push(serial_group.commit(&exponent, &v_i));
      r.push(r_i);
      v.push(v_i);
    }

    let hash = challenge(params, commitment.value(), serial_number, msghash, &c);

    let mut s_notprime = Vec::with_capacity(iterations);
    let mut sprime = Vec::with_capacity(iterations);
    for (i, (r_i, v_i)) in r.into_iter().zip(v.into_iter()).enumerate() {
      if challenge_bit(&hash, i) {
        s_notprime.push(r_i);
        sprime.push(v_i);
      } else {
        let s_i = modulo(r_i - randomness, &coin_group.order);
        // R * b^(r_i - r) must be removed from v_i for the verifier's C^(b^s_i) to line up.
        let shift = mul_mod(
          commitment.randomness(),
          &coin_group.exp(&coin_group.h, &s_i),
          &serial_group.order,
        );
        sprime.push(modulo(v_i - shift, &serial_group.order));
        s_notprime.push(s_i);
      }
    }

    Ok(SerialNumberSignatureOfKnowledge {
      s_notprime,
      sprime,
      hash: hash.to_vec(),
    })
  }

  /// Checks the signature on `msghash` against the revealed serial number and the serial
  /// commitment value.
  pub fn verify(
    &self,
    params: &Params,
    serial_number: &Integer,
    commitment: &Integer,
    msghash: &Integer,
  ) -> bool {
    self
      .check(params, serial_number, commitment, msghash)
      .unwrap_or(false)
  }

  fn check(
    &self,
    params: &Params,
    serial_number: &Integer,
    commitment: &Integer,
    msghash: &Integer,
  ) -> Option<bool> {
    let coin_group = &params.coin_commitment_group;
    let serial_group = &params.serial_number_sok_group;
    let iterations = params.zkp_iterations as usize;
    if self.s_notprime.len() != iterations
      || self.sprime.len() != iterations
      || self.hash.len() != HASH_LENGTH_IN_BYTES
      || iterations > HASH_LENGTH_IN_BYTES * 8
    {
      return Some(false);
    }
    if *serial_number <= 0 || *commitment <= 0 || *commitment >= serial_group.modulus {
      return Some(false);
    }
    let in_range = |x: &Integer, bound: &Integer| *x >= 0 && x < bound;
    let a_exp_s = coin_group.exp(&coin_group.g, serial_number);

    let mut c = Vec::with_capacity(iterations);
    for (i, (s_i, sprime_i)) in self.s_notprime.iter().zip(self.sprime.iter()).enumerate() {
      if !in_range(s_i, &coin_group.order) || !in_range(sprime_i, &serial_group.order) {
        return Some(false);
      }
      let b_exp_s = coin_group.exp(&coin_group.h, s_i);
      let c_i = if challenge_bit(&self.hash, i) {
        let exponent = coin_group.op(&a_exp_s, &b_exp_s);
        serial_group.commit(&exponent, sprime_i)
      } else {
        multi_pow_mod(&[(commitment, &b_exp_s), (&serial_group.h, sprime_i)], &serial_group.modulus)?
      };
      c.push(c_i);
    }

    let expected = challenge(params, commitment, serial_number, msghash, &c);
    Some(expected[..] == self.hash[..])
  }

  #[cfg(test)]
  fn rounds(&self) -> usize {
    self.s_notprime.len()
  }
}

impl Transcribe for SerialNumberSignatureOfKnowledge {
  fn transcribe(&self, transcript: &mut Transcript) {
    transcript
      .append(&self.s_notprime[..])
      .append(&self.sprime[..])
      .append(&self.hash[..]);
  }
}
