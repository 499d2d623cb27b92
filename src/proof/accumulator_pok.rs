//! Proof that a value committed in the accumulator proof-of-knowledge group is accumulated.
//!
//! This is the Camenisch–Lysyanskaya membership proof. The prover holds a coin `e`, a commitment
//! `C = sg^e sh^r mod p` and a witness `u` with `u^e = A mod N`. It commits to `e`, `u` and the
//! blinding in the QRN group mod N, and shows that the exponent inside `C` is the one that takes
//! `u` to `A`, that it lies in the coin range, and that it is neither 1 nor -1 modulo the group
//! order.
use crate::accumulator::{Accumulator, AccumulatorWitness};
use crate::commitment::Commitment;
use crate::error::{Result, ZerocoinError};
use crate::hash::{Transcribe, Transcript, HASH_OUTPUT_BITS};
use crate::num::{invert, modulo, multi_pow_mod};
use crate::params::AccumulatorParams;
use crate::util::{int, random_below, random_signed_below};
use rand::{CryptoRng, RngCore};
use rug::Integer;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulatorProofOfKnowledge {
  #[serde(with = "crate::serialize::integer")]
  c_e: Integer,
  #[serde(with = "crate::serialize::integer")]
  c_u: Integer,
  #[serde(with = "crate::serialize::integer")]
  c_r: Integer,

  #[serde(with = "crate::serialize::integer")]
  st_1: Integer,
  #[serde(with = "crate::serialize::integer")]
  st_2: Integer,
  #[serde(with = "crate::serialize::integer")]
  st_3: Integer,

  #[serde(with = "crate::serialize::integer")]
  t_1: Integer,
  #[serde(with = "crate::serialize::integer")]
  t_2: Integer,
  #[serde(with = "crate::serialize::integer")]
  t_3: Integer,
  #[serde(with = "crate::serialize::integer")]
  t_4: Integer,

  #[serde(with = "crate::serialize::integer")]
  s_alpha: Integer,
  #[serde(with = "crate::serialize::integer")]
  s_beta: Integer,
  #[serde(with = "crate::serialize::integer")]
  s_zeta: Integer,
  #[serde(with = "crate::serialize::integer")]
  s_sigma: Integer,
  #[serde(with = "crate::serialize::integer")]
  s_eta: Integer,
  #[serde(with = "crate::serialize::integer")]
  s_epsilon: Integer,
  #[serde(with = "crate::serialize::integer")]
  s_delta: Integer,
  #[serde(with = "crate::serialize::integer")]
  s_xi: Integer,
  #[serde(with = "crate::serialize::integer")]
  s_phi: Integer,
  #[serde(with = "crate::serialize::integer")]
  s_gamma: Integer,
  #[serde(with = "crate::serialize::integer")]
  s_psi: Integer,
}

fn failed(what: &str) -> ZerocoinError {
  ZerocoinError::InvalidSpend(format!("accumulator proof: {}", what))
}

struct Commitments<'p> {
  c_e: &'p Integer,
  c_u: &'p Integer,
  c_r: &'p Integer,
  st: [&'p Integer; 3],
  t: [&'p Integer; 4],
}

/// Magnitude bounds on the prover's blinding values.
struct BlindingBounds {
  alpha: Integer,
  blind: Integer,
  product: Integer,
}

impl BlindingBounds {
  fn new(params: &AccumulatorParams) -> Self {
    let slack = int(1) << (params.k_prime + params.k_dprime);
    let blind = int(int(&params.modulus / 4u32) * &slack);
    BlindingBounds {
      alpha: int(&params.max_coin_value * &slack),
      product: int(&blind * &params.pok_group.modulus),
      blind,
    }
  }
}

fn challenge(params: &AccumulatorParams, commitment: &Integer, commitments: &Commitments) -> Integer {
  let mut transcript = Transcript::new();
  transcript
    .append(params)
    .append(&params.pok_group.g)
    .append(&params.pok_group.h)
    .append(&params.qrn_group.g)
    .append(&params.qrn_group.h)
    .append(commitment)
    .append(commitments.c_e)
    .append(commitments.c_u)
    .append(commitments.c_r);
  for x in commitments.st.iter().chain(commitments.t.iter()) {
    transcript.append(*x);
  }
  transcript.finalize()
}

impl AccumulatorProofOfKnowledge {
  /// Proves that the contents of `commitment`, a commitment in the accumulator PoK group, are a
  /// coin accumulated in `accumulator`, using `witness` for that coin.
  pub fn prove<R: RngCore + CryptoRng>(
    commitment: &Commitment,
    witness: &AccumulatorWitness,
    accumulator: &Accumulator,
    rng: &mut R,
  ) -> Result<Self> {
    let params = &accumulator.params().accumulator;
    let n = &params.modulus;
    let group = &params.pok_group;
    let q = &group.order;
    let p = &group.modulus;
    let (sg, sh) = (&group.g, &group.h);
    let (g_n, h_n) = (&params.qrn_group.g, &params.qrn_group.h);

    if commitment.group() != group {
      return Err(failed("commitment is not in the proof of knowledge group"));
    }
    let e = commitment.contents();
    let r = commitment.randomness();
    if witness.element().value() != e {
      return Err(failed("witness is for a different coin"));
    }
    if !witness.verify(accumulator, witness.element()) {
      return Err(failed("witness does not match the accumulator"));
    }
    let u = witness.value();

    let n_quarter = int(n / 4u32);
    let r_1 = random_below(rng, &n_quarter);
    let r_2 = random_below(rng, &n_quarter);
    let r_3 = random_below(rng, &n_quarter);

    let qrn = |terms: &[(&Integer, &Integer)]| {
      multi_pow_mod(terms, n).ok_or_else(|| failed("QRN base not invertible mod N"))
    };
    let pok = |terms: &[(&Integer, &Integer)]| {
      multi_pow_mod(terms, p).ok_or_else(|| failed("base not invertible in the PoK group"))
    };

    let one = int(1);
    let c_e = qrn(&[(g_n, e), (h_n, &r_1)])?;
    let c_u = qrn(&[(u, &one), (h_n, &r_2)])?;
    let c_r = qrn(&[(g_n, &r_2), (h_n, &r_3)])?;

    let bounds = BlindingBounds::new(params);
    let r_alpha = random_signed_below(rng, &bounds.alpha);
    let r_gamma = random_below(rng, p);
    let r_phi = random_below(rng, p);
    let r_psi = random_below(rng, p);
    let r_sigma = random_below(rng, p);
    let r_xi = random_below(rng, p);
    let r_epsilon = random_signed_below(rng, &bounds.blind);
    let r_eta = random_signed_below(rng, &bounds.blind);
    let r_zeta = random_signed_below(rng, &bounds.blind);
    let r_beta = random_signed_below(rng, &bounds.product);
    let r_delta = random_signed_below(rng, &bounds.product);

    let c = commitment.value();
    let minus_one = int(-1);
    let c_over_sg = pok(&[(c, &one), (sg, &minus_one)])?;
    let sg_times_c = group.op(sg, c);

    let st_1 = pok(&[(sg, &r_alpha), (sh, &r_phi)])?;
    let st_2 = pok(&[(&c_over_sg, &r_gamma), (sh, &r_psi)])?;
    let st_3 = pok(&[(&sg_times_c, &r_sigma), (sh, &r_xi)])?;

    let h_n_inv = qrn(&[(h_n, &minus_one)])?;
    let g_n_inv = qrn(&[(g_n, &minus_one)])?;
    let t_1 = qrn(&[(h_n, &r_zeta), (g_n, &r_epsilon)])?;
    let t_2 = qrn(&[(h_n, &r_eta), (g_n, &r_alpha)])?;
    let t_3 = qrn(&[(&c_u, &r_alpha), (&h_n_inv, &r_beta)])?;
    let t_4 = qrn(&[(&c_r, &r_alpha), (&h_n_inv, &r_delta), (&g_n_inv, &r_beta)])?;

    let ch = challenge(
      params,
      c,
      &Commitments {
        c_e: &c_e,
        c_u: &c_u,
        c_r: &c_r,
        st: [&st_1, &st_2, &st_3],
        t: [&t_1, &t_2, &t_3, &t_4],
      },
    );

    let e_plus_one_inv = invert(&int(e + 1u32), q).ok_or_else(|| failed("coin is -1 mod q"))?;
    let e_minus_one_inv = invert(&int(e - 1u32), q).ok_or_else(|| failed("coin is 1 mod q"))?;

    Ok(AccumulatorProofOfKnowledge {
      s_alpha: r_alpha - int(&ch * e),
      s_beta: r_beta - int(&ch * &r_2) * e,
      s_zeta: r_zeta - int(&ch * &r_3),
      s_sigma: modulo(r_sigma - int(&ch * &e_plus_one_inv), q),
      s_eta: r_eta - int(&ch * &r_1),
      s_epsilon: r_epsilon - int(&ch * &r_2),
      s_delta: r_delta - int(&ch * &r_3) * e,
      s_xi: r_xi + int(&ch * r) * &e_plus_one_inv,
      s_phi: modulo(r_phi - int(&ch * r), q),
      s_gamma: r_gamma - int(&ch * &e_minus_one_inv),
      s_psi: r_psi + int(&ch * r) * &e_minus_one_inv,
      c_e,
      c_u,
      c_r,
      st_1,
      st_2,
      st_3,
      t_1,
      t_2,
      t_3,
      t_4,
    })
  }

  /// Checks that `commitment`, a value in the accumulator PoK group, hides a coin accumulated in
  /// `accumulator`.
  pub fn verify(&self, accumulator: &Accumulator, commitment: &Integer) -> bool {
    self.check(accumulator, commitment).unwrap_or(false)
  }

  fn check(&self, accumulator: &Accumulator, commitment: &Integer) -> Option<bool> {
    let params = &accumulator.params().accumulator;
    let n = &params.modulus;
    let group = &params.pok_group;
    let q = &group.order;
    let p = &group.modulus;
    let (sg, sh) = (&group.g, &group.h);
    let (g_n, h_n) = (&params.qrn_group.g, &params.qrn_group.h);
    let a = accumulator.value();
    let c = commitment;

    if *c <= 0 || c >= p {
      return Some(false);
    }
    let bounds = BlindingBounds::new(params);
    let alpha_limit = bounds.alpha << 1u32;
    if *self.s_alpha.as_abs() > alpha_limit {
      debug!("accumulator proof: s_alpha out of range");
      return Some(false);
    }
    // Each response is a blinding value plus the challenge times secrets of known size. The
    // coin may be wider than p.
    let widen = HASH_OUTPUT_BITS + 1;
    let product_limit = int(&bounds.blind * int(p + &params.max_coin_value)) << widen;
    let blind_limit = bounds.blind << widen;
    let p_limit = p.clone() << widen;
    let pq_limit = int(p * q) << widen;
    let within = |x: &Integer, limit: &Integer| *x.as_abs() <= *limit;
    let reduced = |x: &Integer| *x >= 0 && x < q;
    let in_range = within(&self.s_beta, &product_limit)
      && within(&self.s_delta, &product_limit)
      && within(&self.s_zeta, &blind_limit)
      && within(&self.s_eta, &blind_limit)
      && within(&self.s_epsilon, &blind_limit)
      && within(&self.s_gamma, &p_limit)
      && within(&self.s_xi, &pq_limit)
      && within(&self.s_psi, &pq_limit)
      && reduced(&self.s_sigma)
      && reduced(&self.s_phi);
    if !in_range {
      debug!("accumulator proof: response out of range");
      return Some(false);
    }

    let ch = challenge(
      params,
      c,
      &Commitments {
        c_e: &self.c_e,
        c_u: &self.c_u,
        c_r: &self.c_r,
        st: [&self.st_1, &self.st_2, &self.st_3],
        t: [&self.t_1, &self.t_2, &self.t_3, &self.t_4],
      },
    );

    let one = int(1);
    let minus_one = int(-1);
    let c_over_sg = multi_pow_mod(&[(c, &one), (sg, &minus_one)], p)?;
    let sg_times_c = group.op(sg, c);
    let h_n_inv = multi_pow_mod(&[(h_n, &minus_one)], n)?;
    let g_n_inv = multi_pow_mod(&[(g_n, &minus_one)], n)?;

    let st_1 = multi_pow_mod(&[(c, &ch), (sg, &self.s_alpha), (sh, &self.s_phi)], p)?;
    let st_2 = multi_pow_mod(&[(sg, &ch), (&c_over_sg, &self.s_gamma), (sh, &self.s_psi)], p)?;
    let st_3 = multi_pow_mod(&[(sg, &ch), (&sg_times_c, &self.s_sigma), (sh, &self.s_xi)], p)?;

    let t_1 = multi_pow_mod(&[(&self.c_r, &ch), (h_n, &self.s_zeta), (g_n, &self.s_epsilon)], n)?;
    let t_2 = multi_pow_mod(&[(&self.c_e, &ch), (h_n, &self.s_eta), (g_n, &self.s_alpha)], n)?;
    let t_3 = multi_pow_mod(&[(a, &ch), (&self.c_u, &self.s_alpha), (&h_n_inv, &self.s_beta)], n)?;
    let t_4 = multi_pow_mod(
      &[(&self.c_r, &self.s_alpha), (&h_n_inv, &self.s_delta), (&g_n_inv, &self.s_beta)],
      n,
    )?;

    let matches = st_1 == self.st_1
      && st_2 == self.st_2
      && st_3 == self.st_3
      && t_1 == self.t_1
      && t_2 == self.t_2
      && t_3 == self.t_3
      && t_4 == self.t_4;
    if !matches {
      debug!("accumulator proof: commitments do not match the responses");
    }
    Some(matches)
  }
}

impl Transcribe for AccumulatorProofOfKnowledge {
  fn transcribe(&self, transcript: &mut Transcript) {
    let items = [
      &self.c_e,
      &self.c_u,
      &self.c_r,
      &self.st_1,
      &self.st_2,
      &self.st_3,
      &self.t_1,
      &self.t_2,
      &self.t_3,
      &self.t_4,
      &self.s_alpha,
      &self.s_beta,
      &self.s_zeta,
      &self.s_sigma,
      &self.s_eta,
      &self.s_epsilon,
      &self.s_delta,
      &self.s_xi,
      &self.s_phi,
      &self.s_gamma,
      &self.s_psi,
    ];
    for x in items.iter() {
      transcript.append(*x);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::coin::{CoinDenomination, PublicCoin};
  use crate::test_util::{init_logger, test_coins, test_params};
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn setup() -> (Accumulator<'static>, AccumulatorWitness<'static>, Vec<PublicCoin>) {
    let params = test_params();
    let coins: Vec<PublicCoin> = test_coins().iter().map(|c| c.public_coin().clone()).collect();
    let mut acc = Accumulator::new(params, CoinDenomination::One);
    let mut witness = AccumulatorWitness::new(&acc, coins[0].clone());
    for coin in &coins {
      acc.add(coin).unwrap();
      witness.add_element(coin).unwrap();
    }
    (acc, witness, coins)
  }

  #[test]
  fn test_prove_verify() {
    init_logger();
    let (acc, witness, coins) = setup();
    let group = &acc.params().accumulator.pok_group;
    let mut rng = StdRng::seed_from_u64(21);
    let commitment = Commitment::new(group, coins[0].value().clone(), &mut rng);
    let proof = AccumulatorProofOfKnowledge::prove(&commitment, &witness, &acc, &mut rng).unwrap();
    assert!(proof.verify(&acc, commitment.value()));

    // Different commitment, or an accumulator without the coin.
    let other = Commitment::new(group, coins[1].value().clone(), &mut rng);
    assert!(!proof.verify(&acc, other.value()));
    let mut smaller = Accumulator::new(acc.params(), CoinDenomination::One);
    smaller.accumulate_all(&coins[1..]).unwrap();
    assert!(!proof.verify(&smaller, commitment.value()));
  }

  #[test]
  fn test_rejects_tampering() {
    let (acc, witness, coins) = setup();
    let group = &acc.params().accumulator.pok_group;
    let mut rng = StdRng::seed_from_u64(22);
    let commitment = Commitment::new(group, coins[0].value().clone(), &mut rng);
    let proof = AccumulatorProofOfKnowledge::prove(&commitment, &witness, &acc, &mut rng).unwrap();

    let mut tampered = proof.clone();
    tampered.s_beta += 1u32;
    assert!(!tampered.verify(&acc, commitment.value()));

    let mut tampered = proof.clone();
    tampered.t_2 += 1u32;
    assert!(!tampered.verify(&acc, commitment.value()));

    let mut out_of_range = proof;
    out_of_range.s_alpha = int(&acc.params().accumulator.max_coin_value) << 300;
    assert!(!out_of_range.verify(&acc, commitment.value()));
  }

  #[test]
  fn test_rejects_oversized_responses() {
    let (acc, witness, coins) = setup();
    let params = &acc.params().accumulator;
    let mut rng = StdRng::seed_from_u64(24);
    let commitment = Commitment::new(&params.pok_group, coins[0].value().clone(), &mut rng);
    let proof = AccumulatorProofOfKnowledge::prove(&commitment, &witness, &acc, &mut rng).unwrap();
    assert!(proof.verify(&acc, commitment.value()));

    // Far past any honest width; rejected before any exponentiation.
    let huge = int(1) << 100_000;
    let mut tampered = proof.clone();
    tampered.s_beta = huge.clone();
    assert!(!tampered.verify(&acc, commitment.value()));
    let mut tampered = proof.clone();
    tampered.s_delta = -huge.clone();
    assert!(!tampered.verify(&acc, commitment.value()));
    let mut tampered = proof.clone();
    tampered.s_zeta = huge.clone();
    assert!(!tampered.verify(&acc, commitment.value()));
    let mut tampered = proof.clone();
    tampered.s_xi = huge;
    assert!(!tampered.verify(&acc, commitment.value()));

    // These two are reduced mod the group order.
    let mut tampered = proof.clone();
    tampered.s_sigma += &params.pok_group.order;
    assert!(!tampered.verify(&acc, commitment.value()));
    let mut tampered = proof;
    tampered.s_phi = int(-1);
    assert!(!tampered.verify(&acc, commitment.value()));
  }

  #[test]
  fn test_prove_rejects_mismatched_inputs() {
    let (acc, witness, coins) = setup();
    let params = acc.params();
    let mut rng = StdRng::seed_from_u64(23);

    let wrong_coin = Commitment::new(&params.accumulator.pok_group, coins[1].value().clone(), &mut rng);
    assert!(matches!(
      AccumulatorProofOfKnowledge::prove(&wrong_coin, &witness, &acc, &mut rng),
      Err(ZerocoinError::InvalidSpend(_))
    ));

    let wrong_group = Commitment::new(&params.serial_number_sok_group, coins[0].value().clone(), &mut rng);
    assert!(matches!(
      AccumulatorProofOfKnowledge::prove(&wrong_group, &witness, &acc, &mut rng),
      Err(ZerocoinError::InvalidSpend(_))
    ));

    let stale = Accumulator::new(params, CoinDenomination::One);
    let commitment = Commitment::new(&params.accumulator.pok_group, coins[0].value().clone(), &mut rng);
    assert!(matches!(
      AccumulatorProofOfKnowledge::prove(&commitment, &witness, &stale, &mut rng),
      Err(ZerocoinError::InvalidSpend(_))
    ));
  }
}
