//! Public parameters for one session: every coin, accumulator and proof borrows a `Params`.
//!
//! All groups are derived deterministically from an RSA modulus N of unknown factorization, an
//! auxiliary label and a security level; see `generation`.
use crate::error::{Result, ZerocoinError};
use crate::group::{IntegerGroupParams, QrnCommitmentGroup};
use crate::hash::{Transcribe, Transcript};
use crate::num::mod_exp;
use crate::util::int;
use rug::Integer;

pub mod generation;
pub use generation::{
  calculate_group_generator, calculate_group_param_lengths, calculate_seed,
  derive_integer_group_from_order, derive_integer_group_params, generate_integer_from_seed,
  generate_random_prime, Seed,
};

pub const DEFAULT_SECURITY_LEVEL: u32 = 80;
pub const MIN_ACCUMULATOR_MODULUS_BITS: u32 = 1023;

pub const MAX_PRIMEGEN_ATTEMPTS: u32 = 10_000;
pub const MAX_GENERATOR_ATTEMPTS: u32 = 10_000;
pub const MAX_SCHNORRGEN_ATTEMPTS: u32 = 10_000;
pub const MAX_ACCUMGEN_ATTEMPTS: u32 = 10_000;
pub const MAX_COINMINT_ATTEMPTS: u32 = 10_000;

/// The accumulator base is `ACCUMULATOR_BASE_CONSTANT^2 mod N`.
pub const ACCUMULATOR_BASE_CONSTANT: u32 = 31;

pub const K_PRIME: u32 = 160;
pub const K_DPRIME: u32 = 128;

pub const COIN_COMMITMENT_GROUP_TAG: &str = "COIN_COMMITMENT_GROUP";
pub const ACCUMULATOR_POK_GROUP_TAG: &str = "ACCUMULATOR_INTERNAL_COMMITMENT_GROUP";
pub const QRN_COMMITMENT_G_TAG: &str = "ACCUMULATOR_QRN_COMMITMENT_G";
pub const QRN_COMMITMENT_H_TAG: &str = "ACCUMULATOR_QRN_COMMITMENT_H";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccumulatorParams {
  /// RSA modulus N.
  pub modulus: Integer,
  /// Starting value of every accumulator.
  pub base: Integer,
  /// Schnorr group hosting the commitment to the coin inside the accumulator proof.
  pub pok_group: IntegerGroupParams,
  pub qrn_group: QrnCommitmentGroup,
  /// Coins must lie strictly between these bounds.
  pub min_coin_value: Integer,
  pub max_coin_value: Integer,
  pub k_prime: u32,
  pub k_dprime: u32,
}

impl Transcribe for AccumulatorParams {
  fn transcribe(&self, transcript: &mut Transcript) {
    transcript
      .append(&self.modulus)
      .append(&self.base)
      .append(&self.pok_group)
      .append(&self.qrn_group)
      .append(&self.min_coin_value)
      .append(&self.max_coin_value)
      .append(&self.k_prime)
      .append(&self.k_dprime);
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
  pub accumulator: AccumulatorParams,
  /// Group in which coins commit to their serial number.
  pub coin_commitment_group: IntegerGroupParams,
  /// Group whose order is the coin group's modulus; hosts the serial number signature of
  /// knowledge.
  pub serial_number_sok_group: IntegerGroupParams,
  pub security_level: u32,
  /// Rounds of the serial number signature of knowledge; one challenge bit each.
  pub zkp_iterations: u32,
  pub zkp_hash_len: u32,
}

impl Params {
  /// Derives every group from `modulus`, `aux` and `security_level`.
  pub fn new(modulus: &Integer, aux: &str, security_level: u32) -> Result<Self> {
    let modulus_bits = modulus.significant_bits();
    if modulus_bits < MIN_ACCUMULATOR_MODULUS_BITS {
      return Err(ZerocoinError::ParameterGeneration(format!(
        "accumulator modulus has {} bits, at least {} required",
        modulus_bits, MIN_ACCUMULATOR_MODULUS_BITS
      )));
    }
    let (p_len, q_len) = calculate_group_param_lengths(modulus_bits - 2, security_level)?;
    info!(
      "deriving params: {}-bit accumulator modulus, security level {}, coin group ({}, {})",
      modulus_bits, security_level, p_len, q_len
    );

    let coin_commitment_group = derive_integer_group_params(
      &calculate_seed(modulus, aux, security_level, COIN_COMMITMENT_GROUP_TAG),
      p_len,
      q_len,
    )?;
    let serial_number_sok_group = derive_integer_group_from_order(&coin_commitment_group.modulus)?;
    let pok_group = derive_integer_group_params(
      &calculate_seed(modulus, aux, security_level, ACCUMULATOR_POK_GROUP_TAG),
      q_len + 300,
      q_len + 1,
    )?;

    let qrn_group = QrnCommitmentGroup {
      g: Self::qrn_generator(modulus, aux, security_level, QRN_COMMITMENT_G_TAG),
      h: Self::qrn_generator(modulus, aux, security_level, QRN_COMMITMENT_H_TAG),
    };
    let base = Self::accumulator_base(modulus)?;

    let max_coin_value = coin_commitment_group.modulus.clone();
    let min_coin_value = int(1) << (max_coin_value.significant_bits() / 2 + 3);

    Ok(Params {
      accumulator: AccumulatorParams {
        modulus: modulus.clone(),
        base,
        pok_group,
        qrn_group,
        min_coin_value,
        max_coin_value,
        k_prime: K_PRIME,
        k_dprime: K_DPRIME,
      },
      coin_commitment_group,
      serial_number_sok_group,
      security_level,
      zkp_iterations: security_level,
      zkp_hash_len: security_level,
    })
  }

  /// `Params::new` with the default security level and an empty label.
  pub fn with_default_security(modulus: &Integer) -> Result<Self> {
    Self::new(modulus, "", DEFAULT_SECURITY_LEVEL)
  }

  // Squaring a seed-expanded value lands in the quadratic residues mod N.
  fn qrn_generator(modulus: &Integer, aux: &str, security_level: u32, tag: &str) -> Integer {
    let seed = calculate_seed(modulus, aux, security_level, tag);
    let x = generate_integer_from_seed(modulus.significant_bits() - 1, &seed);
    mod_exp(&x, &int(2), modulus)
  }

  fn accumulator_base(modulus: &Integer) -> Result<Integer> {
    let mut constant = int(ACCUMULATOR_BASE_CONSTANT);
    for _ in 0..MAX_ACCUMGEN_ATTEMPTS {
      let base = mod_exp(&constant, &int(2), modulus);
      if base > 1 {
        return Ok(base);
      }
      constant += 1u32;
    }
    Err(ZerocoinError::ParameterGeneration(
      "unable to find an accumulator base".to_owned(),
    ))
  }
}

impl Transcribe for Params {
  fn transcribe(&self, transcript: &mut Transcript) {
    transcript
      .append(&self.accumulator)
      .append(&self.coin_commitment_group)
      .append(&self.serial_number_sok_group)
      .append(&self.security_level)
      .append(&self.zkp_iterations)
      .append(&self.zkp_hash_len);
  }
}
