//! Deterministic, publicly reproducible derivation of integer groups from a seed.
//!
//! Anyone holding the same inputs re-derives exactly the same groups, so parties can agree on
//! public parameters without exchanging them.
use super::{MAX_GENERATOR_ATTEMPTS, MAX_PRIMEGEN_ATTEMPTS, MAX_SCHNORRGEN_ATTEMPTS};
use crate::error::{Result, ZerocoinError};
use crate::group::IntegerGroupParams;
use crate::hash::{Transcribe, Transcript, HASH_LENGTH_IN_BYTES, HASH_OUTPUT_BITS};
use crate::num::{is_prime, mod_exp, PARAMGEN_PRIMALITY_ROUNDS};
use crate::util::int;
use rug::integer::Order;
use rug::Integer;

/// The modulus search tries `MODULUS_SEARCH_FACTOR * p_len` candidates before giving up.
const MODULUS_SEARCH_FACTOR: u32 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seed([u8; HASH_LENGTH_IN_BYTES]);

impl Seed {
  pub fn from_bytes(bytes: [u8; HASH_LENGTH_IN_BYTES]) -> Self {
    Seed(bytes)
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.0
  }

  /// Child seed `H(self || label || index)`.
  pub fn derive(&self, label: &str, index: u32) -> Seed {
    let mut transcript = Transcript::new();
    transcript.append(self).append(label).append(&index);
    Seed(transcript.finalize_bytes())
  }
}

impl Transcribe for Seed {
  fn transcribe(&self, transcript: &mut Transcript) {
    transcript.write(&self.0);
  }
}

/// Bit lengths `(p_len, q_len)` of a Schnorr group whose discrete log problem matches
/// `security_level` bits of symmetric security.
pub fn calculate_group_param_lengths(max_modulus_bits: u32, security_level: u32) -> Result<(u32, u32)> {
  let (p_len, q_len) = match security_level {
    s if s < 80 => {
      return Err(ZerocoinError::ParameterGeneration(format!(
        "security level {} is below the minimum of 80 bits",
        s
      )))
    }
    s if s < 96 => (1024, 256),
    s if s <= 112 => (2048, 256),
    s if s <= 128 => (3072, 320),
    s => {
      return Err(ZerocoinError::ParameterGeneration(format!(
        "security level {} exceeds the supported maximum of 128 bits",
        s
      )))
    }
  };
  if p_len > max_modulus_bits {
    return Err(ZerocoinError::ParameterGeneration(format!(
      "security level {} needs a {}-bit modulus but at most {} bits are allowed",
      security_level, p_len, max_modulus_bits
    )));
  }
  Ok((p_len, q_len))
}

/// `H(modulus || "||" || security_level || "||" || aux || "||" || group_name)`.
pub fn calculate_seed(modulus: &Integer, aux: &str, security_level: u32, group_name: &str) -> Seed {
  let mut transcript = Transcript::new();
  transcript
    .append(modulus)
    .append("||")
    .append(&security_level)
    .append("||")
    .append(aux)
    .append("||")
    .append(group_name);
  Seed(transcript.finalize_bytes())
}

/// Expands `seed` into an integer of exactly `bits` bits (top bit set).
pub fn generate_integer_from_seed(bits: u32, seed: &Seed) -> Integer {
  debug_assert!(bits > 0);
  let blocks = (bits + HASH_OUTPUT_BITS - 1) / HASH_OUTPUT_BITS;
  let mut result = Integer::new();
  for count in 0..blocks {
    let block = Integer::from_digits(seed.derive("expand", count).as_bytes(), Order::Msf);
    result += block << (count * HASH_OUTPUT_BITS);
  }
  let top = int(1) << (bits - 1);
  result %= &top;
  result + top
}

/// First probable prime of exactly `bits` bits in the seed-determined candidate sequence.
/// Returns the prime together with a fresh seed for whatever is derived next.
pub fn generate_random_prime(bits: u32, seed: &Seed) -> Result<(Integer, Seed)> {
  for counter in 0..MAX_PRIMEGEN_ATTEMPTS {
    let mut candidate = generate_integer_from_seed(bits, &seed.derive("prime", counter));
    candidate.set_bit(0, true);
    if is_prime(&candidate, PARAMGEN_PRIMALITY_ROUNDS) {
      trace!("found {}-bit prime after {} candidates", bits, counter + 1);
      return Ok((candidate, seed.derive("prime-next", counter)));
    }
  }
  Err(ZerocoinError::ParameterGeneration(format!(
    "no {}-bit prime within {} attempts",
    bits, MAX_PRIMEGEN_ATTEMPTS
  )))
}

/// Finds a prime order q of `q_len` bits and a prime modulus p = 2tq + 1 of `p_len` bits.
/// Returns `(modulus, order, p_seed, q_seed)`.
fn calculate_group_modulus_and_order(
  seed: &Seed,
  p_len: u32,
  q_len: u32,
) -> Result<(Integer, Integer, Seed, Seed)> {
  if q_len + 2 > p_len {
    return Err(ZerocoinError::ParameterGeneration(format!(
      "order length {} leaves no room in a {}-bit modulus",
      q_len, p_len
    )));
  }
  let (order, q_seed) = generate_random_prime(q_len, seed)?;
  let p_seed = q_seed.derive("modulus", 0);

  let two_q = int(2) * &order;
  let x = generate_integer_from_seed(p_len, &p_seed);
  // t = ceil(x / 2q) puts 2tq + 1 at or above 2^(p_len - 1).
  let mut t = (x + &two_q - 1u32) / &two_q;
  let lower_t = ((int(1) << (p_len - 1)) + &two_q - 1u32) / &two_q;
  let limit = int(1) << p_len;

  for attempt in 0..MODULUS_SEARCH_FACTOR * p_len {
    let mut modulus = int(&two_q * &t) + 1u32;
    if modulus >= limit {
      t = lower_t.clone();
      modulus = int(&two_q * &t) + 1u32;
    }
    if is_prime(&modulus, PARAMGEN_PRIMALITY_ROUNDS) {
      debug!(
        "found {}-bit modulus with {}-bit order after {} candidates",
        modulus.significant_bits(),
        q_len,
        attempt + 1
      );
      return Ok((modulus, order, p_seed, q_seed));
    }
    t += 1u32;
  }
  Err(ZerocoinError::ParameterGeneration(format!(
    "no {}-bit prime modulus for the {}-bit order",
    p_len, q_len
  )))
}

/// Hashes `(seed, p_seed, q_seed, "ggen", index, count)` for increasing `count` and raises the
/// result to `(p - 1) / q` until it lands on a non-trivial element of the order-q subgroup.
pub fn calculate_group_generator(
  seed: &Seed,
  p_seed: &Seed,
  q_seed: &Seed,
  modulus: &Integer,
  order: &Integer,
  index: u32,
) -> Result<Integer> {
  if index > 255 {
    return Err(ZerocoinError::ParameterGeneration(format!(
      "generator index {} is out of range",
      index
    )));
  }
  let e = int(modulus - 1u32) / order;
  for count in 1..MAX_GENERATOR_ATTEMPTS {
    let mut transcript = Transcript::new();
    transcript
      .append(seed)
      .append(p_seed)
      .append(q_seed)
      .append("ggen")
      .append(&index)
      .append(&count);
    let w = transcript.finalize();
    let candidate = mod_exp(&w, &e, modulus);
    if candidate > 1 {
      return Ok(candidate);
    }
  }
  Err(ZerocoinError::ParameterGeneration(
    "unable to find a generator, too many attempts".to_owned(),
  ))
}

fn checked_group(group: IntegerGroupParams, p_len: u32, q_len: u32) -> Result<IntegerGroupParams> {
  if group.modulus.significant_bits() < p_len
    || group.order.significant_bits() < q_len
    || !group.validate()
  {
    return Err(ZerocoinError::ParameterGeneration(
      "derived group failed validation".to_owned(),
    ));
  }
  Ok(group)
}

/// Derives a group with a `p_len`-bit prime modulus, a `q_len`-bit prime order and two
/// generators `g`, `h` of the order-q subgroup, entirely from `seed`.
pub fn derive_integer_group_params(seed: &Seed, p_len: u32, q_len: u32) -> Result<IntegerGroupParams> {
  let (modulus, order, p_seed, q_seed) = calculate_group_modulus_and_order(seed, p_len, q_len)?;
  let g = calculate_group_generator(seed, &p_seed, &q_seed, &modulus, &order, 1)?;
  let h = calculate_group_generator(seed, &p_seed, &q_seed, &modulus, &order, 2)?;
  checked_group(IntegerGroupParams { modulus, order, g, h }, p_len, q_len)
}

/// Derives a group whose order is exactly `order`: the modulus is the first prime of the form
/// `2 * i * order + 1`.
pub fn derive_integer_group_from_order(order: &Integer) -> Result<IntegerGroupParams> {
  for i in 1..MAX_SCHNORRGEN_ATTEMPTS {
    let modulus = int(order * (2 * i)) + 1u32;
    if !is_prime(&modulus, PARAMGEN_PRIMALITY_ROUNDS) {
      continue;
    }
    debug!("found {}-bit modulus for a fixed order at i = {}", modulus.significant_bits(), i);
    let seed = calculate_seed(order, "", 128, "");
    let p_seed = seed.derive("p", 0);
    let q_seed = p_seed.derive("q", 0);
    let g = calculate_group_generator(&seed, &p_seed, &q_seed, &modulus, order, 1)?;
    let h = calculate_group_generator(&seed, &p_seed, &q_seed, &modulus, order, 2)?;
    let bits = order.significant_bits();
    return checked_group(
      IntegerGroupParams {
        modulus,
        order: order.clone(),
        g,
        h,
      },
      bits + 1,
      bits,
    );
  }
  Err(ZerocoinError::ParameterGeneration(format!(
    "no prime modulus of the form 2 * i * order + 1 within {} attempts",
    MAX_SCHNORRGEN_ATTEMPTS
  )))
}
