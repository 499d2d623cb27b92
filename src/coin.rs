//! Minting coins.
//!
//! A coin is a commitment `a^serial * b^randomness mod p` in the coin commitment group. The
//! commitment is public and is what gets accumulated; the serial number is revealed only when
//! the coin is spent, and the randomness never leaves its owner.
use crate::error::{Result, ZerocoinError};
use crate::hash::{Transcribe, Transcript};
use crate::num::is_prime;
use crate::params::{Params, MAX_COINMINT_ATTEMPTS};
use crate::serialize;
use crate::util::{int, random_below};
use rand::{CryptoRng, RngCore, SeedableRng};
use rayon::prelude::*;
use rug::Integer;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinDenomination {
  One,
  Ten,
  TwentyFive,
  Fifty,
  OneHundred,
}

impl CoinDenomination {
  pub fn value(self) -> u32 {
    match self {
      CoinDenomination::One => 1,
      CoinDenomination::Ten => 10,
      CoinDenomination::TwentyFive => 25,
      CoinDenomination::Fifty => 50,
      CoinDenomination::OneHundred => 100,
    }
  }
}

impl Default for CoinDenomination {
  fn default() -> Self {
    CoinDenomination::One
  }
}

impl Transcribe for CoinDenomination {
  fn transcribe(&self, transcript: &mut Transcript) {
    transcript.append(&self.value());
  }
}

/// The public half of a coin: its commitment value and denomination.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicCoin {
  #[serde(with = "crate::serialize::integer")]
  value: Integer,
  denomination: CoinDenomination,
}

impl PublicCoin {
  pub fn new(value: Integer, denomination: CoinDenomination) -> Self {
    PublicCoin {
      value,
      denomination,
    }
  }

  pub fn value(&self) -> &Integer {
    &self.value
  }

  pub fn denomination(&self) -> CoinDenomination {
    self.denomination
  }

  /// A well-formed accumulator member: strictly inside the coin range and prime.
  pub fn validate(&self, params: &Params) -> bool {
    let acc = &params.accumulator;
    acc.min_coin_value < self.value
      && self.value < acc.max_coin_value
      && is_prime(&self.value, params.zkp_iterations)
  }

  pub fn encode(&self) -> Result<Vec<u8>> {
    serialize::encode(self)
  }

  pub fn decode(bytes: &[u8]) -> Result<Self> {
    serialize::decode(bytes)
  }
}

#[derive(Clone)]
pub struct PrivateCoin {
  public: PublicCoin,
  serial_number: Integer,
  randomness: Integer,
}

impl PrivateCoin {
  /// Samples serial numbers and randomness until the commitment is a valid accumulator member.
  pub fn new<R: RngCore + CryptoRng>(
    params: &Params,
    denomination: CoinDenomination,
    rng: &mut R,
  ) -> Result<Self> {
    let group = &params.coin_commitment_group;
    let serial_bound = int(&group.order - 1u32);
    for attempt in 0..MAX_COINMINT_ATTEMPTS {
      let serial_number = random_below(rng, &serial_bound) + 1u32;
      let randomness = random_below(rng, &group.order);
      let public = PublicCoin::new(group.commit(&serial_number, &randomness), denomination);
      if public.validate(params) {
        trace!("minted coin after {} attempts", attempt + 1);
        return Ok(PrivateCoin {
          public,
          serial_number,
          randomness,
        });
      }
    }
    warn!("coin minting exhausted {} attempts", MAX_COINMINT_ATTEMPTS);
    Err(ZerocoinError::CoinGenerationExhausted(MAX_COINMINT_ATTEMPTS))
  }

  /// Mints `count` coins in parallel. Each task gets its own generator, seeded from `rng`
  /// before any minting starts, so a seeded `rng` gives the same batch every time.
  pub fn mint_batch<R>(
    params: &Params,
    denomination: CoinDenomination,
    count: usize,
    rng: &mut R,
  ) -> Result<Vec<Self>>
  where
    R: RngCore + CryptoRng + SeedableRng + Send,
  {
    let task_rngs: Vec<R> = (0..count)
      .map(|_| {
        let mut seed = R::Seed::default();
        rng.fill_bytes(seed.as_mut());
        R::from_seed(seed)
      })
      .collect();
    task_rngs
      .into_par_iter()
      .map(|mut task_rng| PrivateCoin::new(params, denomination, &mut task_rng))
      .collect()
  }

  pub fn public_coin(&self) -> &PublicCoin {
    &self.public
  }

  pub fn serial_number(&self) -> &Integer {
    &self.serial_number
  }

  pub fn randomness(&self) -> &Integer {
    &self.randomness
  }
}

impl fmt::Debug for PrivateCoin {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("PrivateCoin")
      .field("public", &self.public)
      .finish()
  }
}
