//! RSA accumulator over coin commitments, and membership witnesses.
//!
//! The accumulator starts at the base `u` and absorbs each coin `c` as `A <- A^c mod N`. Since
//! exponentiation commutes, the value depends only on the multiset of coins added. A witness for
//! coin `c` is the accumulator of every other coin, so that `w^c mod N == A`.
use crate::coin::{CoinDenomination, PublicCoin};
use crate::error::{Result, ZerocoinError};
use crate::num::mod_exp;
use crate::params::Params;
use crate::serialize;
use rug::Integer;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug)]
pub struct Accumulator<'a> {
  params: &'a Params,
  denomination: CoinDenomination,
  value: Integer,
}

#[derive(Serialize, Deserialize)]
struct EncodedAccumulator {
  #[serde(with = "crate::serialize::integer")]
  value: Integer,
  denomination: CoinDenomination,
}

impl<'a> Accumulator<'a> {
  /// An empty accumulator, holding the base.
  pub fn new(params: &'a Params, denomination: CoinDenomination) -> Self {
    Accumulator {
      params,
      denomination,
      value: params.accumulator.base.clone(),
    }
  }

  /// Resumes an accumulator from a previously published value, which must lie in `(1, N)`.
  pub fn with_value(params: &'a Params, denomination: CoinDenomination, value: Integer) -> Result<Self> {
    if value <= 1 || value >= params.accumulator.modulus {
      return Err(ZerocoinError::InvalidAccumulator(
        "value out of range".to_owned(),
      ));
    }
    Ok(Accumulator {
      params,
      denomination,
      value,
    })
  }

  #[allow(clippy::should_implement_trait)]
  /// Absorbs `coin`. Fails without changing the value if the coin has another denomination or
  /// is not a valid accumulator member.
  pub fn add(&mut self, coin: &PublicCoin) -> Result<&mut Self> {
    if coin.denomination() != self.denomination {
      return Err(ZerocoinError::InvalidMember(format!(
        "coin denomination {:?} does not match accumulator denomination {:?}",
        coin.denomination(),
        self.denomination
      )));
    }
    if !coin.validate(self.params) {
      return Err(ZerocoinError::InvalidMember(
        "coin is not prime or out of range".to_owned(),
      ));
    }
    self.value = mod_exp(&self.value, coin.value(), &self.params.accumulator.modulus);
    Ok(self)
  }

  /// Adds every coin in `coins`, in order, stopping at the first failure.
  pub fn accumulate_all<'c, I>(&mut self, coins: I) -> Result<&mut Self>
  where
    I: IntoIterator<Item = &'c PublicCoin>,
  {
    for coin in coins {
      self.add(coin)?;
    }
    Ok(self)
  }

  pub fn value(&self) -> &Integer {
    &self.value
  }

  pub fn params(&self) -> &'a Params {
    self.params
  }

  pub fn denomination(&self) -> CoinDenomination {
    self.denomination
  }

  /// True when both accumulators were built under equal parameters.
  pub fn shares_params(&self, other: &Params) -> bool {
    std::ptr::eq(self.params, other) || *self.params == *other
  }

  pub fn encode(&self) -> Result<Vec<u8>> {
    serialize::encode(&EncodedAccumulator {
      value: self.value.clone(),
      denomination: self.denomination,
    })
  }

  /// Decodes a value produced by `encode` and binds it to `params`.
  pub fn decode(params: &'a Params, bytes: &[u8]) -> Result<Self> {
    let EncodedAccumulator {
      value,
      denomination,
    } = serialize::decode(bytes)?;
    Accumulator::with_value(params, denomination, value)
      .map_err(|_| ZerocoinError::Serialization("accumulator value out of range".to_owned()))
  }
}

impl PartialEq for Accumulator<'_> {
  fn eq(&self, other: &Self) -> bool {
    self.denomination == other.denomination
      && self.value == other.value
      && self.shares_params(other.params)
  }
}

impl Eq for Accumulator<'_> {}

/// Membership witness for one coin: the accumulator of all members except that coin.
#[derive(Clone, Debug)]
pub struct AccumulatorWitness<'a> {
  witness: Accumulator<'a>,
  element: PublicCoin,
}

impl<'a> AccumulatorWitness<'a> {
  /// `checkpoint` must not already contain `coin`.
  pub fn new(checkpoint: &Accumulator<'a>, coin: PublicCoin) -> Self {
    AccumulatorWitness {
      witness: checkpoint.clone(),
      element: coin,
    }
  }

  /// Re-bases the witness on a new checkpoint and designated coin.
  pub fn reset_value(&mut self, checkpoint: &Accumulator<'a>, coin: PublicCoin) {
    self.witness = checkpoint.clone();
    self.element = coin;
  }

  /// Tracks a coin added to the accumulator after the checkpoint. The designated coin itself is
  /// skipped.
  pub fn add_element(&mut self, coin: &PublicCoin) -> Result<&mut Self> {
    if *coin != self.element {
      self.witness.add(coin)?;
    }
    Ok(self)
  }

  pub fn value(&self) -> &Integer {
    self.witness.value()
  }

  pub fn accumulator(&self) -> &Accumulator<'a> {
    &self.witness
  }

  pub fn element(&self) -> &PublicCoin {
    &self.element
  }

  /// Whether this witness proves `coin` is in `accumulator`.
  pub fn verify(&self, accumulator: &Accumulator, coin: &PublicCoin) -> bool {
    if *coin != self.element || !accumulator.shares_params(self.witness.params) {
      return false;
    }
    let modulus = &accumulator.params.accumulator.modulus;
    mod_exp(self.witness.value(), coin.value(), modulus) == *accumulator.value()
  }
}
