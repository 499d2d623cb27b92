//! Pedersen commitments `g^contents * h^randomness mod p` in an `IntegerGroupParams`.
use crate::group::IntegerGroupParams;
use crate::util::random_below;
use rand::{CryptoRng, RngCore};
use rug::Integer;
use std::fmt;

/// A commitment together with its opening. Only `value` is ever published.
#[derive(Clone)]
pub struct Commitment<'a> {
  group: &'a IntegerGroupParams,
  contents: Integer,
  randomness: Integer,
  value: Integer,
}

impl<'a> Commitment<'a> {
  /// Commits to `contents` with fresh randomness below the group order.
  pub fn new<R: RngCore + CryptoRng>(
    group: &'a IntegerGroupParams,
    contents: Integer,
    rng: &mut R,
  ) -> Self {
    let randomness = random_below(rng, &group.order);
    Self::with_randomness(group, contents, randomness)
  }

  pub fn with_randomness(group: &'a IntegerGroupParams, contents: Integer, randomness: Integer) -> Self {
    let value = group.commit(&contents, &randomness);
    Commitment {
      group,
      contents,
      randomness,
      value,
    }
  }

  pub fn group(&self) -> &'a IntegerGroupParams {
    self.group
  }

  pub fn contents(&self) -> &Integer {
    &self.contents
  }

  pub fn randomness(&self) -> &Integer {
    &self.randomness
  }

  pub fn value(&self) -> &Integer {
    &self.value
  }
}

impl fmt::Debug for Commitment<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Commitment")
      .field("group", self.group)
      .field("value", &self.value)
      .finish()
  }
}
