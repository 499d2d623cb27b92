//! Byte-exact encoding of the public values that travel between prover and verifier.
//!
//! Values go through bincode with fixed-width little-endian integers. Every big integer is a
//! sign flag followed by a u64-length-prefixed big-endian magnitude with no leading zero byte,
//! so each value has exactly one encoding. Decoding rejects truncated input, trailing bytes and
//! anything longer than `MAX_ENCODED_LEN`.
use crate::error::Result;
use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Upper bound on any encoded value; also bounds allocations while decoding.
pub const MAX_ENCODED_LEN: u64 = 1 << 20;

fn options() -> impl Options {
  bincode::DefaultOptions::new()
    .with_fixint_encoding()
    .with_limit(MAX_ENCODED_LEN)
    .reject_trailing_bytes()
}

pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
  Ok(options().serialize(value)?)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
  Ok(options().deserialize(bytes)?)
}

/// `#[serde(with = "crate::serialize::integer")]` for `rug::Integer` fields.
pub mod integer {
  use rug::integer::Order;
  use rug::Integer;
  use serde::de::Error;
  use serde::{Deserialize, Deserializer, Serialize, Serializer};
  use serde_bytes::{ByteBuf, Bytes};
  use std::cmp::Ordering;

  pub fn serialize<S: Serializer>(value: &Integer, serializer: S) -> Result<S::Ok, S::Error> {
    let negative = value.cmp0() == Ordering::Less;
    let magnitude = value.as_abs().to_digits::<u8>(Order::Msf);
    (negative, Bytes::new(&magnitude)).serialize(serializer)
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Integer, D::Error> {
    let (negative, magnitude): (bool, ByteBuf) = Deserialize::deserialize(deserializer)?;
    if magnitude.first() == Some(&0) {
      return Err(D::Error::custom("integer magnitude has a leading zero byte"));
    }
    let value = Integer::from_digits(&magnitude, Order::Msf);
    if !negative {
      return Ok(value);
    }
    if value == 0 {
      return Err(D::Error::custom("negative zero"));
    }
    Ok(-value)
  }
}

/// `#[serde(with = "crate::serialize::integers")]` for `Vec<rug::Integer>` fields.
pub mod integers {
  use rug::Integer;
  use serde::{Deserialize, Deserializer, Serialize, Serializer};

  struct Borrowed<'a>(&'a Integer);

  impl Serialize for Borrowed<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
      super::integer::serialize(self.0, serializer)
    }
  }

  #[derive(Deserialize)]
  struct Owned(#[serde(with = "super::integer")] Integer);

  #[allow(clippy::ptr_arg)]
  pub fn serialize<S: Serializer>(values: &Vec<Integer>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(Borrowed))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Integer>, D::Error> {
    let owned: Vec<Owned> = Deserialize::deserialize(deserializer)?;
    Ok(owned.into_iter().map(|Owned(x)| x).collect())
  }
}
