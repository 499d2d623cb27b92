//! Zerocoin: anonymous coins built from an RSA accumulator and zero-knowledge proofs over
//! prime-order integer groups.
//!
//! A `Params` is derived once from an RSA modulus of unknown factorization. Coins are minted as
//! prime commitments to a secret serial number, accumulated by denomination, and later spent with
//! a `CoinSpend` that reveals the serial number and proves, without saying which, that it belongs
//! to some accumulated coin.
#![allow(clippy::many_single_char_names)]

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod accumulator;
pub mod coin;
pub mod commitment;
pub mod error;
pub mod group;
pub mod hash;
pub mod num;
pub mod params;
pub mod proof;
pub mod serialize;
pub mod spend;
pub mod util;

pub use accumulator::{Accumulator, AccumulatorWitness};
pub use coin::{CoinDenomination, PrivateCoin, PublicCoin};
pub use commitment::Commitment;
pub use error::{Result, ZerocoinError};
pub use group::{IntegerGroupParams, QrnCommitmentGroup, RSA2048_MODULUS};
pub use params::{AccumulatorParams, Params};
pub use proof::{AccumulatorProofOfKnowledge, CommitmentProofOfKnowledge, SerialNumberSignatureOfKnowledge};
pub use spend::{verify_batch, CoinSpend, SpendMetaData};
