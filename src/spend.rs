//! Spending a coin.
//!
//! A `CoinSpend` reveals the coin's serial number and proves that it belongs to some coin in the
//! accumulator, without saying which one. The caller keeps the ledger of seen serial numbers;
//! two spends of one coin always reveal the same serial.
use crate::accumulator::{Accumulator, AccumulatorWitness};
use crate::coin::{CoinDenomination, PrivateCoin};
use crate::commitment::Commitment;
use crate::error::{Result, ZerocoinError};
use crate::hash::{Transcribe, Transcript};
use crate::params::Params;
use crate::proof::{
  AccumulatorProofOfKnowledge, CommitmentProofOfKnowledge, SerialNumberSignatureOfKnowledge,
};
use crate::serialize;
use rand::{CryptoRng, RngCore};
use rayon::prelude::*;
use rug::Integer;
use serde::{Deserialize, Serialize};

/// Transaction data a spend is bound to. A spend verifies only against the metadata it was
/// built with.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpendMetaData {
  #[serde(with = "crate::serialize::integer")]
  pub accumulator_id: Integer,
  #[serde(with = "crate::serialize::integer")]
  pub tx_hash: Integer,
}

impl SpendMetaData {
  pub fn new(accumulator_id: impl Into<Integer>, tx_hash: impl Into<Integer>) -> Self {
    SpendMetaData {
      accumulator_id: accumulator_id.into(),
      tx_hash: tx_hash.into(),
    }
  }

  pub fn encode(&self) -> Result<Vec<u8>> {
    serialize::encode(self)
  }

  pub fn decode(bytes: &[u8]) -> Result<Self> {
    serialize::decode(bytes)
  }
}

impl Transcribe for SpendMetaData {
  fn transcribe(&self, transcript: &mut Transcript) {
    transcript.append(&self.accumulator_id).append(&self.tx_hash);
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinSpend {
  denomination: CoinDenomination,
  #[serde(with = "crate::serialize::integer")]
  serial_number: Integer,
  /// The coin committed in the serial number group.
  #[serde(with = "crate::serialize::integer")]
  serial_commitment: Integer,
  /// The coin committed in the accumulator proof of knowledge group.
  #[serde(with = "crate::serialize::integer")]
  accumulator_commitment: Integer,
  commitment_pok: CommitmentProofOfKnowledge,
  accumulator_pok: AccumulatorProofOfKnowledge,
  serial_sok: SerialNumberSignatureOfKnowledge,
}

fn invalid(what: &str) -> ZerocoinError {
  ZerocoinError::InvalidSpend(what.to_owned())
}

impl CoinSpend {
  /// Builds a spend of `coin`, which `witness` must show to be in `accumulator`, bound to
  /// `metadata`.
  pub fn new<R: RngCore + CryptoRng>(
    params: &Params,
    coin: &PrivateCoin,
    accumulator: &Accumulator,
    witness: &AccumulatorWitness,
    metadata: &SpendMetaData,
    rng: &mut R,
  ) -> Result<Self> {
    if !accumulator.shares_params(params) {
      return Err(invalid("accumulator was built under different params"));
    }
    let public = coin.public_coin();
    if public.denomination() != accumulator.denomination() {
      return Err(invalid("coin and accumulator denominations differ"));
    }
    if !witness.verify(accumulator, public) {
      return Err(invalid("witness does not verify for this coin"));
    }

    // Fresh randomness on both sides keeps two spends of unrelated coins unlinkable.
    let serial_commitment =
      Commitment::new(&params.serial_number_sok_group, public.value().clone(), rng);
    let accumulator_commitment =
      Commitment::new(&params.accumulator.pok_group, public.value().clone(), rng);

    let commitment_pok = CommitmentProofOfKnowledge::prove(
      &params.serial_number_sok_group,
      &params.accumulator.pok_group,
      &serial_commitment,
      &accumulator_commitment,
      rng,
    )?;
    let accumulator_pok =
      AccumulatorProofOfKnowledge::prove(&accumulator_commitment, witness, accumulator, rng)?;

    let msghash = signature_hash(
      metadata,
      serial_commitment.value(),
      accumulator_commitment.value(),
      &commitment_pok,
      &accumulator_pok,
      public.denomination(),
    );
    let serial_sok = SerialNumberSignatureOfKnowledge::prove(
      params,
      coin.serial_number(),
      coin.randomness(),
      &serial_commitment,
      &msghash,
      rng,
    )?;

    debug!("built spend for a {:?} coin", public.denomination());
    Ok(CoinSpend {
      denomination: public.denomination(),
      serial_number: coin.serial_number().clone(),
      serial_commitment: serial_commitment.value().clone(),
      accumulator_commitment: accumulator_commitment.value().clone(),
      commitment_pok,
      accumulator_pok,
      serial_sok,
    })
  }

  /// Checks the spend against `accumulator` and `metadata`. Every sub-proof must pass.
  pub fn verify(&self, accumulator: &Accumulator, metadata: &SpendMetaData) -> bool {
    let params = accumulator.params();
    if self.denomination != accumulator.denomination() {
      debug!("spend rejected: denomination mismatch");
      return false;
    }
    if self.serial_number <= 0 || self.serial_number >= params.coin_commitment_group.order {
      debug!("spend rejected: serial number out of range");
      return false;
    }
    if !self.commitment_pok.verify(
      &params.serial_number_sok_group,
      &params.accumulator.pok_group,
      &self.serial_commitment,
      &self.accumulator_commitment,
    ) {
      debug!("spend rejected: commitment proof of knowledge");
      return false;
    }
    if !self.accumulator_pok.verify(accumulator, &self.accumulator_commitment) {
      debug!("spend rejected: accumulator proof of knowledge");
      return false;
    }
    if !self.serial_sok.verify(
      params,
      &self.serial_number,
      &self.serial_commitment,
      &self.signature_hash(metadata),
    ) {
      debug!("spend rejected: serial number signature of knowledge");
      return false;
    }
    true
  }

  /// The hash the serial number signature signs, for the given metadata.
  pub fn signature_hash(&self, metadata: &SpendMetaData) -> Integer {
    signature_hash(
      metadata,
      &self.serial_commitment,
      &self.accumulator_commitment,
      &self.commitment_pok,
      &self.accumulator_pok,
      self.denomination,
    )
  }

  pub fn serial_number(&self) -> &Integer {
    &self.serial_number
  }

  pub fn denomination(&self) -> CoinDenomination {
    self.denomination
  }

  pub fn encode(&self) -> Result<Vec<u8>> {
    serialize::encode(self)
  }

  pub fn decode(bytes: &[u8]) -> Result<Self> {
    serialize::decode(bytes)
  }
}

fn signature_hash(
  metadata: &SpendMetaData,
  serial_commitment: &Integer,
  accumulator_commitment: &Integer,
  commitment_pok: &CommitmentProofOfKnowledge,
  accumulator_pok: &AccumulatorProofOfKnowledge,
  denomination: CoinDenomination,
) -> Integer {
  let mut transcript = Transcript::new();
  transcript
    .append(metadata)
    .append(serial_commitment)
    .append(accumulator_commitment)
    .append(commitment_pok)
    .append(accumulator_pok)
    .append(&denomination);
  transcript.finalize()
}

/// Verifies `spends` in parallel against one accumulator and metadata, in input order.
pub fn verify_batch(spends: &[CoinSpend], accumulator: &Accumulator, metadata: &SpendMetaData) -> Vec<bool> {
  spends
    .par_iter()
    .map(|spend| spend.verify(accumulator, metadata))
    .collect()
}
