//! Non-interactive zero-knowledge proofs composed by a `CoinSpend`.
//!
//! All three are Fiat–Shamir transformed sigma protocols whose challenges come from a
//! `Transcript`. Provers return an error when handed inconsistent inputs; verifiers only ever
//! answer `true` or `false`.
mod accumulator_pok;
mod commitment_pok;
mod serial_sok;

pub use accumulator_pok::AccumulatorProofOfKnowledge;
pub use commitment_pok::CommitmentProofOfKnowledge;
pub use serial_sok::SerialNumberSignatureOfKnowledge;
