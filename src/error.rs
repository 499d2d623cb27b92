//! Errors surfaced by parameter generation, accumulation, minting, spending and decoding.
//!
//! A spend proof that fails to verify is not an error: `CoinSpend::verify` returns `false`.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZerocoinError {
  /// No suitable group was found within the bounded deterministic search, or the requested
  /// security level cannot be met.
  #[error("parameter generation failed: {0}")]
  ParameterGeneration(String),

  /// A value offered to an accumulator is out of range, composite or of the wrong denomination.
  #[error("invalid accumulator member: {0}")]
  InvalidMember(String),

  /// An accumulator value outside `(1, N)`.
  #[error("invalid accumulator: {0}")]
  InvalidAccumulator(String),

  /// Coin minting resampled this many times without producing a valid commitment.
  #[error("coin generation exhausted after {0} attempts")]
  CoinGenerationExhausted(u32),

  #[error("serialization error: {0}")]
  Serialization(String),

  /// Mismatched params, denomination or witness handed to the spend prover.
  #[error("invalid spend input: {0}")]
  InvalidSpend(String),
}

pub type Result<T> = std::result::Result<T, ZerocoinError>;

impl From<bincode::Error> for ZerocoinError {
  fn from(err: bincode::Error) -> Self {
    ZerocoinError::Serialization(err.to_string())
  }
}
