//! The RSA group Z_N^* used by the accumulator, with N of unknown factorization.
use crate::hash::{Transcribe, Transcript};
use rug::Integer;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// RSA-2048 modulus, taken from https://en.wikipedia.org/wiki/RSA_numbers#RSA-2048.
const RSA2048_MODULUS_DECIMAL: &str = "25195908475657893494027183240048398571429282126204032027777\
                                       13783604366202070759555626401852588078440691829064124951508\
                                       21892985591491761845028084891200728449926873928072877767359\
                                       71418347270261896375014971824691165077613379859095700097330\
                                       45974880842840179742910064245869181719511874612151517265463\
                                       22822168699875491824224336372590851418654620435767984233871\
                                       84774447920739934236584823824281198163815010674810451660377\
                                       30605620161967625613384414360383390441495263443219011465754\
                                       44541784240209246165157233507787077498171257724679629263863\
                                       56373289912154831438167899885040445364023527381951378636564\
                                       391212010397122822120720357";

lazy_static! {
  /// Nobody knows its factors, which makes it usable as an accumulator modulus without a trusted
  /// setup.
  pub static ref RSA2048_MODULUS: Integer =
    Integer::from_str(RSA2048_MODULUS_DECIMAL).unwrap_or_default();
}

/// Two quadratic residues mod N with unknown relative discrete log, used for the commitments
/// inside the accumulator proof of knowledge.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QrnCommitmentGroup {
  #[serde(with = "crate::serialize::integer")]
  pub g: Integer,
  #[serde(with = "crate::serialize::integer")]
  pub h: Integer,
}

impl Transcribe for QrnCommitmentGroup {
  fn transcribe(&self, transcript: &mut Transcript) {
    transcript.append(&self.g).append(&self.h);
  }
}
