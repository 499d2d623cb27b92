//! BLAKE2b transcripts for seeds and Fiat-Shamir challenges.
//!
//! Every item is absorbed with an explicit length prefix so that two different sequences of
//! items can never produce the same byte stream.
use blake2_rfc::blake2b::Blake2b;
use rug::integer::Order;
use rug::Integer;
use std::cmp::Ordering;

// 32 bytes = 256 bits.
pub const HASH_LENGTH_IN_BYTES: usize = 32;
pub const HASH_OUTPUT_BITS: u32 = 256;

/// Anything that can be absorbed into a `Transcript`.
pub trait Transcribe {
  fn transcribe(&self, transcript: &mut Transcript);
}

pub struct Transcript(Blake2b);

impl Default for Transcript {
  fn default() -> Self {
    Transcript(Blake2b::new(HASH_LENGTH_IN_BYTES))
  }
}

impl Transcript {
  pub fn new() -> Self {
    Self::default()
  }

  /// Absorbs `bytes` behind a big-endian u64 length prefix.
  pub fn write(&mut self, bytes: &[u8]) {
    self.0.update(&(bytes.len() as u64).to_be_bytes());
    self.0.update(bytes);
  }

  pub fn append<T: Transcribe + ?Sized>(&mut self, item: &T) -> &mut Self {
    item.transcribe(self);
    self
  }

  pub fn finalize_bytes(self) -> [u8; HASH_LENGTH_IN_BYTES] {
    let mut out = [0u8; HASH_LENGTH_IN_BYTES];
    out.copy_from_slice(self.0.finalize().as_bytes());
    out
  }

  /// The digest read as a big-endian 256-bit integer.
  pub fn finalize(self) -> Integer {
    Integer::from_digits(&self.finalize_bytes(), Order::Msf)
  }
}

impl Transcribe for Integer {
  fn transcribe(&self, transcript: &mut Transcript) {
    let sign: u8 = match self.cmp0() {
      Ordering::Less => 1,
      _ => 0,
    };
    transcript.write(&[sign]);
    transcript.write(&self.as_abs().to_digits::<u8>(Order::Msf));
  }
}

impl Transcribe for str {
  fn transcribe(&self, transcript: &mut Transcript) {
    transcript.write(self.as_bytes());
  }
}

impl Transcribe for u32 {
  fn transcribe(&self, transcript: &mut Transcript) {
    transcript.write(&self.to_be_bytes());
  }
}

impl Transcribe for [u8] {
  fn transcribe(&self, transcript: &mut Transcript) {
    transcript.write(self);
  }
}

impl Transcribe for [Integer] {
  fn transcribe(&self, transcript: &mut Transcript) {
    (self.len() as u32).transcribe(transcript);
    for x in self {
      x.transcribe(transcript);
    }
  }
}
