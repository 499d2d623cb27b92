mod common;

use common::{accumulate, init_logger, mint, params};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use zerocoin::{verify_batch, Accumulator, CoinDenomination, CoinSpend, SpendMetaData, ZerocoinError};

#[test]
fn test_concrete_scenario() {
  init_logger();
  let params = params();
  assert_eq!(params.coin_commitment_group.modulus.significant_bits(), 1024);
  assert_eq!(params.coin_commitment_group.order.significant_bits(), 256);

  let coins = mint(5, 100);
  let (acc, witness) = accumulate(&coins, 0);
  assert!(witness.verify(&acc, coins[0].public_coin()));

  let mut rng = StdRng::seed_from_u64(101);
  let spend = CoinSpend::new(params, &coins[0], &acc, &witness, &SpendMetaData::new(1, 1), &mut rng).unwrap();
  assert!(spend.verify(&acc, &SpendMetaData::new(1, 1)));
  assert!(!spend.verify(&acc, &SpendMetaData::new(1, 2)));
}

#[test]
fn test_spend_round_trip() {
  let coins = mint(3, 110);
  let (acc, witness) = accumulate(&coins, 2);
  let metadata = SpendMetaData::new(9, 10);
  let mut rng = StdRng::seed_from_u64(111);
  let spend = CoinSpend::new(params(), &coins[2], &acc, &witness, &metadata, &mut rng).unwrap();

  let bytes = spend.encode().unwrap();
  let decoded = CoinSpend::decode(&bytes).unwrap();
  assert_eq!(decoded, spend);
  assert!(decoded.verify(&acc, &metadata));
  assert_eq!(decoded.encode().unwrap(), bytes);

  let meta_bytes = metadata.encode().unwrap();
  assert_eq!(SpendMetaData::decode(&meta_bytes).unwrap(), metadata);
}

#[test]
fn test_tampered_spend_rejected() {
  let coins = mint(3, 120);
  let (acc, witness) = accumulate(&coins, 1);
  let metadata = SpendMetaData::new(2, 3);
  let mut rng = StdRng::seed_from_u64(121);
  let spend = CoinSpend::new(params(), &coins[1], &acc, &witness, &metadata, &mut rng).unwrap();
  let bytes = spend.encode().unwrap();

  for _ in 0..40 {
    let mut tampered = bytes.clone();
    let position = rng.gen_range(0..tampered.len());
    tampered[position] ^= 1 << rng.gen_range(0..8);
    // Either the bytes no longer decode, or they decode to a spend that fails to verify.
    if let Ok(decoded) = CoinSpend::decode(&tampered) {
      assert!(!decoded.verify(&acc, &metadata), "flipped a bit at {}", position);
    }
  }
}

/// Walks an encoded spend and records one byte inside each field worth tampering with.
struct Fields<'a> {
  bytes: &'a [u8],
  at: usize,
  offsets: Vec<(&'static str, usize)>,
}

impl Fields<'_> {
  fn length(&mut self) -> usize {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&self.bytes[self.at..self.at + 8]);
    self.at += 8;
    u64::from_le_bytes(raw) as usize
  }

  /// Skips one integer. When `record` is set, keeps its last magnitude byte, or its sign byte
  /// if the integer is zero.
  fn integer(&mut self, name: &'static str, record: bool) {
    let sign = self.at;
    self.at += 1;
    let len = self.length();
    self.at += len;
    if record {
      self.offsets.push((name, if len == 0 { sign } else { self.at - 1 }));
    }
  }

  fn integers(&mut self, name: &'static str) {
    let count = self.length();
    for i in 0..count {
      self.integer(name, i == 0 || i + 1 == count);
    }
  }
}

#[test]
fn test_tampered_fields_rejected() {
  let coins = mint(3, 125);
  let (acc, witness) = accumulate(&coins, 0);
  let metadata = SpendMetaData::new(2, 4);
  let mut rng = StdRng::seed_from_u64(126);
  let spend = CoinSpend::new(params(), &coins[0], &acc, &witness, &metadata, &mut rng).unwrap();
  let bytes = spend.encode().unwrap();

  // Denomination tag, then the serial, both commitments and the three proofs.
  let mut fields = Fields {
    bytes: &bytes,
    at: 4,
    offsets: vec![("denomination", 0)],
  };
  fields.integer("serial number", true);
  fields.integer("serial commitment", true);
  fields.integer("accumulator commitment", true);
  for i in 0..4 {
    fields.integer("commitment proof", i == 0 || i == 3);
  }
  for i in 0..21 {
    fields.integer("accumulator proof", i == 0 || i == 20);
  }
  fields.integers("serial signature s");
  fields.integers("serial signature s'");
  let hash_len = fields.length();
  assert_eq!(hash_len, 32);
  let hash_start = fields.at;
  assert_eq!(hash_start + hash_len, bytes.len());
  fields.offsets.push(("serial signature hash", hash_start));
  fields.offsets.push(("serial signature hash", hash_start + hash_len - 1));

  for (name, offset) in &fields.offsets {
    let mut tampered = bytes.clone();
    tampered[*offset] ^= 1;
    if let Ok(decoded) = CoinSpend::decode(&tampered) {
      assert!(!decoded.verify(&acc, &metadata), "flipped the {} at byte {}", name, offset);
    }
  }
}

#[test]
fn test_double_spend_reveals_same_serial() {
  let coins = mint(4, 130);
  let (acc, witness) = accumulate(&coins, 0);
  let mut rng = StdRng::seed_from_u64(131);
  let first = CoinSpend::new(params(), &coins[0], &acc, &witness, &SpendMetaData::new(1, 1), &mut rng).unwrap();
  let second = CoinSpend::new(params(), &coins[0], &acc, &witness, &SpendMetaData::new(1, 2), &mut rng).unwrap();
  assert_eq!(first.serial_number(), second.serial_number());
  assert_ne!(first, second);

  let (_, other_witness) = accumulate(&coins, 3);
  let third = CoinSpend::new(params(), &coins[3], &acc, &other_witness, &SpendMetaData::new(1, 1), &mut rng).unwrap();
  assert_ne!(first.serial_number(), third.serial_number());
}

#[test]
fn test_spend_against_later_accumulator() {
  let coins = mint(4, 140);
  let (old_acc, witness) = accumulate(&coins[..3], 0);
  let mut new_acc = old_acc.clone();
  new_acc.add(coins[3].public_coin()).unwrap();

  let metadata = SpendMetaData::new(4, 4);
  let mut rng = StdRng::seed_from_u64(141);
  let spend = CoinSpend::new(params(), &coins[0], &old_acc, &witness, &metadata, &mut rng).unwrap();
  assert!(spend.verify(&old_acc, &metadata));
  assert!(!spend.verify(&new_acc, &metadata));
  // A stale witness cannot build a spend against the newer accumulator.
  assert!(matches!(
    CoinSpend::new(params(), &coins[0], &new_acc, &witness, &metadata, &mut rng),
    Err(ZerocoinError::InvalidSpend(_))
  ));
}

#[test]
fn test_verify_batch() {
  let coins = mint(3, 150);
  let metadata = SpendMetaData::new(5, 5);
  let mut rng = StdRng::seed_from_u64(151);
  let mut spends = Vec::new();
  let mut acc = Accumulator::new(params(), CoinDenomination::One);
  for index in 0..coins.len() {
    let (full, witness) = accumulate(&coins, index);
    spends.push(CoinSpend::new(params(), &coins[index], &full, &witness, &metadata, &mut rng).unwrap());
    acc = full;
  }
  assert_eq!(verify_batch(&spends, &acc, &metadata), vec![true; 3]);
  assert_eq!(verify_batch(&spends, &acc, &SpendMetaData::new(5, 6)), vec![false; 3]);
}
