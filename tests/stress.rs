mod common;

use common::{accumulate, init_logger, params, public_coins};
use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use zerocoin::{verify_batch, Accumulator, CoinDenomination, CoinSpend, PrivateCoin, SpendMetaData};

/// Mints 100 coins in parallel, checks that accumulation order never matters, then spends a
/// handful of them against the full accumulator and verifies the spends as a batch.
/// Takes several minutes.
#[test]
#[ignore]
fn stress_test() {
  init_logger();
  let coins = PrivateCoin::mint_batch(params(), CoinDenomination::One, 100, &mut StdRng::seed_from_u64(200)).unwrap();
  let mut publics = public_coins(&coins);

  let mut reference = Accumulator::new(params(), CoinDenomination::One);
  reference.accumulate_all(&publics).unwrap();
  for _ in 0..10 {
    publics.shuffle(&mut OsRng);
    let mut acc = Accumulator::new(params(), CoinDenomination::One);
    acc.accumulate_all(&publics).unwrap();
    assert_eq!(acc, reference);
  }

  let metadata = SpendMetaData::new(100, 100);
  let mut spends = Vec::new();
  for index in (0..coins.len()).step_by(20) {
    let (acc, witness) = accumulate(&coins, index);
    assert_eq!(acc, reference);
    spends.push(CoinSpend::new(params(), &coins[index], &acc, &witness, &metadata, &mut OsRng).unwrap());
  }
  assert!(verify_batch(&spends, &reference, &metadata).into_iter().all(|ok| ok));

  let mut serials: Vec<_> = spends.iter().map(|s| s.serial_number().clone()).collect();
  serials.sort();
  serials.dedup();
  assert_eq!(serials.len(), spends.len());
}
