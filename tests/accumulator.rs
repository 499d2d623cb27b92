mod common;

use common::{accumulate, init_logger, mint, params, public_coins};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rug::Integer;
use zerocoin::{Accumulator, AccumulatorWitness, CoinDenomination, PublicCoin, ZerocoinError};

#[test]
fn test_order_independence() {
  init_logger();
  let coins = public_coins(&mint(8, 1));
  let mut reference = Accumulator::new(params(), CoinDenomination::One);
  reference.accumulate_all(&coins).unwrap();

  let mut rng = StdRng::seed_from_u64(2);
  for _ in 0..10 {
    let mut shuffled = coins.clone();
    shuffled.shuffle(&mut rng);
    let mut acc = Accumulator::new(params(), CoinDenomination::One);
    for coin in &shuffled {
      acc.add(coin).unwrap();
    }
    assert_eq!(acc, reference);
  }
}

#[test]
fn test_witness_for_every_member() {
  let coins = mint(5, 3);
  for index in 0..coins.len() {
    let (acc, witness) = accumulate(&coins, index);
    for (other, coin) in coins.iter().enumerate() {
      assert_eq!(witness.verify(&acc, coin.public_coin()), other == index);
    }
  }
}

#[test]
fn test_witness_for_non_member() {
  let coins = mint(4, 4);
  let outsider = mint(1, 5).remove(0);
  let (acc, _) = accumulate(&coins, 0);
  let mut witness = AccumulatorWitness::new(
    &Accumulator::new(params(), CoinDenomination::One),
    outsider.public_coin().clone(),
  );
  for coin in &coins {
    witness.add_element(coin.public_coin()).unwrap();
  }
  assert!(!witness.verify(&acc, outsider.public_coin()));
}

#[test]
fn test_denominations_do_not_mix() {
  let coin = mint(1, 6).remove(0);
  let mut acc = Accumulator::new(params(), CoinDenomination::OneHundred);
  assert!(matches!(acc.add(coin.public_coin()), Err(ZerocoinError::InvalidMember(_))));
  assert_eq!(*acc.value(), params().accumulator.base);
}

#[test]
fn test_round_trips() {
  let coins = public_coins(&mint(3, 7));
  let mut acc = Accumulator::new(params(), CoinDenomination::One);
  acc.accumulate_all(&coins).unwrap();

  let decoded = Accumulator::decode(params(), &acc.encode().unwrap()).unwrap();
  assert_eq!(decoded, acc);
  for coin in &coins {
    assert_eq!(&PublicCoin::decode(&coin.encode().unwrap()).unwrap(), coin);
  }
}

#[test]
fn test_decode_rejects_out_of_range_value() {
  let acc = Accumulator::new(params(), CoinDenomination::One);
  let mut bytes = acc.encode().unwrap();
  // The value 961 encodes as the two bytes 0x03 0xc1 after the sign and length; rewrite it to 1.
  let position = bytes.iter().position(|&b| b == 0x03).unwrap();
  bytes[position] = 0x01;
  bytes.remove(position + 1);
  bytes[1] = 1;
  assert!(matches!(
    Accumulator::decode(params(), &bytes),
    Err(ZerocoinError::Serialization(_))
  ));
}

#[test]
fn test_with_value_rejects_out_of_range() {
  let modulus = params().accumulator.modulus.clone();
  for value in vec![Integer::from(0), Integer::from(1), modulus.clone(), modulus + 1u32] {
    assert!(matches!(
      Accumulator::with_value(params(), CoinDenomination::One, value),
      Err(ZerocoinError::InvalidAccumulator(_))
    ));
  }
}
