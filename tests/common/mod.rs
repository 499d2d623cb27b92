#![allow(dead_code)]
use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::SeedableRng;
use zerocoin::{
  Accumulator, AccumulatorWitness, CoinDenomination, Params, PrivateCoin, PublicCoin,
  RSA2048_MODULUS,
};

lazy_static! {
  static ref PARAMS: Params = Params::with_default_security(&RSA2048_MODULUS).unwrap();
}

pub fn params() -> &'static Params {
  &PARAMS
}

pub fn init_logger() {
  let _ = env_logger::builder().is_test(true).try_init();
}

pub fn mint(count: usize, seed: u64) -> Vec<PrivateCoin> {
  let mut rng = StdRng::seed_from_u64(seed);
  (0..count)
    .map(|_| PrivateCoin::new(params(), CoinDenomination::One, &mut rng).unwrap())
    .collect()
}

pub fn public_coins(coins: &[PrivateCoin]) -> Vec<PublicCoin> {
  coins.iter().map(|c| c.public_coin().clone()).collect()
}

/// Accumulates every coin and tracks a witness for `coins[index]` alongside.
pub fn accumulate(
  coins: &[PrivateCoin],
  index: usize,
) -> (Accumulator<'static>, AccumulatorWitness<'static>) {
  let mut acc = Accumulator::new(params(), CoinDenomination::One);
  let mut witness = AccumulatorWitness::new(&acc, coins[index].public_coin().clone());
  for coin in coins {
    acc.add(coin.public_coin()).unwrap();
    witness.add_element(coin.public_coin()).unwrap();
  }
  (acc, witness)
}
