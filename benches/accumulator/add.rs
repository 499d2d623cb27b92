/// See https://bheisler.github.io/criterion.rs/book/getting_started.html to add more benchmarks.
#[macro_use]
extern crate criterion;

use criterion::Criterion;
use rand::rngs::StdRng;
use rand::SeedableRng;
use zerocoin::{
  Accumulator, AccumulatorWitness, CoinDenomination, Params, PrivateCoin, PublicCoin,
  RSA2048_MODULUS,
};

fn bench_add(params: &Params, coins: &[PublicCoin]) {
  let mut acc = Accumulator::new(params, CoinDenomination::One);
  acc.accumulate_all(coins).unwrap();
}

fn bench_verify(acc: &Accumulator, witness: &AccumulatorWitness, coin: &PublicCoin) {
  assert!(witness.verify(acc, coin));
}

fn criterion_benchmark(c: &mut Criterion) {
  let params = Params::with_default_security(&RSA2048_MODULUS).unwrap();
  let coins: Vec<PublicCoin> = PrivateCoin::mint_batch(&params, CoinDenomination::One, 10, &mut StdRng::from_entropy())
    .unwrap()
    .iter()
    .map(|c| c.public_coin().clone())
    .collect();

  let mut acc = Accumulator::new(&params, CoinDenomination::One);
  let mut witness = AccumulatorWitness::new(&acc, coins[0].clone());
  for coin in &coins {
    acc.add(coin).unwrap();
    witness.add_element(coin).unwrap();
  }

  let mut group = c.benchmark_group("accumulator");
  group.sample_size(10);
  group.bench_function("add_1", |b| b.iter(|| bench_add(&params, &coins[0..1])));
  group.bench_function("add_10", |b| b.iter(|| bench_add(&params, &coins)));
  group.bench_function("witness_verify", |b| {
    b.iter(|| bench_verify(&acc, &witness, &coins[0]))
  });
  group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
