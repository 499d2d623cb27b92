/// See https://bheisler.github.io/criterion.rs/book/getting_started.html to add more benchmarks.
#[macro_use]
extern crate criterion;

use criterion::Criterion;
use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;
use zerocoin::{CoinDenomination, Params, PrivateCoin, RSA2048_MODULUS};

fn criterion_benchmark(c: &mut Criterion) {
  let params = Params::with_default_security(&RSA2048_MODULUS).unwrap();
  let mut group = c.benchmark_group("mint");
  group.sample_size(10);

  group.bench_function("mint_1", |b| {
    b.iter(|| PrivateCoin::new(&params, CoinDenomination::One, &mut OsRng).unwrap())
  });
  let mut rng = StdRng::from_entropy();
  group.bench_function("mint_batch_16", |b| {
    b.iter(|| PrivateCoin::mint_batch(&params, CoinDenomination::One, 16, &mut rng).unwrap())
  });
  let coin = PrivateCoin::new(&params, CoinDenomination::One, &mut OsRng).unwrap();
  group.bench_function("validate", |b| {
    b.iter(|| assert!(coin.public_coin().validate(&params)))
  });
  group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
