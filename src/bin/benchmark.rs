/// Benchmark executable: derives parameters from a fresh test modulus and runs a battery of
/// named checks, timing each one.
///
/// Usage: `zerocoin-bench [security_level]`. Logging follows `RUST_LOG` and defaults to `info`.
extern crate zerocoin;
#[macro_use]
extern crate log;

use rand::rngs::{OsRng, StdRng};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rug::Integer;
use std::process;
use std::time::Instant;
use zerocoin::params::{
  calculate_group_param_lengths, calculate_seed, derive_integer_group_params, DEFAULT_SECURITY_LEVEL,
};
use zerocoin::util::random_bits;
use zerocoin::{
  Accumulator, AccumulatorWitness, CoinDenomination, CoinSpend, Params, PrivateCoin, PublicCoin,
  SpendMetaData, ZerocoinError,
};

const TEST_MODULUS_PRIME_BITS: u32 = 1024;
const COINS_PER_ACCUMULATOR: usize = 5;

#[derive(Default)]
struct Harness {
  passed: u32,
  failed: u32,
}

impl Harness {
  /// Runs `check`, logs its outcome and elapsed time, and hands back its output on success.
  fn run<T, F>(&mut self, name: &str, check: F) -> Option<T>
  where
    F: FnOnce() -> Result<T, String>,
  {
    info!("{}: running", name);
    let start = Instant::now();
    let outcome = check();
    let elapsed = start.elapsed();
    match outcome {
      Ok(value) => {
        self.passed += 1;
        info!("{}: PASS ({:.3}s)", name, elapsed.as_secs_f64());
        Some(value)
      }
      Err(reason) => {
        self.failed += 1;
        error!("{}: FAIL ({:.3}s): {}", name, elapsed.as_secs_f64(), reason);
        None
      }
    }
  }

  fn skip(&mut self, name: &str, missing: &str) {
    self.failed += 1;
    error!("{}: FAIL: skipped, needs {}", name, missing);
  }
}

fn ensure(condition: bool, reason: &str) -> Result<(), String> {
  if condition {
    Ok(())
  } else {
    Err(reason.to_owned())
  }
}

fn describe(err: ZerocoinError) -> String {
  err.to_string()
}

fn random_prime(bits: u32) -> Integer {
  let mut candidate = random_bits(&mut OsRng, bits);
  candidate.set_bit(bits - 1, true);
  candidate.next_prime()
}

/// A 2048-bit modulus whose factors are thrown away right after multiplication.
fn generate_test_modulus() -> Result<Integer, String> {
  let p = random_prime(TEST_MODULUS_PRIME_BITS);
  let q = random_prime(TEST_MODULUS_PRIME_BITS);
  let n = p * q;
  ensure(n.significant_bits() >= 2 * TEST_MODULUS_PRIME_BITS - 1, "modulus too short")?;
  Ok(n)
}

fn check_param_sizes() -> Result<(), String> {
  let cases = [(80, (1024, 256)), (96, (2048, 256)), (112, (2048, 256)), (128, (3072, 320))];
  for (level, expected) in cases.iter() {
    let lengths = calculate_group_param_lengths(4000, *level).map_err(describe)?;
    ensure(lengths == *expected, &format!("wrong lengths for level {}", level))?;
  }
  ensure(calculate_group_param_lengths(4000, 79).is_err(), "accepted level 79")?;
  ensure(calculate_group_param_lengths(4000, 129).is_err(), "accepted level 129")?;
  ensure(calculate_group_param_lengths(2000, 96).is_err(), "exceeded the modulus bound")
}

fn check_group_params(modulus: &Integer, level: u32) -> Result<(), String> {
  let seed = calculate_seed(modulus, "", level, "BENCHMARK_GROUP");
  let group = derive_integer_group_params(&seed, 1024, 256).map_err(describe)?;
  ensure(group.validate(), "derived group does not validate")?;
  ensure(group.modulus.significant_bits() >= 1024, "modulus too short")?;
  ensure(group.order.significant_bits() >= 256, "order too short")?;
  let again = derive_integer_group_params(&seed, 1024, 256).map_err(describe)?;
  ensure(group == again, "derivation is not deterministic")
}

fn check_mint(params: &Params) -> Result<Vec<PrivateCoin>, String> {
  let coins = PrivateCoin::mint_batch(params, CoinDenomination::One, COINS_PER_ACCUMULATOR, &mut StdRng::from_entropy())
    .map_err(describe)?;
  for coin in &coins {
    ensure(coin.public_coin().validate(params), "minted an invalid coin")?;
  }
  Ok(coins)
}

fn check_accumulator(params: &Params, coins: &[PrivateCoin]) -> Result<(), String> {
  let mut publics: Vec<PublicCoin> = coins.iter().map(|c| c.public_coin().clone()).collect();
  let mut acc = Accumulator::new(params, CoinDenomination::One);
  let mut witness = AccumulatorWitness::new(&acc, publics[0].clone());
  for coin in &publics {
    acc.add(coin).map_err(describe)?;
    witness.add_element(coin).map_err(describe)?;
  }
  ensure(witness.verify(&acc, &publics[0]), "witness does not verify")?;
  ensure(!witness.verify(&acc, &publics[1]), "witness verifies for another coin")?;

  publics.shuffle(&mut OsRng);
  let mut shuffled = Accumulator::new(params, CoinDenomination::One);
  shuffled.accumulate_all(&publics).map_err(describe)?;
  ensure(shuffled == acc, "accumulation depends on order")?;

  let decoded = Accumulator::decode(params, &acc.encode().map_err(describe)?).map_err(describe)?;
  ensure(decoded == acc, "accumulator round trip changed the value")
}

fn check_mint_and_spend(params: &Params) -> Result<(), String> {
  let coins = check_mint(params)?;
  let mut acc = Accumulator::new(params, CoinDenomination::One);
  let mut witness = AccumulatorWitness::new(&acc, coins[0].public_coin().clone());
  for coin in &coins {
    acc.add(coin.public_coin()).map_err(describe)?;
    witness.add_element(coin.public_coin()).map_err(describe)?;
  }

  let metadata = SpendMetaData::new(1, 1);
  let start = Instant::now();
  let spend = CoinSpend::new(params, &coins[0], &acc, &witness, &metadata, &mut OsRng).map_err(describe)?;
  info!("  spend built in {:.3}s", start.elapsed().as_secs_f64());

  let bytes = spend.encode().map_err(describe)?;
  info!("  spend is {} bytes", bytes.len());
  let decoded = CoinSpend::decode(&bytes).map_err(describe)?;

  let start = Instant::now();
  ensure(decoded.verify(&acc, &metadata), "spend does not verify")?;
  info!("  spend verified in {:.3}s", start.elapsed().as_secs_f64());
  ensure(!decoded.verify(&acc, &SpendMetaData::new(1, 2)), "spend verifies under other metadata")?;
  ensure(decoded.serial_number() == coins[0].serial_number(), "revealed the wrong serial")
}

fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let level = match std::env::args().nth(1) {
    None => DEFAULT_SECURITY_LEVEL,
    Some(arg) => match arg.parse::<u32>() {
      Ok(level) => level,
      Err(_) => {
        eprintln!("usage: zerocoin-bench [security_level]");
        process::exit(2);
      }
    },
  };
  info!("zerocoin benchmark at security level {}", level);

  let mut harness = Harness::default();
  let modulus = harness.run("RSA modulus generation", generate_test_modulus);
  harness.run("parameter sizes", check_param_sizes);

  match &modulus {
    Some(modulus) => {
      harness.run("group parameters", || check_group_params(modulus, level));
    }
    None => harness.skip("group parameters", "a test modulus"),
  }

  let params = modulus
    .as_ref()
    .and_then(|modulus| harness.run("params generation", || Params::new(modulus, "", level).map_err(describe)));

  match &params {
    Some(params) => {
      if let Some(coins) = harness.run("minting", || check_mint(params)) {
        harness.run("accumulator", || check_accumulator(params, &coins));
      } else {
        harness.skip("accumulator", "minted coins");
      }
      harness.run("mint and spend", || check_mint_and_spend(params));
    }
    None => {
      if modulus.is_none() {
        harness.skip("params generation", "a test modulus");
      }
      for name in &["minting", "accumulator", "mint and spend"] {
        harness.skip(name, "params");
      }
    }
  }

  info!("{} passed, {} failed", harness.passed, harness.failed);
  if harness.failed > 0 {
    process::exit(1);
  }
}
