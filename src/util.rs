use rand::{CryptoRng, RngCore};
use rug::integer::Order;
use rug::Integer;

pub fn int<T>(val: T) -> Integer
where
  Integer: From<T>,
{
  Integer::from(val)
}

/// Uniform integer in `[0, 2^bits)`.
pub fn random_bits<R: RngCore + CryptoRng>(rng: &mut R, bits: u32) -> Integer {
  if bits == 0 {
    return Integer::new();
  }
  let num_bytes = ((bits + 7) / 8) as usize;
  let mut bytes = vec![0u8; num_bytes];
  rng.fill_bytes(&mut bytes);
  let excess = num_bytes as u32 * 8 - bits;
  bytes[0] &= 0xff >> excess;
  Integer::from_digits(&bytes, Order::Msf)
}

/// Uniform integer in `[0, bound)` by rejection sampling. `bound` must be positive.
pub fn random_below<R: RngCore + CryptoRng>(rng: &mut R, bound: &Integer) -> Integer {
  debug_assert!(*bound > 0);
  let bits = bound.significant_bits();
  loop {
    let candidate = random_bits(rng, bits);
    if candidate < *bound {
      return candidate;
    }
  }
}

/// Uniform magnitude in `[0, bound)` with a uniformly random sign.
pub fn random_signed_below<R: RngCore + CryptoRng>(rng: &mut R, bound: &Integer) -> Integer {
  let magnitude = random_below(rng, bound);
  if rng.next_u32() & 1 == 0 {
    -magnitude
  } else {
    magnitude
  }
}
