//! Seed values and their derivation into noise-source seeds.
//!
//! A map seed is either free text (what a user types or a randomize button
//! produces) or a plain integer. Both collapse to a single `u64`, which is
//! then folded into the 32-bit seed the simplex source takes.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of seeds produced by [`random_seed`].
pub const RANDOM_SEED_LEN: usize = 6;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a over a byte stream.
///
/// The algorithm is fixed, so saved text seeds and grid digests keep their
/// values across toolchains and platforms.
pub(crate) fn fnv1a(bytes: impl IntoIterator<Item = u8>) -> u64 {
    bytes
        .into_iter()
        .fold(FNV_OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME))
}

/// A user-facing map seed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedValue {
    /// Integer seed, used as-is.
    Number(u64),
    /// Arbitrary text seed, hashed to 64 bits.
    Text(String),
}

impl SeedValue {
    /// Collapse the seed to a well-distributed `u64`.
    ///
    /// Text seeds are hashed with FNV-1a over their UTF-8 bytes.
    pub fn to_u64(&self) -> u64 {
        match self {
            SeedValue::Number(n) => *n,
            SeedValue::Text(s) => fnv1a(s.bytes()),
        }
    }

    /// A fresh random text seed from the thread-local RNG.
    pub fn random() -> Self {
        random_seed(&mut rand::rng())
    }

    /// Fold the 64-bit seed into the 32-bit seed of the noise source.
    pub fn noise_seed(&self) -> u32 {
        let v = self.to_u64();
        (v ^ (v >> 32)) as u32
    }
}

impl Default for SeedValue {
    fn default() -> Self {
        SeedValue::Text("strata".to_string())
    }
}

impl From<&str> for SeedValue {
    fn from(s: &str) -> Self {
        SeedValue::Text(s.to_string())
    }
}

impl From<String> for SeedValue {
    fn from(s: String) -> Self {
        SeedValue::Text(s)
    }
}

impl From<u64> for SeedValue {
    fn from(n: u64) -> Self {
        SeedValue::Number(n)
    }
}

impl fmt::Display for SeedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedValue::Number(n) => write!(f, "{n}"),
            SeedValue::Text(s) => f.write_str(s),
        }
    }
}

/// Produce a fresh random text seed of lowercase base-36 characters.
pub fn random_seed<R: Rng + ?Sized>(rng: &mut R) -> SeedValue {
    let s: String = (0..RANDOM_SEED_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    SeedValue::Text(s)
}
