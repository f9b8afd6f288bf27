use std::{fmt::Write as _, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ShapeKind;

/// Uniformly random shape generator backed by a seedable PRNG.
///
/// Each draw picks one of the seven shape kinds independently and uniformly
/// at random. There is no bag system, so droughts and repeats are possible
/// by design. The source is injected into the session rather than being a
/// process-wide generator so that tests and replays can supply a fixed
/// seed: the same seed always yields the same sequence of kinds.
///
/// # Example
///
/// ```
/// use tempris_engine::{PieceSource, SourceSeed};
///
/// let seed: SourceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let mut a = PieceSource::with_seed(seed);
/// let mut b = PieceSource::with_seed(seed);
///
/// for _ in 0..10 {
///     assert_eq!(a.next_kind(), b.next_kind());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PieceSource {
    rng: Pcg32,
}

impl Default for PieceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceSource {
    /// Creates a source with a random seed.
    ///
    /// For deterministic draws, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic
    /// shape sequences.
    #[must_use]
    pub fn with_seed(seed: SourceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Draws the next shape kind, uniformly at random over all seven kinds.
    pub fn next_kind(&mut self) -> ShapeKind {
        self.rng.random()
    }
}

/// Seed for deterministic shape generation.
///
/// A 128-bit (16-byte) seed for the piece source's random number
/// generator. Its textual form, in serde and [`FromStr`] alike, is a
/// 32-character hex string, which is what the `--seed` flag of a frontend
/// accepts. Reusing a seed reproduces the exact piece sequence, enabling
/// deterministic testing and replayable sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSeed([u8; 16]);

impl SourceSeed {
    #[cfg(test)]
    pub(crate) fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if hex.len() != 32 {
            return None;
        }
        let num = u128::from_str_radix(hex, 16).ok()?;
        Some(Self(num.to_be_bytes()))
    }

    fn to_hex(self) -> String {
        let num = u128::from_be_bytes(self.0);
        let mut hex = String::with_capacity(2 * self.0.len());
        write!(&mut hex, "{num:032x}").expect("writing to a String cannot fail");
        hex
    }
}

/// Error returned when a seed string is not 32 hex characters.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("seed must be a 32-character hex string")]
pub struct ParseSeedError;

impl FromStr for SourceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s).ok_or(ParseSeedError)
    }
}

impl Serialize for SourceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SourceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        Self::parse_hex(&hex)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid seed hex: {hex}")))
    }
}

/// Allows generating random `SourceSeed` values with `rng.random()`.
impl Distribution<SourceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SourceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SourceSeed(seed)
    }
}
