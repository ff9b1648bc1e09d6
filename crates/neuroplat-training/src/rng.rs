use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Random source used for every stochastic step of training.
pub type TrainingRng = Pcg32;

/// Seed for a reproducible training run.
///
/// A 128-bit seed shown as 32 lowercase hex digits. The same seed driving the
/// same environment yields the same sequence of generations.
///
/// ```
/// use neuroplat_training::TrainingSeed;
///
/// let seed: TrainingSeed = "000000000000000000000000000000ff".parse().unwrap();
/// assert_eq!(seed.to_string(), "000000000000000000000000000000ff");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrainingSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    #[display("invalid seed: expected 32 hex characters, got {_0}")]
    Length(#[error(not(source))] usize),
    #[display("invalid seed: {_0:?} is not hexadecimal")]
    NotHex(#[error(not(source))] String),
}

impl TrainingSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn rng(self) -> TrainingRng {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for TrainingSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for TrainingSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(SeedParseError::Length(s.len()));
        }
        // from_str_radix accepts a leading '+', which is not a hex digit
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SeedParseError::NotHex(s.to_owned()));
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| SeedParseError::NotHex(s.to_owned()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for TrainingSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TrainingSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<TrainingSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TrainingSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        TrainingSeed(seed)
    }
}
