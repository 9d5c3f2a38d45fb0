use std::fmt;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for the randomized search of the weighted selector.
///
/// A 128-bit seed initializing a PCG generator. The same seed, roster and
/// history always yield the same suggestion, which keeps tests and replays of
/// a game reproducible.
///
/// Serialized as a 32-character lowercase hex string.
///
/// # Example
///
/// ```
/// use rand::Rng as _;
/// use rotacourt_selector::SelectorSeed;
///
/// let seed: SelectorSeed = rand::rng().random();
/// let fixed = SelectorSeed::from(42_u128);
/// assert_eq!(fixed.to_string(), "0000000000000000000000000000002a");
/// # let _ = seed;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorSeed([u8; 16]);

impl SelectorSeed {
    /// Creates a fresh generator positioned at the start of this seed's stream.
    #[must_use]
    pub fn rng(&self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl From<u128> for SelectorSeed {
    fn from(value: u128) -> Self {
        Self(value.to_be_bytes())
    }
}

impl fmt::Display for SelectorSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl std::str::FromStr for SelectorSeed {
    type Err = String;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        if hex_str.len() != 32 {
            return Err(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            ));
        }
        let num =
            u128::from_str_radix(hex_str, 16).map_err(|e| format!("invalid hex: {hex_str} ({e})"))?;
        Ok(Self::from(num))
    }
}

impl Serialize for SelectorSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SelectorSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `SelectorSeed` values with `rng.random()`.
impl Distribution<SelectorSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SelectorSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SelectorSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use rand::RngCore as _;

    use super::*;

    #[test]
    fn test_format_is_32_char_hex_string() {
        let seed = SelectorSeed::from(0x0123_4567_89ab_cdef_fedc_ba98_7654_3210_u128);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
        let deserialized: SelectorSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);
    }

    #[test]
    fn test_deserialize_uppercase_hex() {
        let json = "\"0123456789ABCDEFFEDCBA9876543210\"";
        let deserialized: SelectorSeed = serde_json::from_str(json).unwrap();
        assert_eq!(
            deserialized,
            SelectorSeed::from(0x0123_4567_89ab_cdef_fedc_ba98_7654_3210_u128)
        );
    }

    #[test]
    fn test_rejects_malformed_hex() {
        for json in [
            "\"ghijklmnopqrstuvwxyzghijklmnopqr\"",
            "\"0123456789abcdef0123456789abcde\"",
            "\"\"",
        ] {
            let result: Result<SelectorSeed, _> = serde_json::from_str(json);
            let err_msg = result.unwrap_err().to_string();
            assert!(err_msg.contains("invalid hex"), "{err_msg}");
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let seed = SelectorSeed::from(7_u128);
        let mut rng1 = seed.rng();
        let mut rng2 = seed.rng();
        for _ in 0..20 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }
}
