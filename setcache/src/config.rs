use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::ConfigurationError;

/// A configuration for a single cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    pub num_sets: u64,
    pub block_size: u64,
    pub associativity: u64,
    #[serde(default = "ReplacementPolicyConfig::default")]
    pub replacement_policy: ReplacementPolicyConfig,
    /// Seed for the random policy's source. A fresh seed is drawn when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl CacheConfig {
    /// Checks the geometry can be simulated: power of two sets and block size, at least one way
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate_geometry(self.num_sets, self.block_size, self.associativity)
    }

    pub fn total_lines(&self) -> u64 {
        self.num_sets * self.associativity
    }
}

pub(crate) fn validate_geometry(num_sets: u64, block_size: u64, associativity: u64) -> Result<(), ConfigurationError> {
    if !num_sets.is_power_of_two() {
        return Err(ConfigurationError::NumSetsNotPowerOfTwo(num_sets));
    }
    if !block_size.is_power_of_two() {
        return Err(ConfigurationError::BlockSizeNotPowerOfTwo(block_size));
    }
    if associativity == 0 {
        return Err(ConfigurationError::ZeroAssociativity);
    }
    Ok(())
}

/// The replacement policy - random, fifo, or lru. Defaults to lru.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReplacementPolicyConfig {
    #[serde(alias = "random", alias = "R")]
    Random,
    #[serde(alias = "fifo", alias = "F")]
    Fifo,
    #[serde(alias = "lru", alias = "L")]
    LeastRecentlyUsed,
}

impl Default for ReplacementPolicyConfig {
    fn default() -> Self {
        ReplacementPolicyConfig::LeastRecentlyUsed
    }
}

impl FromStr for ReplacementPolicyConfig {
    type Err = ConfigurationError;

    /// Only the first character counts, case insensitively, so `L`, `lru` and `LRU` all select
    /// least recently used
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('R') => Ok(ReplacementPolicyConfig::Random),
            Some('F') => Ok(ReplacementPolicyConfig::Fifo),
            Some('L') => Ok(ReplacementPolicyConfig::LeastRecentlyUsed),
            _ => Err(ConfigurationError::UnknownPolicy(s.to_owned())),
        }
    }
}

impl fmt::Display for ReplacementPolicyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReplacementPolicyConfig::Random => "random",
            ReplacementPolicyConfig::Fifo => "fifo",
            ReplacementPolicyConfig::LeastRecentlyUsed => "lru",
        })
    }
}
