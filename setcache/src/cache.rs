use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use crate::address::{Address, AddressDecoder};
use crate::config::{validate_geometry, CacheConfig, ReplacementPolicyConfig};
use crate::error::ConfigurationError;
use crate::replacement_policies::{Fifo, LeastRecentlyUsed, Random, ReplacementPolicy};
use crate::set::{CacheSet, Verdict};
use crate::stats::{Classification, SimulationStats};

/// A generic trait for classifying caches
///
/// Not required for the controllers themselves, which are statically dispatched, but lets the
/// simulator drive any of them through [GenericCache] with no overhead
pub trait CacheTrait {
    /// Processes one access and classifies it, updating the running counters
    ///
    /// # Arguments
    ///
    /// * `address`: The byte address of the access
    ///
    /// returns: Classification
    fn access_address(&mut self, address: Address) -> Classification;

    /// True once every line of every set holds a block
    fn is_full(&self) -> bool;

    /// Gets the number of lines which have been filled at least once
    fn occupied_lines(&self) -> u64;

    /// Gets the number of lines in the whole cache
    fn total_lines(&self) -> u64;

    /// Gets the counters accumulated so far
    fn stats(&self) -> &SimulationStats;

    /// Gets the number of lines which have never been filled. Useful for analysing cache
    /// performance or debugging
    fn unoccupied_lines(&self) -> u64 {
        self.total_lines() - self.occupied_lines()
    }
}

/// A set-associative cache which classifies every access, parameterised by a replacement policy
/// and the pseudorandom source handed to it
///
/// Misses on a full set are classified from the occupancy of the whole cache before the access: a
/// conflict miss while any line anywhere is still empty, a capacity miss otherwise. This is an
/// approximation of the compulsory/capacity/conflict model, no fully associative reference cache
/// is simulated.
#[derive(Debug, Clone)]
pub struct CacheController<P: ReplacementPolicy, R: RngCore = ChaCha8Rng> {
    sets: Vec<CacheSet<P>>,
    decoder: AddressDecoder,
    block_size: u64,
    associativity: u64,
    total_lines: u64,
    occupied_lines: u64,
    stats: SimulationStats,
    rng: R,
}

impl<P: ReplacementPolicy, R: RngCore> CacheController<P, R> {
    /// Creates an empty cache
    ///
    /// # Arguments
    ///
    /// * `num_sets`: Number of sets, a power of two
    /// * `block_size`: Block size in bytes, a power of two
    /// * `associativity`: Number of ways in each set, at least one
    /// * `rng`: The source the random policy draws victims from. Other policies never touch it
    ///
    /// returns: Result<CacheController<P, R>, ConfigurationError>
    pub fn new(num_sets: u64, block_size: u64, associativity: u64, rng: R) -> Result<Self, ConfigurationError> {
        validate_geometry(num_sets, block_size, associativity)?;
        let sets = (0..num_sets).map(|_| CacheSet::new(associativity as usize)).collect();
        Ok(Self {
            sets,
            decoder: AddressDecoder::new(block_size, num_sets),
            block_size,
            associativity,
            total_lines: num_sets * associativity,
            occupied_lines: 0,
            stats: SimulationStats::default(),
            rng,
        })
    }

    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    pub fn associativity(&self) -> u64 {
        self.associativity
    }

    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    pub fn decoder(&self) -> &AddressDecoder {
        &self.decoder
    }

    pub fn set(&self, index: usize) -> &CacheSet<P> {
        &self.sets[index]
    }
}

impl<P: ReplacementPolicy, R: RngCore> CacheTrait for CacheController<P, R> {
    fn access_address(&mut self, address: Address) -> Classification {
        let (tag, index) = self.decoder.decode(address);
        let was_full = self.is_full();
        let classification = match self.sets[index].access(tag, &mut self.rng) {
            Verdict::Hit => Classification::Hit,
            Verdict::CompulsoryMiss { .. } => {
                self.occupied_lines += 1;
                Classification::CompulsoryMiss
            }
            Verdict::MissNeedsEviction { .. } if was_full => Classification::CapacityMiss,
            Verdict::MissNeedsEviction { .. } => Classification::ConflictMiss,
        };
        self.stats.record(classification);
        classification
    }

    fn is_full(&self) -> bool {
        self.occupied_lines >= self.total_lines
    }

    fn occupied_lines(&self) -> u64 {
        self.occupied_lines
    }

    fn total_lines(&self) -> u64 {
        self.total_lines
    }

    fn stats(&self) -> &SimulationStats {
        &self.stats
    }
}

/// Enum for the 3 supported replacement policies
///
/// Using trait objects reduces boilerplate, but it's opaque to the compiler and we would be
/// de-referencing for each address in the trace. Branching explicitly keeps the concrete types
/// visible so the policy code can be inlined
#[derive(Debug, Clone)]
pub enum GenericCache {
    Random(CacheController<Random>),
    Fifo(CacheController<Fifo>),
    LeastRecentlyUsed(CacheController<LeastRecentlyUsed>),
}

impl GenericCache {
    /// Creates a cache from a configuration, seeding the random source from it
    ///
    /// When the configuration carries no seed one is drawn here and logged, so a random run can be
    /// replayed
    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        if config.seed.is_none() && config.replacement_policy == ReplacementPolicyConfig::Random {
            tracing::info!(seed, "no seed configured for the random policy, drew one");
        }
        let rng = ChaCha8Rng::seed_from_u64(seed);
        let (num_sets, block_size, ways) = (config.num_sets, config.block_size, config.associativity);
        let cache = match config.replacement_policy {
            ReplacementPolicyConfig::Random => {
                GenericCache::from(CacheController::<Random>::new(num_sets, block_size, ways, rng)?)
            }
            ReplacementPolicyConfig::Fifo => {
                GenericCache::from(CacheController::<Fifo>::new(num_sets, block_size, ways, rng)?)
            }
            ReplacementPolicyConfig::LeastRecentlyUsed => {
                GenericCache::from(CacheController::<LeastRecentlyUsed>::new(num_sets, block_size, ways, rng)?)
            }
        };
        tracing::debug!(
            num_sets,
            block_size,
            associativity = ways,
            policy = %config.replacement_policy,
            total_lines = cache.total_lines(),
            "built cache"
        );
        Ok(cache)
    }

    pub fn policy(&self) -> ReplacementPolicyConfig {
        match self {
            GenericCache::Random(_) => ReplacementPolicyConfig::Random,
            GenericCache::Fifo(_) => ReplacementPolicyConfig::Fifo,
            GenericCache::LeastRecentlyUsed(_) => ReplacementPolicyConfig::LeastRecentlyUsed,
        }
    }
}

impl From<CacheController<Random>> for GenericCache {
    fn from(value: CacheController<Random>) -> Self {
        Self::Random(value)
    }
}

impl From<CacheController<Fifo>> for GenericCache {
    fn from(value: CacheController<Fifo>) -> Self {
        Self::Fifo(value)
    }
}

impl From<CacheController<LeastRecentlyUsed>> for GenericCache {
    fn from(value: CacheController<LeastRecentlyUsed>) -> Self {
        Self::LeastRecentlyUsed(value)
    }
}

impl CacheTrait for GenericCache {
    fn access_address(&mut self, address: Address) -> Classification {
        match self {
            GenericCache::Random(c) => c.access_address(address),
            GenericCache::Fifo(c) => c.access_address(address),
            GenericCache::LeastRecentlyUsed(c) => c.access_address(address),
        }
    }

    fn is_full(&self) -> bool {
        match self {
            GenericCache::Random(c) => c.is_full(),
            GenericCache::Fifo(c) => c.is_full(),
            GenericCache::LeastRecentlyUsed(c) => c.is_full(),
        }
    }

    fn occupied_lines(&self) -> u64 {
        match self {
            GenericCache::Random(c) => c.occupied_lines(),
            GenericCache::Fifo(c) => c.occupied_lines(),
            GenericCache::LeastRecentlyUsed(c) => c.occupied_lines(),
        }
    }

    fn total_lines(&self) -> u64 {
        match self {
            GenericCache::Random(c) => c.total_lines(),
            GenericCache::Fifo(c) => c.total_lines(),
            GenericCache::LeastRecentlyUsed(c) => c.total_lines(),
        }
    }

    fn stats(&self) -> &SimulationStats {
        match self {
            GenericCache::Random(c) => c.stats(),
            GenericCache::Fifo(c) => c.stats(),
            GenericCache::LeastRecentlyUsed(c) => c.stats(),
        }
    }
}
