use std::time::{Duration, Instant};
use crate::address::Address;
use crate::cache::{CacheTrait, GenericCache};
use crate::config::CacheConfig;
use crate::error::{ConfigurationError, TraceError};
use crate::stats::SimulationStats;

/// The size in bytes of one address in a binary trace
pub const ADDRESS_SIZE: usize = 4;

/// The simulator feeds traces through a cache in order and collects results.
///
/// It supports calling simulate multiple times, and will update the time taken to simulate and the
/// results accordingly
#[derive(Debug)]
pub struct Simulator {
    cache: GenericCache,
    simulation_time: Duration,
}

impl Simulator {
    /// Creates a new simulator for a given configuration
    ///
    /// # Arguments
    ///
    /// * `config`: A cache configuration, usually from the command line or parsed JSON
    ///
    /// returns: Result<Simulator, ConfigurationError>
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigurationError> {
        Ok(Self::with_cache(GenericCache::from_config(config)?))
    }

    /// Creates a simulator around an existing cache, e.g. one with a custom random source
    pub fn with_cache(cache: GenericCache) -> Self {
        Self {
            cache,
            simulation_time: Duration::new(0, 0),
        }
    }

    /// Simulates the cache using a reference to a binary trace.
    ///
    /// The trace is a sequence of 4 byte big-endian addresses with no header. Its length is
    /// checked before anything is simulated, a trace ending in a partial address is rejected
    /// without touching the cache.
    ///
    /// Reads from the byte array are *guaranteed to be sequential*, so a memory mapped trace can
    /// be advised accordingly
    ///
    /// # Arguments
    ///
    /// * `bytes`: The input byte array
    ///
    /// returns: Result<&SimulationStats, TraceError>
    pub fn simulate(&mut self, bytes: &[u8]) -> Result<&SimulationStats, TraceError> {
        let trailing = bytes.len() % ADDRESS_SIZE;
        if trailing != 0 {
            return Err(TraceError::Truncated {
                length: bytes.len(),
                trailing,
            });
        }
        let addresses = bytes
            .chunks_exact(ADDRESS_SIZE)
            .filter_map(|chunk| <[u8; ADDRESS_SIZE]>::try_from(chunk).ok())
            .map(parse_address);
        Ok(self.simulate_addresses(addresses))
    }

    /// Simulates the cache over already decoded addresses, in iteration order
    pub fn simulate_addresses<I: IntoIterator<Item = Address>>(&mut self, addresses: I) -> &SimulationStats {
        let start = Instant::now();
        for address in addresses {
            let _ = self.cache.access_address(address);
        }
        self.simulation_time += start.elapsed();
        let stats = self.cache.stats();
        tracing::debug!(
            accesses = stats.total_accesses,
            hits = stats.hits,
            misses = stats.misses(),
            occupied_lines = self.cache.occupied_lines(),
            "simulated trace"
        );
        stats
    }

    /// Gets the counters accumulated over every simulate call so far
    pub fn get_result(&self) -> &SimulationStats {
        self.cache.stats()
    }

    /// Gets the wall-clock execution time for processing
    pub fn get_execution_time(&self) -> &Duration {
        &self.simulation_time
    }

    /// Gets the number of cache lines which were never filled
    pub fn get_unoccupied_line_count(&self) -> u64 {
        self.cache.unoccupied_lines()
    }

    pub fn cache(&self) -> &GenericCache {
        &self.cache
    }
}

/// Parses one big-endian address from a binary trace
///
/// # Arguments
///
/// * `buf`: The 4 bytes of the address
///
/// returns: Address
///
/// # Examples
///
/// ```
/// use setcache::simulator::parse_address;
/// assert_eq!(parse_address([0x00, 0x00, 0x12, 0x34]), 0x1234);
/// ```
pub fn parse_address(buf: [u8; ADDRESS_SIZE]) -> Address {
    Address::from_be_bytes(buf)
}
