//! # SetCache
//!
//! SetCache is a library for simulating a single level, read only, set-associative cache and
//! classifying every access as a hit or a compulsory, capacity or conflict miss
//!
//! It provides a cache controller which can be parameterised by a replacement policy (random,
//! FIFO or LRU), and a simulator to run it over binary address traces
//!
//! Capacity and conflict misses are told apart by whether the whole cache was already full
//! before the access, not by simulating a fully associative reference cache

/// Splits addresses into tags and set indices
pub mod address;

/// Contains the cache controller, which routes addresses to sets and classifies each access, and a
/// utility enum for the supported policies
pub mod cache;

/// Contains definitions for the configuration, which can be parsed from JSON or built from the
/// command line
pub mod config;

/// Error types for configurations and traces
pub mod error;

/// Loads binary trace files
pub mod io;

/// Contains the provided replacement policies, with a trait for implementing custom replacement
/// policies
pub mod replacement_policies;

/// Text output formats for simulation results
pub mod report;

/// A single cache set and its ways
pub mod set;

/// Contains the simulator used to run a trace through a configured cache
pub mod simulator;

/// Per access classifications and the running counters
pub mod stats;

#[cfg(test)]
mod test;

/// Contains utilities for running tests and benchmarks.
pub mod util;
