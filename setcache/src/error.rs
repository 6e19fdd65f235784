use thiserror::Error;

/// A cache configuration which can't be simulated. Raised once, before any address is processed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("the number of sets must be a power of two, got {0}")]
    NumSetsNotPowerOfTwo(u64),
    #[error("the block size must be a power of two, got {0}")]
    BlockSizeNotPowerOfTwo(u64),
    #[error("the associativity must be greater than zero")]
    ZeroAssociativity,
    #[error("unrecognised replacement policy {0:?}, expected R (random), F (FIFO) or L (LRU)")]
    UnknownPolicy(String),
    #[error("unrecognised output flag {0}, expected 0 (breakdown) or 1 (raw rates)")]
    UnknownOutputFormat(u8),
}

/// A trace which couldn't be loaded or decoded into whole addresses
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("the trace is {length} bytes long, which leaves a partial {trailing} byte address at the end")]
    Truncated { length: usize, trailing: usize },
    #[error("couldn't read the trace: {0}")]
    Io(#[from] std::io::Error),
}
