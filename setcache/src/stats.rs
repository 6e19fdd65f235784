use serde::{Deserialize, Serialize};

/// The final classification of one access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Hit,
    CompulsoryMiss,
    CapacityMiss,
    ConflictMiss,
}

/// Running counters for a simulation. Can be serialised as the JSON output format
///
/// `hits + compulsory + capacity + conflict` always equals `total_accesses`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub total_accesses: u64,
    pub hits: u64,
    pub compulsory: u64,
    pub capacity: u64,
    pub conflict: u64,
}

impl SimulationStats {
    pub fn record(&mut self, classification: Classification) {
        self.total_accesses += 1;
        match classification {
            Classification::Hit => self.hits += 1,
            Classification::CompulsoryMiss => self.compulsory += 1,
            Classification::CapacityMiss => self.capacity += 1,
            Classification::ConflictMiss => self.conflict += 1,
        }
    }

    pub fn misses(&self) -> u64 {
        self.compulsory + self.capacity + self.conflict
    }

    /// Fraction of accesses which hit
    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits, self.total_accesses)
    }

    /// Fraction of accesses which missed
    pub fn miss_rate(&self) -> f64 {
        ratio(self.misses(), self.total_accesses)
    }

    /// Fraction of misses which were compulsory
    pub fn compulsory_rate(&self) -> f64 {
        ratio(self.compulsory, self.misses())
    }

    /// Fraction of misses which were capacity misses
    pub fn capacity_rate(&self) -> f64 {
        ratio(self.capacity, self.misses())
    }

    /// Fraction of misses which were conflict misses
    pub fn conflict_rate(&self) -> f64 {
        ratio(self.conflict, self.misses())
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
