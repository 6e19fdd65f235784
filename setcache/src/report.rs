use std::fmt;
use crate::error::ConfigurationError;
use crate::stats::SimulationStats;

/// How results are printed, chosen by the numeric output flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Flag 0: labelled totals and percentages
    Breakdown,
    /// Flag 1: a single line of rates
    Rates,
}

impl TryFrom<u8> for OutputFormat {
    type Error = ConfigurationError;

    fn try_from(flag: u8) -> Result<Self, Self::Error> {
        match flag {
            0 => Ok(OutputFormat::Breakdown),
            1 => Ok(OutputFormat::Rates),
            other => Err(ConfigurationError::UnknownOutputFormat(other)),
        }
    }
}

/// A printable summary of a simulation
///
/// The rates line is `accesses hit_rate miss_rate compulsory capacity conflict`, where the hit
/// and miss rates are fractions of all accesses and the three miss kinds are fractions of all
/// misses, each to 4 decimal places
pub struct Report<'a> {
    trace: &'a str,
    stats: &'a SimulationStats,
    format: OutputFormat,
}

impl<'a> Report<'a> {
    pub fn new(trace: &'a str, stats: &'a SimulationStats, format: OutputFormat) -> Self {
        Self { trace, stats, format }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        match self.format {
            OutputFormat::Rates => write!(
                f,
                "{} {:.4} {:.4} {:.4} {:.4} {:.4}",
                s.total_accesses,
                s.hit_rate(),
                s.miss_rate(),
                s.compulsory_rate(),
                s.capacity_rate(),
                s.conflict_rate()
            ),
            OutputFormat::Breakdown => {
                writeln!(f, "--- Simulation results ---")?;
                writeln!(f, "{:<24}{}", "Trace:", self.trace)?;
                writeln!(f, "{:<24}{}", "Memory accesses:", s.total_accesses)?;
                writeln!(f, "{:<24}{}", "Hits:", s.hits)?;
                writeln!(f, "{:<24}{:.2}%", "Hit rate:", s.hit_rate() * 100.0)?;
                writeln!(f, "{:<24}{}", "Misses:", s.misses())?;
                writeln!(f, "{:<24}{:.2}%", "Miss rate:", s.miss_rate() * 100.0)?;
                writeln!(f)?;
                writeln!(f, "--- Miss breakdown ---")?;
                writeln!(f, "{:<24}{} ({:.2}%)", "Compulsory misses:", s.compulsory, s.compulsory_rate() * 100.0)?;
                writeln!(f, "{:<24}{} ({:.2}%)", "Capacity misses:", s.capacity, s.capacity_rate() * 100.0)?;
                writeln!(f, "{:<24}{} ({:.2}%)", "Conflict misses:", s.conflict, s.conflict_rate() * 100.0)?;
                write!(f, "--------------------------")
            }
        }
    }
}
