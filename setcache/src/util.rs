use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use regex::Regex;
use crate::address::Address;

/// The files making up one recorded simulation
#[derive(Debug, Clone)]
pub struct TestCasePaths {
    pub config: PathBuf,
    pub trace: PathBuf,
    pub output: PathBuf,
}

/// Finds every recorded case in a directory
///
/// Each `output-<trace>-<config>.json` file holds the expected counters for `<trace>.trace`
/// simulated with `<config>.json`, both in the same directory. Cases are returned sorted by the
/// output file name
pub fn get_cases(dir: &Path) -> Result<Vec<TestCasePaths>, Box<dyn Error>> {
    let output_pattern = Regex::new(r"^output-(?P<trace>[0-9a-zA-Z_]+)-(?P<config>[0-9a-zA-Z_]+)\.json$")?;
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let file_name = entry?
            .file_name()
            .into_string()
            .map_err(|e| format!("Can't convert OS string ({e:?}) to standard string"))?;
        if output_pattern.is_match(&file_name) {
            names.push(file_name);
        }
    }
    names.sort();
    let mut out = Vec::with_capacity(names.len());
    for file_name in names {
        let tokens = output_pattern.captures(&file_name).ok_or("Couldn't parse the file name".to_string())?;
        let trace = tokens.name("trace").ok_or("Couldn't get the trace file from the output file name".to_string())?.as_str();
        let config = tokens.name("config").ok_or("Couldn't get the config file from the output file name".to_string())?.as_str();
        out.push(TestCasePaths {
            config: dir.join(format!("{config}.json")),
            trace: dir.join(format!("{trace}.trace")),
            output: dir.join(&file_name),
        })
    }
    Ok(out)
}

/// Encodes addresses in the binary trace format, 4 big-endian bytes each
pub fn encode_trace(addresses: &[Address]) -> Vec<u8> {
    addresses.iter().flat_map(|a| a.to_be_bytes()).collect()
}

/// Writes addresses to a binary trace file
pub fn write_trace(path: &Path, addresses: &[Address]) -> io::Result<()> {
    fs::write(path, encode_trace(addresses))
}

/// Generates a reproducible address stream for benchmarks and tests
///
/// Mixes sequential runs with jumps inside a `footprint` byte window, so every policy sees a
/// blend of hits and all three miss kinds
pub fn synthetic_trace(seed: u64, length: usize, footprint: Address) -> Vec<Address> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let footprint = footprint.max(1);
    let mut address: Address = 0;
    (0..length)
        .map(|_| {
            address = if rng.gen_bool(0.75) {
                address.wrapping_add(4) % footprint
            } else {
                rng.gen_range(0..footprint)
            };
            address
        })
        .collect()
}
