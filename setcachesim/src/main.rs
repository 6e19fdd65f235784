use std::fs::File;
use std::time::Instant;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use setcache::config::{CacheConfig, ReplacementPolicyConfig};
use setcache::io::get_trace;
use setcache::report::{OutputFormat, Report};
use setcache::simulator::Simulator;
use setcache::stats::SimulationStats;

#[cfg(debug_assertions)]
const DEBUG_DEFAULT: bool = true;

#[cfg(not(debug_assertions))]
const DEBUG_DEFAULT: bool = false;

#[derive(Parser, Debug)]
#[command(about = String::from("Set-associative cache simulator, classifying hits and compulsory, capacity and conflict misses"))]
struct Args {
    /// Number of sets, a power of two
    num_sets: u64,
    /// Block size in bytes, a power of two
    block_size: u64,
    /// Number of ways per set
    associativity: u64,
    /// Replacement policy: R (random), F (FIFO) or L (LRU)
    policy: String,
    /// 0 for a full breakdown, 1 for a single line of rates
    output_flag: u8,
    /// Binary trace of 4 byte big-endian addresses
    trace: String,

    /// Seed for the random policy
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the results as JSON
    #[arg(short, long)]
    json: bool,

    #[arg(short, long)]
    performance: bool,

    #[arg(short, long, default_value_t = DEBUG_DEFAULT)]
    debug: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    trace: &'a str,
    config: &'a CacheConfig,
    result: &'a SimulationStats,
}

fn main() -> Result<(), String> {
    let start = Instant::now();
    let args = Args::parse();
    let default_level = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let replacement_policy: ReplacementPolicyConfig = args.policy.parse().map_err(|e| format!("Invalid replacement policy: {e}"))?;
    let format = OutputFormat::try_from(args.output_flag).map_err(|e| format!("Invalid output flag: {e}"))?;
    let config = CacheConfig {
        num_sets: args.num_sets,
        block_size: args.block_size,
        associativity: args.associativity,
        replacement_policy,
        seed: args.seed,
    };
    let mut simulator = Simulator::new(&config).map_err(|e| format!("Invalid cache configuration: {e}"))?;
    let trace_file = File::open(&args.trace).map_err(|e| format!("Couldn't open the trace file at path {}: {e}", args.trace))?;
    let trace = get_trace(trace_file).map_err(|e| format!("Couldn't load the trace file at path {}: {e}", args.trace))?;
    tracing::info!(trace = %args.trace, bytes = trace.len(), "loaded trace");
    let result = simulator.simulate(&trace).map_err(|e| format!("Couldn't simulate the trace at path {}: {e}", args.trace))?;

    if args.json {
        let output = JsonOutput {
            trace: &args.trace,
            config: &config,
            result,
        };
        println!("{}", serde_json::to_string_pretty(&output).map_err(|e| format!("Couldn't serialise the output {e}"))?);
    } else {
        println!("{}", Report::new(&args.trace, result, format));
    }
    if args.performance {
        let end = Instant::now();
        let simulation_time = simulator.get_execution_time();
        let total_time = end - start;
        println!("Simulation time: {}s", simulation_time.as_nanos() as f64 / 1e9);
        println!("Total execution time (includes loading the trace and output): {}s", total_time.as_nanos() as f64 / 1e9)
    }
    if args.debug {
        #[cfg(debug_assertions)]
        println!("Running the debug binary, debug mode is enabled by default. If benchmarking, do not use this binary, re-compile with the --release argument when using cargo run");
        println!("Parsed input configuration: {config:?}");
        println!("Replacement policy: {}", simulator.cache().policy());
        println!("Cache lines never filled: {} of {}", simulator.get_unoccupied_line_count(), config.total_lines());
    }
    Ok(())
}
