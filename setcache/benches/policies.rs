use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use setcache::config::{CacheConfig, ReplacementPolicyConfig};
use setcache::simulator::Simulator;
use setcache::util::{encode_trace, synthetic_trace};

const TRACE_LENGTH: usize = 1 << 20;

/// Each policy over the same trace, at a few associativities
pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Policies");
    // For the purposes of this we aren't interested in IO effects, the trace is built in memory
    let trace = encode_trace(&synthetic_trace(42, TRACE_LENGTH, 1 << 20));
    group.throughput(Throughput::Elements(TRACE_LENGTH as u64));
    for policy in [ReplacementPolicyConfig::Random, ReplacementPolicyConfig::Fifo, ReplacementPolicyConfig::LeastRecentlyUsed] {
        for associativity in [1, 4, 16] {
            let config = CacheConfig {
                num_sets: 256 / associativity,
                block_size: 64,
                associativity,
                replacement_policy: policy,
                seed: Some(0),
            };
            group.bench_with_input(BenchmarkId::new(policy.to_string(), associativity), &config, |bench, conf| {
                bench.iter(|| {
                    Simulator::new(conf).unwrap().simulate(&trace).unwrap().total_accesses
                });
            });
        }
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().significance_level(0.1).sample_size(10);
    targets = criterion_benchmark
);
criterion_main!(benches);
