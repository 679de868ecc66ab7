use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::bench::generator::{MaxRange, random_items};
use crate::bench::invariants::check_crates;
use crate::engine::build_crates;
use crate::error::EngineError;

/// Configuration for a benchmark run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub seed: u64,
    /// Number of distinct item types per scenario.
    pub type_counts: Vec<usize>,
    pub capacities: Vec<u32>,
    /// Random inventories generated per scenario.
    pub repetitions: usize,
    pub max_range: MaxRange,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            seed: 123,
            // Realistic venues run tens of types; the larger counts stress the hot path
            type_counts: vec![10, 50, 100, 250],
            capacities: vec![12, 24, 39],
            repetitions: 20,
            max_range: MaxRange::default(),
        }
    }
}

/// Aggregate timings for one (type count, capacity) scenario.
#[derive(Debug, Clone)]
pub struct BenchResult {
    pub types: usize,
    pub capacity: u32,
    pub avg_units: f64,
    pub avg_crates: f64,
    pub avg_micros: f64,
    pub max_micros: f64,
    /// Invariant violations found across all repetitions.
    pub violations: usize,
}

/// Run every scenario in the config and time `build_crates`.
pub fn run_bench(config: &BenchConfig) -> Result<Vec<BenchResult>, EngineError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let repetitions = config.repetitions.max(1);
    let mut results = Vec::with_capacity(config.type_counts.len() * config.capacities.len());

    for &types in &config.type_counts {
        for &capacity in &config.capacities {
            let mut total_units = 0u64;
            let mut total_crates = 0usize;
            let mut total_micros = 0.0;
            let mut max_micros: f64 = 0.0;
            let mut violations = 0usize;

            for _ in 0..repetitions {
                let items = random_items(&mut rng, types, config.max_range);
                total_units += items.iter().map(|i| i.missing as u64).sum::<u64>();

                let start = Instant::now();
                let crates = build_crates(&items, capacity)?;
                let micros = start.elapsed().as_secs_f64() * 1_000_000.0;

                total_micros += micros;
                max_micros = max_micros.max(micros);
                total_crates += crates.len();

                let found = check_crates(&items, &crates, capacity);
                for v in &found {
                    warn!(types, capacity, violation = %v, "invariant violated");
                }
                violations += found.len();
            }

            let n = repetitions as f64;
            let result = BenchResult {
                types,
                capacity,
                avg_units: total_units as f64 / n,
                avg_crates: total_crates as f64 / n,
                avg_micros: total_micros / n,
                max_micros,
                violations,
            };
            info!(
                types,
                capacity,
                avg_micros = result.avg_micros,
                "scenario complete"
            );
            results.push(result);
        }
    }

    Ok(results)
}
