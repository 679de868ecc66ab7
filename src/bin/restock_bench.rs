use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bar_restock_rs::bench::{
    BenchConfig, MaxRange, print_results, run_bench, write_csv, write_summary_json,
};

#[derive(Parser, Debug)]
#[command(name = "restock_bench")]
#[command(about = "Benchmark the crate packing engine on random inventories")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Type counts to evaluate (comma-separated)
    #[arg(long, default_value = "10,50,100,250")]
    types: String,

    /// Crate capacities to evaluate (comma-separated)
    #[arg(long, default_value = "12,24,39")]
    capacities: String,

    /// Random inventories per scenario
    #[arg(long, default_value = "20")]
    reps: usize,

    /// Smallest capacity max given to a generated item
    #[arg(long, default_value = "2")]
    min_max: u32,

    /// Largest capacity max given to a generated item
    #[arg(long, default_value = "48")]
    max_max: u32,

    /// Output CSV file for all scenarios
    #[arg(long, default_value = "bench_results.csv")]
    csv: PathBuf,

    /// Output JSON file for the fastest/slowest summary
    #[arg(long, default_value = "bench_summary.json")]
    json: PathBuf,
}

fn parse_list<T: std::str::FromStr>(s: &str) -> Vec<T> {
    s.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let type_counts: Vec<usize> = parse_list(&args.types);
    let capacities: Vec<u32> = parse_list(&args.capacities);
    if type_counts.is_empty() || capacities.is_empty() {
        eprintln!("Error: no valid type counts or capacities provided");
        std::process::exit(1);
    }

    println!("Type counts: {:?}", type_counts);
    println!("Capacities: {:?}", capacities);

    let config = BenchConfig {
        seed: args.seed,
        type_counts,
        capacities,
        repetitions: args.reps,
        max_range: MaxRange {
            min: args.min_max,
            max: args.max_max,
        },
    };

    let results = match run_bench(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    print_results(&results);

    if let Err(e) = write_csv(&results, &args.csv) {
        eprintln!("Error writing CSV: {}", e);
    } else {
        println!("Wrote all results to {:?}", args.csv);
    }

    if let Err(e) = write_summary_json(&results, &args.json) {
        eprintln!("Error writing JSON: {}", e);
    } else {
        println!("Wrote summary to {:?}", args.json);
    }

    let violations: usize = results.iter().map(|r| r.violations).sum();
    if violations > 0 {
        eprintln!("{} invariant violations found", violations);
        std::process::exit(2);
    }
}
