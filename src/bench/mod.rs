pub mod generator;
pub mod invariants;
pub mod output;
pub mod runner;

pub use generator::{MaxRange, random_items};
pub use invariants::check_crates;
pub use output::{print_results, write_csv, write_summary_json};
pub use runner::{BenchConfig, BenchResult, run_bench};
