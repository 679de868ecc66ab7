use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::bench::runner::BenchResult;
use crate::error::Result;

/// Truncate a float to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Write all scenario results to a CSV file.
pub fn write_csv(results: &[BenchResult], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "types",
        "capacity",
        "avg_units",
        "avg_crates",
        "avg_micros",
        "max_micros",
        "violations",
    ])?;

    for r in results {
        wtr.write_record([
            r.types.to_string(),
            r.capacity.to_string(),
            format!("{:.1}", r.avg_units),
            format!("{:.1}", r.avg_crates),
            format!("{:.2}", r.avg_micros),
            format!("{:.2}", r.max_micros),
            r.violations.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the fastest and slowest scenarios to a JSON file.
pub fn write_summary_json(results: &[BenchResult], path: &Path) -> Result<()> {
    let entry = |r: &BenchResult| {
        serde_json::json!({
            "types": r.types,
            "capacity": r.capacity,
            "avg_micros": truncate(r.avg_micros, 2),
            "max_micros": truncate(r.max_micros, 2),
        })
    };

    let by_avg = |a: &&BenchResult, b: &&BenchResult| {
        a.avg_micros
            .partial_cmp(&b.avg_micros)
            .unwrap_or(std::cmp::Ordering::Equal)
    };
    let fastest = results.iter().min_by(by_avg);
    let slowest = results.iter().max_by(by_avg);

    let json = serde_json::json!({
        "scenarios": results.len(),
        "violations": results.iter().map(|r| r.violations).sum::<usize>(),
        "fastest": fastest.map(entry),
        "slowest": slowest.map(entry),
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}

/// Print scenario results as a table.
pub fn print_results(results: &[BenchResult]) {
    println!();
    println!("=== Crate packing benchmark ===");
    println!();
    println!(
        "{:>6} {:>8} {:>10} {:>10} {:>12} {:>12} {:>6}",
        "types", "capacity", "units", "crates", "avg us", "max us", "bad"
    );

    for r in results {
        println!(
            "{:>6} {:>8} {:>10.1} {:>10.1} {:>12.2} {:>12.2} {:>6}",
            r.types, r.capacity, r.avg_units, r.avg_crates, r.avg_micros, r.max_micros, r.violations
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Vec<BenchResult> {
        vec![
            BenchResult {
                types: 10,
                capacity: 24,
                avg_units: 120.0,
                avg_crates: 5.5,
                avg_micros: 12.3456,
                max_micros: 20.0,
                violations: 0,
            },
            BenchResult {
                types: 100,
                capacity: 24,
                avg_units: 1200.0,
                avg_crates: 50.0,
                avg_micros: 812.0,
                max_micros: 950.5,
                violations: 0,
            },
        ]
    }

    #[test]
    fn test_write_csv_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bench.csv");
        write_csv(&sample(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "10,24,120.0,5.5,12.35,20.00,0");
    }

    #[test]
    fn test_summary_picks_extremes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_summary_json(&sample(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["fastest"]["types"], 10);
        assert_eq!(value["slowest"]["types"], 100);
        assert_eq!(value["fastest"]["avg_micros"], 12.35);
    }
}
