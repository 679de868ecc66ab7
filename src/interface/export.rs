use std::io;
use std::path::Path;

use crate::error::Result;
use crate::models::Crate;

const HEADER: [&str; 5] = ["crate", "sequence", "type", "quantity", "urgency"];

/// Write crates as CSV rows, one per crate line, in display order.
pub fn write_crates<W: io::Write>(crates: &[Crate], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for (i, c) in crates.iter().enumerate() {
        for line in &c.lines {
            wtr.write_record([
                (i + 1).to_string(),
                c.sequence.to_string(),
                line.item_type.clone(),
                line.quantity.to_string(),
                format!("{:.2}", line.urgency_snapshot),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Write crates to a CSV file.
pub fn write_crates_csv(crates: &[Crate], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_crates(crates, file)
}
