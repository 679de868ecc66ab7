use crate::models::{Crate, InventoryItem, StockKind};

/// Display recommended crates, most urgent first.
pub fn display_crates(crates: &[Crate], venue: &str, kind: StockKind, capacity: u32) {
    if crates.is_empty() {
        println!("Nothing missing in {} at {}. No crates needed.", kind, venue);
        return;
    }

    println!();
    println!("=== Restock: {} at {} ({} per crate) ===", kind, venue, capacity);

    let max_name_len = crates
        .iter()
        .flat_map(|c| c.lines.iter())
        .map(|l| l.item_type.len())
        .max()
        .unwrap_or(10);

    for (i, c) in crates.iter().enumerate() {
        println!();
        println!(
            "Crate {} - {}/{} units, urgency {:.2}",
            i + 1,
            c.total_quantity(),
            capacity,
            c.max_urgency()
        );

        for line in &c.lines {
            println!(
                "  {:<width$}  x{:>3}  ({:.2}%)",
                line.item_type,
                line.quantity,
                line.urgency_snapshot,
                width = max_name_len
            );
        }
    }

    let total_units: u32 = crates.iter().map(|c| c.total_quantity()).sum();

    println!();
    println!("--- Summary ---");
    println!("Crates: {}", crates.len());
    println!("Total units: {}", total_units);
    println!();
}

/// Display the items of a venue location with their missing counts.
pub fn display_items(items: &[InventoryItem], venue: &str, kind: StockKind) {
    if items.is_empty() {
        println!("{} at {}: (no items)", kind, venue);
        return;
    }

    println!();
    println!("=== {} at {} ({} items) ===", kind, venue, items.len());
    println!();

    let max_name_len = items.iter().map(|i| i.item_type.len()).max().unwrap_or(10);

    for item in items {
        println!(
            "  {:>2}. {:<width$}  missing {:>3} / {:<3}  on hand {:>3}",
            item.source_index,
            item.item_type,
            item.missing,
            item.capacity_max,
            item.on_hand(),
            width = max_name_len
        );
    }

    println!();
}
