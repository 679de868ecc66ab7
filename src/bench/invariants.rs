use std::collections::HashMap;

use crate::models::{Crate, InventoryItem};

/// Check a crate list against the packing guarantees.
///
/// Returns one message per violation; an empty list means the output is sound.
/// Covered: full crates except the final one (by fill order), no units
/// created or dropped, most urgent crate first, and per-type urgency that
/// never rises across fill order.
pub fn check_crates(items: &[InventoryItem], crates: &[Crate], capacity: u32) -> Vec<String> {
    let mut violations = Vec::new();

    let mut by_fill: Vec<&Crate> = crates.iter().collect();
    by_fill.sort_by_key(|c| c.sequence);

    for (i, c) in by_fill.iter().enumerate() {
        let total = c.total_quantity();
        let is_last = i + 1 == by_fill.len();
        if total == 0 {
            violations.push(format!("crate {} is empty", c.sequence));
        } else if !is_last && total != capacity {
            violations.push(format!(
                "crate {} holds {} units, expected {}",
                c.sequence, total, capacity
            ));
        } else if total > capacity {
            violations.push(format!(
                "crate {} holds {} units, over capacity {}",
                c.sequence, total, capacity
            ));
        }
    }

    let mut expected: HashMap<&str, u32> = HashMap::new();
    for item in items.iter().filter(|i| i.needs_restock()) {
        *expected.entry(item.item_type.as_str()).or_insert(0) += item.missing;
    }
    let mut packed: HashMap<&str, u32> = HashMap::new();
    for line in crates.iter().flat_map(|c| c.lines.iter()) {
        *packed.entry(line.item_type.as_str()).or_insert(0) += line.quantity;
    }
    if expected != packed {
        violations.push(format!(
            "units not conserved: expected {:?}, packed {:?}",
            expected, packed
        ));
    }

    for pair in crates.windows(2) {
        if pair[0].max_urgency() < pair[1].max_urgency() {
            violations.push(format!(
                "crate {} (urgency {:.2}) listed before more urgent crate {} ({:.2})",
                pair[0].sequence,
                pair[0].max_urgency(),
                pair[1].sequence,
                pair[1].max_urgency()
            ));
        }
    }

    let mut last_seen: HashMap<&str, f64> = HashMap::new();
    for c in &by_fill {
        for line in &c.lines {
            if let Some(prev) = last_seen.insert(line.item_type.as_str(), line.urgency_snapshot) {
                if line.urgency_snapshot > prev {
                    violations.push(format!(
                        "urgency of '{}' rose from {:.2} to {:.2} in crate {}",
                        line.item_type, prev, line.urgency_snapshot, c.sequence
                    ));
                }
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CrateLine;

    fn crate_with(sequence: usize, lines: &[(&str, u32, f64)]) -> Crate {
        Crate {
            sequence,
            lines: lines
                .iter()
                .map(|(t, q, u)| CrateLine {
                    item_type: t.to_string(),
                    quantity: *q,
                    urgency_snapshot: *u,
                    source_index: 0,
                })
                .collect(),
        }
    }

    #[test]
    fn test_sound_output() {
        let items = vec![InventoryItem::new("Cola", 48, 30, 0)];
        let crates = vec![
            crate_with(0, &[("Cola", 24, 14.58)]),
            crate_with(1, &[("Cola", 6, 2.08)]),
        ];
        assert!(check_crates(&items, &crates, 24).is_empty());
    }

    #[test]
    fn test_detects_short_middle_crate_and_lost_units() {
        let items = vec![InventoryItem::new("Cola", 48, 30, 0)];
        let crates = vec![
            crate_with(0, &[("Cola", 20, 14.58)]),
            crate_with(1, &[("Cola", 6, 2.08)]),
        ];
        let violations = check_crates(&items, &crates, 24);
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_detects_misordered_crates() {
        let items = vec![InventoryItem::new("Cola", 48, 30, 0)];
        let crates = vec![
            crate_with(1, &[("Cola", 6, 2.08)]),
            crate_with(0, &[("Cola", 24, 14.58)]),
        ];
        let violations = check_crates(&items, &crates, 24);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("listed before"));
    }
}
