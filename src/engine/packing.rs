use std::collections::HashMap;

use tracing::{debug, trace};

use crate::engine::constants::{URGENCY_DECIMALS, URGENCY_SCALE};
use crate::error::EngineError;
use crate::models::{Crate, InventoryItem, SourceIndex};

/// Missing units grouped by type, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeGroup {
    pub item_type: String,
    /// Sum of missing across every item of this type.
    pub total: u32,
    /// Highest urgency among the contributing items.
    pub peak_urgency: f64,
    /// Last contributing item wins.
    pub source_index: SourceIndex,
}

/// Working-list entry for one type while crates are being filled.
#[derive(Debug)]
struct Draw {
    /// Index into the group list, doubles as the insertion-order tie-break.
    group: usize,
    remaining: u32,
    current_urgency: f64,
}

/// Fraction of capacity missing, as a percentage.
///
/// An item with nothing missing has zero urgency whatever its maximum.
pub fn urgency(item: &InventoryItem) -> Result<f64, EngineError> {
    if item.missing == 0 {
        return Ok(0.0);
    }
    if item.capacity_max == 0 {
        return Err(EngineError::DataIntegrity {
            item_type: item.item_type.clone(),
            missing: item.missing,
        });
    }
    Ok(item.missing as f64 * URGENCY_SCALE / item.capacity_max as f64)
}

/// Round an urgency to the precision kept on crate lines.
pub fn round_urgency(value: f64) -> f64 {
    let factor = 10_f64.powi(URGENCY_DECIMALS as i32);
    (value * factor).round() / factor
}

/// Group restock candidates by type.
///
/// Fails on the first candidate with an undefined urgency, or when a type's
/// summed missing count does not fit in a `u32`.
pub fn group_by_type(items: &[InventoryItem]) -> Result<Vec<TypeGroup>, EngineError> {
    let mut groups: Vec<TypeGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in items.iter().filter(|i| i.needs_restock()) {
        let item_urgency = urgency(item)?;

        match index.get(item.item_type.as_str()) {
            Some(&i) => {
                let group = &mut groups[i];
                group.total = group.total.checked_add(item.missing).ok_or_else(|| {
                    EngineError::QuantityOverflow {
                        item_type: item.item_type.clone(),
                    }
                })?;
                group.peak_urgency = group.peak_urgency.max(item_urgency);
                group.source_index = item.source_index;
            }
            None => {
                index.insert(item.item_type.as_str(), groups.len());
                groups.push(TypeGroup {
                    item_type: item.item_type.clone(),
                    total: item.missing,
                    peak_urgency: item_urgency,
                    source_index: item.source_index,
                });
            }
        }
    }

    Ok(groups)
}

/// Pack missing units into crates of `capacity`, most urgent crate first.
///
/// Units are drawn one at a time from the type with the highest current
/// urgency. A type's urgency decays with the share of its units still
/// undrawn, so heavily depleted types spread over several crates instead of
/// filling the first one alone. Only the last filled crate may be partial.
pub fn build_crates(items: &[InventoryItem], capacity: u32) -> Result<Vec<Crate>, EngineError> {
    if capacity == 0 {
        return Err(EngineError::InvalidCapacity(capacity));
    }

    let groups = group_by_type(items)?;

    let mut working: Vec<Draw> = groups
        .iter()
        .enumerate()
        .map(|(i, g)| Draw {
            group: i,
            remaining: g.total,
            current_urgency: g.peak_urgency,
        })
        .collect();

    let mut crates: Vec<Crate> = Vec::new();
    let mut filling = Crate::new(0);
    let mut filled = 0u32;

    while !working.is_empty() {
        // Higher urgency first, then the type seen first
        working.sort_by(|a, b| {
            b.current_urgency
                .total_cmp(&a.current_urgency)
                .then_with(|| a.group.cmp(&b.group))
        });

        let head = &mut working[0];
        let group = &groups[head.group];

        filling.draw_unit(
            &group.item_type,
            round_urgency(head.current_urgency),
            group.source_index,
        );
        trace!(
            item_type = %group.item_type,
            urgency = head.current_urgency,
            crate_seq = filling.sequence,
            "drew unit"
        );

        head.remaining -= 1;
        filled += 1;
        // Multiply before dividing so whole-number urgencies stay exact for tie-breaks
        head.current_urgency = group.peak_urgency * head.remaining as f64 / group.total as f64;
        let exhausted = head.remaining == 0;

        if filled == capacity {
            let next = Crate::new(filling.sequence + 1);
            let full = std::mem::replace(&mut filling, next);
            debug!(
                crate_seq = full.sequence,
                lines = full.lines.len(),
                max_urgency = full.max_urgency(),
                "closed full crate"
            );
            crates.push(full);
            filled = 0;
        }

        if exhausted {
            working.remove(0);
        }
    }

    if !filling.is_empty() {
        debug!(
            crate_seq = filling.sequence,
            units = filled,
            "closed partial crate"
        );
        crates.push(filling);
    }

    // Stable: crates with equal urgency keep fill order
    crates.sort_by(|a, b| b.max_urgency().total_cmp(&a.max_urgency()));

    Ok(crates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(item_type: &str, missing: u32, capacity_max: u32, source_index: usize) -> InventoryItem {
        InventoryItem::new(item_type, capacity_max, missing, source_index)
    }

    #[test]
    fn test_urgency() {
        assert_eq!(urgency(&item("Cola", 12, 48, 0)).unwrap(), 25.0);
        assert_eq!(urgency(&item("Cola", 0, 0, 0)).unwrap(), 0.0);
        assert!(matches!(
            urgency(&item("Cola", 3, 0, 0)),
            Err(EngineError::DataIntegrity { .. })
        ));
    }

    #[test]
    fn test_round_urgency() {
        assert_eq!(round_urgency(58.333333), 58.33);
        assert_eq!(round_urgency(8.336), 8.34);
        assert_eq!(round_urgency(100.0), 100.0);
    }

    #[test]
    fn test_group_by_type_last_source_wins() {
        let items = vec![
            item("Tonic", 4, 12, 0),
            item("Cola", 0, 48, 1),
            item("Tonic", 6, 12, 2),
        ];
        let groups = group_by_type(&items).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].total, 10);
        assert_eq!(groups[0].peak_urgency, 50.0);
        assert_eq!(groups[0].source_index, 2);
    }

    #[test]
    fn test_zero_missing_items_ignored() {
        let items = vec![item("Cola", 0, 48, 0), item("Fanta", 0, 0, 1)];
        let crates = build_crates(&items, 24).unwrap();
        assert!(crates.is_empty());
    }

    #[test]
    fn test_exact_fit_produces_no_trailing_crate() {
        let items = vec![item("Cola", 24, 48, 0)];
        let crates = build_crates(&items, 24).unwrap();
        assert_eq!(crates.len(), 1);
        assert_eq!(crates[0].total_quantity(), 24);
    }

    #[test]
    fn test_single_unit_capacity() {
        let items = vec![item("Cola", 2, 4, 0), item("Tonic", 1, 4, 1)];
        let crates = build_crates(&items, 1).unwrap();

        // Cola 50, Tonic 25 -> Cola drawn, decays to 25, ties with Tonic and wins on insertion order
        let order: Vec<&str> = crates.iter().map(|c| c.lines[0].item_type.as_str()).collect();
        assert_eq!(order, vec!["Cola", "Cola", "Tonic"]);
    }

    #[test]
    fn test_summed_missing_overflow_is_an_error() {
        let items = vec![
            item("Cola", u32::MAX, u32::MAX, 0),
            item("Cola", 1, u32::MAX, 1),
        ];

        assert_eq!(
            group_by_type(&items).unwrap_err(),
            EngineError::QuantityOverflow {
                item_type: "Cola".to_string()
            }
        );
        assert!(matches!(
            build_crates(&items, 24),
            Err(EngineError::QuantityOverflow { .. })
        ));
    }

    #[test]
    fn test_equal_urgency_crates_keep_fill_order() {
        // Both types at 50 with one unit each: one crate apiece, both peaking at 50
        let items = vec![item("Cola", 1, 2, 0), item("Tonic", 1, 2, 1)];
        let crates = build_crates(&items, 1).unwrap();

        let sequences: Vec<usize> = crates.iter().map(|c| c.sequence).collect();
        assert_eq!(sequences, vec![0, 1]);
        assert_eq!(crates[0].lines[0].item_type, "Cola");
        assert_eq!(crates[0].max_urgency(), crates[1].max_urgency());
    }
}
