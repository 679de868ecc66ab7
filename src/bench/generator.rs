use rand::Rng;

use crate::models::InventoryItem;

/// Inclusive range of capacity max values given to generated items.
#[derive(Debug, Clone, Copy)]
pub struct MaxRange {
    pub min: u32,
    pub max: u32,
}

impl Default for MaxRange {
    fn default() -> Self {
        Self { min: 2, max: 48 }
    }
}

/// Generate `types` distinct items with random maximums and missing counts.
///
/// Missing counts are drawn within `[0, capacity_max]`, the same clamp the
/// state layer applies.
pub fn random_items(rng: &mut impl Rng, types: usize, range: MaxRange) -> Vec<InventoryItem> {
    let lo = range.min.max(1);
    let hi = range.max.max(lo);

    (0..types)
        .map(|i| {
            let capacity_max = rng.gen_range(lo..=hi);
            let missing = rng.gen_range(0..=capacity_max);
            InventoryItem::new(format!("Type {:03}", i), capacity_max, missing, i)
        })
        .collect()
}
