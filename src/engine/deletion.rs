use tracing::warn;

use crate::error::EngineError;
use crate::models::{Crate, InventoryItem, MissingUpdate};

/// Result of translating a deleted crate into storage decrements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeletionOutcome {
    /// New missing counts the caller should persist.
    pub updates: Vec<MissingUpdate>,

    /// Lines whose source record could not be found; skipped.
    pub failures: Vec<EngineError>,
}

impl DeletionOutcome {
    /// True when every crate line resolved to an item.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Compute the decrements that removing `crate_` implies for `items`.
///
/// Pure: nothing is written, and identical inputs give identical outcomes.
/// A line that no longer resolves is reported and the rest still apply.
pub fn apply_deletion(items: &[InventoryItem], crate_: &Crate) -> DeletionOutcome {
    let mut outcome = DeletionOutcome::default();

    for line in &crate_.lines {
        match items.iter().find(|i| i.source_index == line.source_index) {
            Some(item) => outcome.updates.push(MissingUpdate {
                source_index: item.source_index,
                new_missing: item.missing.saturating_sub(line.quantity),
            }),
            None => {
                warn!(
                    item_type = %line.item_type,
                    source_index = line.source_index,
                    "crate line has no matching item"
                );
                outcome.failures.push(EngineError::NotFound {
                    source_index: line.source_index,
                    item_type: line.item_type.clone(),
                });
            }
        }
    }

    outcome
}
