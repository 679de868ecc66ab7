use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of an item within its venue + stock kind list.
///
/// The state layer owns the mapping from index to storage key.
pub type SourceIndex = usize;

/// Location family an item list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StockKind {
    Fridge,
    Shelf,
    Liquor,
}

impl StockKind {
    pub const ALL: [StockKind; 3] = [StockKind::Fridge, StockKind::Shelf, StockKind::Liquor];

    /// Prefix used in storage keys.
    pub fn prefix(self) -> &'static str {
        match self {
            StockKind::Fridge => "fridge",
            StockKind::Shelf => "shelf",
            StockKind::Liquor => "liquor",
        }
    }
}

impl fmt::Display for StockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Snapshot of one stocked type at a venue location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub item_type: String,
    pub capacity_max: u32,
    pub missing: u32,
    pub source_index: SourceIndex,
}

impl InventoryItem {
    pub fn new(
        item_type: impl Into<String>,
        capacity_max: u32,
        missing: u32,
        source_index: SourceIndex,
    ) -> Self {
        Self {
            item_type: item_type.into(),
            capacity_max,
            missing,
            source_index,
        }
    }

    /// Whether this item contributes anything to a restock.
    #[inline]
    pub fn needs_restock(&self) -> bool {
        self.missing > 0
    }

    /// Units currently on hand, assuming `missing` is clamped to the maximum.
    #[inline]
    pub fn on_hand(&self) -> u32 {
        self.capacity_max.saturating_sub(self.missing)
    }
}
