mod item;
mod restock_crate;

pub use item::{InventoryItem, SourceIndex, StockKind};
pub use restock_crate::{Crate, CrateLine, MissingUpdate};
