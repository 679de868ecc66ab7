pub mod bench;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod interface;
pub mod models;
pub mod state;

pub use engine::{DeletionOutcome, apply_deletion, build_crates};
pub use error::{EngineError, RestockError, Result};
pub use models::{Crate, CrateLine, InventoryItem, MissingUpdate, StockKind};
