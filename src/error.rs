use thiserror::Error;

use crate::models::{SourceIndex, StockKind};

/// Failures raised by the crate recommendation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Invalid crate capacity: {0} (must be positive)")]
    InvalidCapacity(u32),

    #[error("Data integrity error: '{item_type}' has {missing} missing but a capacity max of 0")]
    DataIntegrity { item_type: String, missing: u32 },

    #[error("Missing units of '{item_type}' exceed the countable total")]
    QuantityOverflow { item_type: String },

    #[error("Crate line '{item_type}' refers to source index {source_index}, which no longer exists")]
    NotFound {
        source_index: SourceIndex,
        item_type: String,
    },
}

#[derive(Debug, Error)]
pub enum RestockError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Venue not found: {0}")]
    VenueNotFound(String),

    #[error("Venue already exists: {0}")]
    DuplicateVenue(String),

    #[error("Item not found: {item_type} ({kind} at {venue})")]
    ItemNotFound {
        venue: String,
        kind: StockKind,
        item_type: String,
    },

    #[error("Item already exists: {item_type} ({kind} at {venue})")]
    DuplicateItem {
        venue: String,
        kind: StockKind,
        item_type: String,
    },

    #[error("No capacity max configured for '{item_type}' at {venue}")]
    MissingCapacityMax { venue: String, item_type: String },

    #[error("Corrupt value under key '{key}': {value}")]
    CorruptValue { key: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, RestockError>;
