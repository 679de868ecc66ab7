mod manager;
mod persistence;
mod store;

pub use manager::{VenueStateManager, items_key, max_key, missing_key};
pub use persistence::{load_store, save_store};
pub use store::{KeyValueStore, MemoryStore};
