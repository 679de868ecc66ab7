use tracing::{debug, info, warn};

use crate::config::RestockConfig;
use crate::error::{RestockError, Result};
use crate::models::{InventoryItem, MissingUpdate, SourceIndex, StockKind};
use crate::state::store::KeyValueStore;

const VENUES_KEY: &str = "venues";

/// Separator between key segments; venue names may not contain it.
const KEY_SEPARATOR: char = '_';

/// Key holding the missing count of one item: `{kind}_{venue}_{index}`.
pub fn missing_key(kind: StockKind, venue: &str, index: SourceIndex) -> String {
    format!("{}_{}_{}", kind.prefix(), venue, index)
}

/// Key holding the ordered item types of a venue location.
pub fn items_key(kind: StockKind, venue: &str) -> String {
    format!("items_{}_{}", kind.prefix(), venue)
}

/// Key holding a venue's capacity max override for a type.
pub fn max_key(venue: &str, item_type: &str) -> String {
    format!("max_{}_{}", venue, item_type)
}

/// Venue, item and missing-count state on top of a flat key-value store.
pub struct VenueStateManager<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> VenueStateManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn read_list(&self, key: &str) -> Result<Vec<String>> {
        match self.store.get(key) {
            Some(raw) => Ok(serde_json::from_str(raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn write_list(&mut self, key: &str, list: &[String]) -> Result<()> {
        let raw = serde_json::to_string(list)?;
        self.store.set(key, raw);
        Ok(())
    }

    fn read_count(&self, key: &str) -> Result<Option<u32>> {
        match self.store.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| RestockError::CorruptValue {
                    key: key.to_string(),
                    value: raw.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// All registered venue names, in registration order.
    pub fn venues(&self) -> Result<Vec<String>> {
        self.read_list(VENUES_KEY)
    }

    /// Canonical spelling of a venue name (case-insensitive).
    pub fn resolve_venue(&self, name: &str) -> Result<String> {
        let wanted = name.trim().to_lowercase();
        self.venues()?
            .into_iter()
            .find(|v| v.to_lowercase() == wanted)
            .ok_or_else(|| RestockError::VenueNotFound(name.to_string()))
    }

    /// Register a new venue.
    pub fn add_venue(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RestockError::InvalidInput(
                "Venue name cannot be empty".to_string(),
            ));
        }
        if name.contains(KEY_SEPARATOR) {
            return Err(RestockError::InvalidInput(format!(
                "Venue name cannot contain '{}'",
                KEY_SEPARATOR
            )));
        }

        let mut venues = self.venues()?;
        if venues.iter().any(|v| v.to_lowercase() == name.to_lowercase()) {
            return Err(RestockError::DuplicateVenue(name.to_string()));
        }

        venues.push(name.to_string());
        self.write_list(VENUES_KEY, &venues)?;
        info!(venue = name, "added venue");
        Ok(())
    }

    /// Remove a venue together with every item, count and override stored for it.
    pub fn remove_venue(&mut self, name: &str) -> Result<()> {
        let venue = self.resolve_venue(name)?;

        let mut keys = self.store.keys_with_prefix(&format!("max_{}_", venue));
        for kind in StockKind::ALL {
            keys.extend(
                self.store
                    .keys_with_prefix(&format!("{}_{}_", kind.prefix(), venue)),
            );
            keys.push(items_key(kind, &venue));
        }
        for key in &keys {
            self.store.remove(key);
        }

        let venues: Vec<String> = self.venues()?.into_iter().filter(|v| *v != venue).collect();
        self.write_list(VENUES_KEY, &venues)?;
        info!(venue = %venue, "removed venue");
        Ok(())
    }

    /// Item types of a venue location; the position is the source index.
    pub fn item_types(&self, venue: &str, kind: StockKind) -> Result<Vec<String>> {
        let venue = self.resolve_venue(venue)?;
        self.read_list(&items_key(kind, &venue))
    }

    /// Add an item type to a venue location and return its source index.
    pub fn add_item(&mut self, venue: &str, kind: StockKind, item_type: &str) -> Result<SourceIndex> {
        let venue = self.resolve_venue(venue)?;
        let item_type = item_type.trim();
        if item_type.is_empty() {
            return Err(RestockError::InvalidInput(
                "Item type cannot be empty".to_string(),
            ));
        }

        let mut types = self.read_list(&items_key(kind, &venue))?;
        if types
            .iter()
            .any(|t| t.to_lowercase() == item_type.to_lowercase())
        {
            return Err(RestockError::DuplicateItem {
                venue,
                kind,
                item_type: item_type.to_string(),
            });
        }

        let index = types.len();
        types.push(item_type.to_string());
        self.write_list(&items_key(kind, &venue), &types)?;
        debug!(venue = %venue, %kind, item_type, index, "added item");
        Ok(index)
    }

    /// Source index of an item type (case-insensitive).
    pub fn find_item(&self, venue: &str, kind: StockKind, item_type: &str) -> Result<SourceIndex> {
        let venue = self.resolve_venue(venue)?;
        let wanted = item_type.trim().to_lowercase();
        self.read_list(&items_key(kind, &venue))?
            .iter()
            .position(|t| t.to_lowercase() == wanted)
            .ok_or_else(|| RestockError::ItemNotFound {
                venue,
                kind,
                item_type: item_type.to_string(),
            })
    }

    fn item_type_at(&self, venue: &str, kind: StockKind, index: SourceIndex) -> Result<String> {
        self.read_list(&items_key(kind, venue))?
            .into_iter()
            .nth(index)
            .ok_or_else(|| RestockError::ItemNotFound {
                venue: venue.to_string(),
                kind,
                item_type: format!("#{}", index),
            })
    }

    /// Set a venue-level capacity max for a type.
    pub fn set_capacity_max(&mut self, venue: &str, item_type: &str, max: u32) -> Result<()> {
        let venue = self.resolve_venue(venue)?;
        self.store.set(&max_key(&venue, item_type.trim()), max.to_string());
        Ok(())
    }

    /// Capacity max for a type: the venue override, else the configured default.
    pub fn capacity_max(&self, venue: &str, item_type: &str, config: &RestockConfig) -> Result<u32> {
        let venue = self.resolve_venue(venue)?;
        if let Some(max) = self.read_count(&max_key(&venue, item_type))? {
            return Ok(max);
        }
        config
            .default_max(item_type)
            .ok_or_else(|| RestockError::MissingCapacityMax {
                venue,
                item_type: item_type.to_string(),
            })
    }

    /// Current missing count of an item (0 when never recorded).
    pub fn missing(&self, venue: &str, kind: StockKind, index: SourceIndex) -> Result<u32> {
        let venue = self.resolve_venue(venue)?;
        self.item_type_at(&venue, kind, index)?;
        Ok(self
            .read_count(&missing_key(kind, &venue, index))?
            .unwrap_or(0))
    }

    /// Raise the missing count, clamped to the item's capacity max.
    pub fn increment_missing(
        &mut self,
        venue: &str,
        kind: StockKind,
        index: SourceIndex,
        by: u32,
        config: &RestockConfig,
    ) -> Result<u32> {
        let venue = self.resolve_venue(venue)?;
        let item_type = self.item_type_at(&venue, kind, index)?;
        let max = self.capacity_max(&venue, &item_type, config)?;
        let current = self.missing(&venue, kind, index)?;

        let new_missing = current.saturating_add(by).min(max);
        self.store
            .set(&missing_key(kind, &venue, index), new_missing.to_string());
        debug!(venue = %venue, %kind, item_type = %item_type, new_missing, "incremented missing");
        Ok(new_missing)
    }

    /// Lower the missing count, saturating at zero.
    pub fn decrement_missing(
        &mut self,
        venue: &str,
        kind: StockKind,
        index: SourceIndex,
        by: u32,
    ) -> Result<u32> {
        let venue = self.resolve_venue(venue)?;
        let current = self.missing(&venue, kind, index)?;

        let new_missing = current.saturating_sub(by);
        self.store
            .set(&missing_key(kind, &venue, index), new_missing.to_string());
        debug!(venue = %venue, %kind, index, new_missing, "decremented missing");
        Ok(new_missing)
    }

    /// Reset the missing count of an item to zero.
    pub fn clear_missing(&mut self, venue: &str, kind: StockKind, index: SourceIndex) -> Result<()> {
        let venue = self.resolve_venue(venue)?;
        self.item_type_at(&venue, kind, index)?;
        self.store.remove(&missing_key(kind, &venue, index));
        Ok(())
    }

    /// Current items of a venue location, ready for the crate engine.
    ///
    /// Fails if any type has no resolvable capacity max.
    pub fn snapshot(
        &self,
        venue: &str,
        kind: StockKind,
        config: &RestockConfig,
    ) -> Result<Vec<InventoryItem>> {
        let venue = self.resolve_venue(venue)?;
        let types = self.read_list(&items_key(kind, &venue))?;

        let mut items = Vec::with_capacity(types.len());
        for (index, item_type) in types.into_iter().enumerate() {
            let capacity_max = self.capacity_max(&venue, &item_type, config)?;
            let missing = self
                .read_count(&missing_key(kind, &venue, index))?
                .unwrap_or(0);
            items.push(InventoryItem::new(item_type, capacity_max, missing, index));
        }
        Ok(items)
    }

    /// Persist missing counts produced by a crate deletion.
    ///
    /// Updates for indices that no longer exist are skipped; returns how many were written.
    pub fn apply_updates(
        &mut self,
        venue: &str,
        kind: StockKind,
        updates: &[MissingUpdate],
    ) -> Result<usize> {
        let venue = self.resolve_venue(venue)?;
        let count = self.read_list(&items_key(kind, &venue))?.len();

        let mut applied = 0;
        for update in updates {
            if update.source_index >= count {
                warn!(venue = %venue, %kind, index = update.source_index, "skipping update for unknown item");
                continue;
            }
            let key = missing_key(kind, &venue, update.source_index);
            if update.new_missing == 0 {
                self.store.remove(&key);
            } else {
                self.store.set(&key, update.new_missing.to_string());
            }
            applied += 1;
        }
        Ok(applied)
    }
}
