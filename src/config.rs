use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::constants::{DEFAULT_CAPACITY_MAX, crate_capacities};
use crate::error::{RestockError, Result};
use crate::models::StockKind;

/// Runtime configuration for crate sizes and default maximums.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestockConfig {
    /// Supported crate capacities per kind; the first is the default.
    pub crate_capacities: HashMap<StockKind, Vec<u32>>,

    /// Capacity max per type when a venue sets no override.
    pub default_capacity_max: HashMap<String, u32>,
}

impl Default for RestockConfig {
    fn default() -> Self {
        Self {
            crate_capacities: StockKind::ALL
                .iter()
                .map(|&kind| (kind, crate_capacities(kind).to_vec()))
                .collect(),
            default_capacity_max: DEFAULT_CAPACITY_MAX
                .iter()
                .map(|(name, max)| (name.to_string(), *max))
                .collect(),
        }
    }
}

impl RestockConfig {
    /// Load a config file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject capacity lists that are empty or contain zero.
    pub fn validate(&self) -> Result<()> {
        for (kind, capacities) in &self.crate_capacities {
            if capacities.is_empty() || capacities.contains(&0) {
                return Err(RestockError::InvalidInput(format!(
                    "crate capacities for {} must be non-empty and positive",
                    kind
                )));
            }
        }
        Ok(())
    }

    /// Supported capacities for a kind, falling back to the built-in sizes.
    pub fn capacities(&self, kind: StockKind) -> &[u32] {
        match self.crate_capacities.get(&kind) {
            Some(c) if !c.is_empty() => c.as_slice(),
            _ => crate_capacities(kind),
        }
    }

    /// Default crate capacity for a kind.
    pub fn default_capacity(&self, kind: StockKind) -> u32 {
        self.capacities(kind)[0]
    }

    /// Crate capacity that needs no prompt: the requested size, else the
    /// default when there is a single size or no terminal to ask on.
    pub fn preselected_capacity(
        &self,
        kind: StockKind,
        requested: Option<u32>,
        interactive: bool,
    ) -> Option<u32> {
        if requested.is_some() {
            return requested;
        }
        if !interactive || self.capacities(kind).len() == 1 {
            return Some(self.default_capacity(kind));
        }
        None
    }

    /// Default capacity max for a type (case-insensitive).
    pub fn default_max(&self, item_type: &str) -> Option<u32> {
        let key = item_type.to_lowercase();
        self.default_capacity_max
            .iter()
            .find(|(name, _)| name.to_lowercase() == key)
            .map(|(_, max)| *max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = RestockConfig::default();
        assert_eq!(config.capacities(StockKind::Fridge), &[24, 39]);
        assert_eq!(config.default_capacity(StockKind::Liquor), 12);
        assert_eq!(config.default_max("spa rood"), Some(24));
        assert_eq!(config.default_max("Mystery Drink"), None);
    }

    #[test]
    fn test_preselected_capacity() {
        let config = RestockConfig::default();

        // No terminal: fall back to the first supported size
        assert_eq!(config.preselected_capacity(StockKind::Fridge, None, false), Some(24));
        // Two sizes and a terminal: the user is asked
        assert_eq!(config.preselected_capacity(StockKind::Fridge, None, true), None);
        // A single size never needs asking
        assert_eq!(config.preselected_capacity(StockKind::Liquor, None, true), Some(12));
        assert_eq!(config.preselected_capacity(StockKind::Shelf, Some(39), true), Some(39));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let json = r#"{"crate_capacities": {"liquor": [6, 12]}}"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = RestockConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.capacities(StockKind::Liquor), &[6, 12]);
        // Kinds not listed fall back to the built-in sizes
        assert_eq!(config.capacities(StockKind::Shelf), &[24, 39]);
        assert_eq!(config.default_max("Tonic"), Some(12));
    }

    #[test]
    fn test_load_rejects_zero_capacity() {
        let json = r#"{"crate_capacities": {"fridge": [0]}}"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        assert!(matches!(
            RestockConfig::load(Some(file.path())),
            Err(RestockError::InvalidInput(_))
        ));
    }
}
