use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::state::store::MemoryStore;

/// Load a store from a JSON file.
///
/// A file that does not exist yet loads as an empty store.
pub fn load_store<P: AsRef<Path>>(path: P) -> Result<MemoryStore> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "state file absent, starting empty");
        return Ok(MemoryStore::new());
    }

    let content = fs::read_to_string(path)?;
    let store: MemoryStore = serde_json::from_str(&content)?;
    debug!(path = %path.display(), keys = store.len(), "loaded state");
    Ok(store)
}

/// Save a store to a JSON file.
pub fn save_store<P: AsRef<Path>>(path: P, store: &MemoryStore) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(store)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), keys = store.len(), "saved state");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::store::KeyValueStore;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    #[test]
    fn test_load_and_save_roundtrip() {
        let json = r#"{"venues": "[\"Dok\"]", "fridge_Dok_0": "4"}"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let store = load_store(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("fridge_Dok_0"), Some("4"));

        let out_file = NamedTempFile::new().unwrap();
        save_store(out_file.path(), &store).unwrap();

        let reloaded = load_store(out_file.path()).unwrap();
        assert_eq!(reloaded, store);
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempdir().unwrap();
        let store = load_store(dir.path().join("absent.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_rejects_non_object() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[1, 2, 3]").unwrap();
        assert!(load_store(file.path()).is_err());
    }
}
