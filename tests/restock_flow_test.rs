use tempfile::tempdir;

use bar_restock_rs::config::RestockConfig;
use bar_restock_rs::engine::{apply_deletion, build_crates};
use bar_restock_rs::error::RestockError;
use bar_restock_rs::models::StockKind;
use bar_restock_rs::state::{MemoryStore, VenueStateManager, load_store, save_store};

fn stocked_fridge(config: &RestockConfig) -> VenueStateManager<MemoryStore> {
    let mut manager = VenueStateManager::new(MemoryStore::new());
    manager.add_venue("De Dok").unwrap();

    for (item_type, missing) in [("Spa Rood", 20), ("Tonic", 12), ("Cola", 10)] {
        let index = manager
            .add_item("De Dok", StockKind::Fridge, item_type)
            .unwrap();
        manager
            .increment_missing("De Dok", StockKind::Fridge, index, missing, config)
            .unwrap();
    }
    manager
}

#[test]
fn test_deleting_a_crate_lowers_missing_counts() {
    let config = RestockConfig::default();
    let mut manager = stocked_fridge(&config);

    let items = manager
        .snapshot("De Dok", StockKind::Fridge, &config)
        .unwrap();
    let crates = build_crates(&items, 24).unwrap();
    assert_eq!(crates.len(), 2);

    let outcome = apply_deletion(&items, &crates[0]);
    assert!(outcome.is_complete());
    let applied = manager
        .apply_updates("De Dok", StockKind::Fridge, &outcome.updates)
        .unwrap();
    assert_eq!(applied, crates[0].lines.len());

    // Only the second crate's units remain missing
    let after = manager
        .snapshot("De Dok", StockKind::Fridge, &config)
        .unwrap();
    let remaining: u32 = after.iter().map(|i| i.missing).sum();
    assert_eq!(remaining, crates[1].total_quantity());

    let rebuilt = build_crates(&after, 24).unwrap();
    assert_eq!(rebuilt.len(), 1);
    assert_eq!(rebuilt[0].total_quantity(), crates[1].total_quantity());
}

#[test]
fn test_stale_crate_line_is_reported_not_fatal() {
    let config = RestockConfig::default();
    let manager = stocked_fridge(&config);

    let items = manager
        .snapshot("De Dok", StockKind::Fridge, &config)
        .unwrap();
    let crates = build_crates(&items, 39).unwrap();

    // Drop one item from the snapshot to simulate a concurrent removal
    let fewer: Vec<_> = items.into_iter().filter(|i| i.item_type != "Tonic").collect();
    let outcome = apply_deletion(&fewer, &crates[0]);

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.updates.len(), crates[0].lines.len() - 1);
}

#[test]
fn test_state_survives_save_and_load() {
    let config = RestockConfig::default();
    let manager = stocked_fridge(&config);

    let dir = tempdir().unwrap();
    let path = dir.path().join("restock_state.json");
    save_store(&path, manager.store()).unwrap();

    let reloaded = VenueStateManager::new(load_store(&path).unwrap());
    assert_eq!(reloaded.venues().unwrap(), vec!["De Dok".to_string()]);
    assert_eq!(
        reloaded
            .snapshot("De Dok", StockKind::Fridge, &config)
            .unwrap(),
        manager
            .snapshot("De Dok", StockKind::Fridge, &config)
            .unwrap()
    );
}

#[test]
fn test_unknown_type_without_override_blocks_crates() {
    let config = RestockConfig::default();
    let mut manager = stocked_fridge(&config);
    manager
        .add_item("De Dok", StockKind::Fridge, "Secret Cordial")
        .unwrap();

    assert!(matches!(
        manager.snapshot("De Dok", StockKind::Fridge, &config),
        Err(RestockError::MissingCapacityMax { .. })
    ));
}

#[test]
fn test_increment_is_clamped() {
    let config = RestockConfig::default();
    let mut manager = stocked_fridge(&config);

    let tonic = manager
        .find_item("De Dok", StockKind::Fridge, "TONIC")
        .unwrap();
    let value = manager
        .increment_missing("De Dok", StockKind::Fridge, tonic, 5, &config)
        .unwrap();
    assert_eq!(value, 12);
}
