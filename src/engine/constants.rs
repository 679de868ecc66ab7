use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::StockKind;

/// Decimal places kept on recorded urgency snapshots.
pub const URGENCY_DECIMALS: u32 = 2;

/// Scale applied to missing / max so urgency reads as a percentage.
pub const URGENCY_SCALE: f64 = 100.0;

/// Standard crate for fridge and shelf bottles.
pub const CRATE_CAPACITY_STANDARD: u32 = 24;

/// Large crate offered as a toggle for fridge and shelf stock.
pub const CRATE_CAPACITY_LARGE: u32 = 39;

/// Liquor boxes come in a single size.
pub const CRATE_CAPACITY_LIQUOR: u32 = 12;

/// Supported crate capacities per stock kind, first entry is the default.
pub fn crate_capacities(kind: StockKind) -> &'static [u32] {
    match kind {
        StockKind::Fridge | StockKind::Shelf => &[CRATE_CAPACITY_STANDARD, CRATE_CAPACITY_LARGE],
        StockKind::Liquor => &[CRATE_CAPACITY_LIQUOR],
    }
}

/// Default maximum stock per type, used when a venue has no override.
pub static DEFAULT_CAPACITY_MAX: LazyLock<HashMap<&'static str, u32>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    // Fridge
    m.insert("Spa Rood", 24);
    m.insert("Spa Blauw", 24);
    m.insert("Cola", 48);
    m.insert("Cola Zero", 24);
    m.insert("Fanta", 24);
    m.insert("Sprite", 24);
    m.insert("Ice Tea", 24);
    m.insert("Tonic", 12);
    m.insert("Bitter Lemon", 12);
    m.insert("Ginger Ale", 12);
    m.insert("Heineken", 48);
    m.insert("Radler", 24);
    // Shelf
    m.insert("IPA", 12);
    m.insert("Weizen", 12);
    m.insert("Tripel", 12);
    m.insert("Rosé", 6);
    m.insert("Wit", 6);
    m.insert("Rood", 6);
    // Liquor
    m.insert("Jägermeister", 3);
    m.insert("Vodka", 3);
    m.insert("Rum", 2);
    m.insert("Gin", 3);
    m.insert("Whisky", 2);
    m.insert("Tequila", 2);
    m
});
