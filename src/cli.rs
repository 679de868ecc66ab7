use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::StockKind;

/// BarRestock — track missing bar stock and pack restock crates by urgency.
#[derive(Parser, Debug)]
#[command(name = "bar_restock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the state JSON file.
    #[arg(short, long, global = true, default_value = "restock_state.json")]
    pub file: PathBuf,

    /// Optional JSON config with crate sizes and default maximums.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage venues.
    Venue {
        #[command(subcommand)]
        action: VenueAction,
    },

    /// Manage the items stocked at a venue.
    Item {
        #[command(subcommand)]
        action: ItemAction,
    },

    /// Change the missing count of an item.
    Missing {
        #[command(flatten)]
        location: Location,

        /// Item type (fuzzy matched against known types).
        item_type: String,

        #[command(flatten)]
        change: MissingChange,
    },

    /// Show recommended restock crates.
    Crates {
        #[command(flatten)]
        location: Location,

        /// Units per crate. Prompts when the kind supports several sizes.
        #[arg(long)]
        capacity: Option<u32>,

        /// Also write the crates to a CSV file.
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Mark a crate as restocked, lowering the missing counts it covers.
    DeleteCrate {
        #[command(flatten)]
        location: Location,

        /// Crate number as shown by `crates` (1 = most urgent).
        #[arg(long)]
        number: usize,

        /// Units per crate; must match the size the crate was built with.
        #[arg(long)]
        capacity: Option<u32>,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum VenueAction {
    /// Register a venue.
    Add { name: String },

    /// List registered venues.
    List,

    /// Remove a venue and all of its stock data.
    Remove {
        name: String,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ItemAction {
    /// Add an item type to a venue location.
    Add {
        #[command(flatten)]
        location: Location,

        item_type: String,

        /// Venue-specific maximum stock for this type.
        #[arg(long)]
        max: Option<u32>,
    },

    /// List items with their missing counts.
    List {
        #[command(flatten)]
        location: Location,
    },
}

/// A venue and one of its stock locations.
#[derive(Args, Debug, Clone)]
pub struct Location {
    /// Venue name.
    #[arg(long)]
    pub venue: String,

    /// Stock location.
    #[arg(long, value_enum)]
    pub kind: StockKind,
}

/// Exactly one change to a missing count.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct MissingChange {
    /// Add to the missing count (clamped to the item's maximum).
    #[arg(long)]
    pub inc: Option<u32>,

    /// Subtract from the missing count (floored at zero).
    #[arg(long)]
    pub dec: Option<u32>,

    /// Reset the missing count to zero.
    #[arg(long)]
    pub clear: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crates() {
        let cli = Cli::try_parse_from([
            "bar_restock",
            "crates",
            "--venue",
            "De Dok",
            "--kind",
            "fridge",
            "--capacity",
            "39",
        ])
        .unwrap();

        match cli.command {
            Command::Crates {
                location, capacity, ..
            } => {
                assert_eq!(location.venue, "De Dok");
                assert_eq!(location.kind, StockKind::Fridge);
                assert_eq!(capacity, Some(39));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.file, PathBuf::from("restock_state.json"));
    }

    #[test]
    fn test_missing_requires_one_change() {
        let base = ["bar_restock", "missing", "--venue", "Dok", "--kind", "shelf", "IPA"];
        assert!(Cli::try_parse_from(base).is_err());

        let mut both = base.to_vec();
        both.extend(["--inc", "2", "--clear"]);
        assert!(Cli::try_parse_from(both).is_err());

        let mut one = base.to_vec();
        one.extend(["--dec", "2"]);
        assert!(Cli::try_parse_from(one).is_ok());
    }

    #[test]
    fn test_negative_capacity_rejected() {
        let result = Cli::try_parse_from([
            "bar_restock",
            "crates",
            "--venue",
            "Dok",
            "--kind",
            "liquor",
            "--capacity",
            "-5",
        ]);
        assert!(result.is_err());
    }
}
