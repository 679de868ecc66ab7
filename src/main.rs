use std::io::IsTerminal;

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use bar_restock_rs::cli::{Cli, Command, ItemAction, Location, MissingChange, VenueAction};
use bar_restock_rs::config::RestockConfig;
use bar_restock_rs::engine::{apply_deletion, build_crates};
use bar_restock_rs::error::{RestockError, Result};
use bar_restock_rs::interface::{
    display_crates, display_items, prompt_capacity, prompt_yes_no, resolve_item_type,
    write_crates_csv,
};
use bar_restock_rs::state::{MemoryStore, VenueStateManager, load_store, save_store};

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = RestockConfig::load(cli.config.as_deref())?;
    let store = load_store(&cli.file)?;
    let mut manager = VenueStateManager::new(store);

    let changed = match cli.command {
        Command::Venue { action } => cmd_venue(&mut manager, action)?,
        Command::Item { action } => cmd_item(&mut manager, &config, action)?,
        Command::Missing {
            location,
            item_type,
            change,
        } => cmd_missing(&mut manager, &config, &location, &item_type, &change)?,
        Command::Crates {
            location,
            capacity,
            export,
        } => {
            cmd_crates(&manager, &config, &location, capacity, export.as_deref())?;
            false
        }
        Command::DeleteCrate {
            location,
            number,
            capacity,
            yes,
        } => cmd_delete_crate(&mut manager, &config, &location, number, capacity, yes)?,
    };

    if changed {
        save_store(&cli.file, manager.store())?;
        info!(path = %cli.file.display(), "state saved");
    }

    Ok(())
}

/// Venue registration. Returns whether the store changed.
fn cmd_venue(manager: &mut VenueStateManager<MemoryStore>, action: VenueAction) -> Result<bool> {
    match action {
        VenueAction::Add { name } => {
            manager.add_venue(&name)?;
            println!("Added venue '{}'.", name.trim());
            Ok(true)
        }
        VenueAction::List => {
            let venues = manager.venues()?;
            if venues.is_empty() {
                println!("No venues registered. Use 'venue add <name>' first.");
            }
            for venue in venues {
                println!("  {}", venue);
            }
            Ok(false)
        }
        VenueAction::Remove { name, yes } => {
            let venue = manager.resolve_venue(&name)?;
            if !yes && !prompt_yes_no(&format!("Remove '{}' and all its stock data?", venue), false)? {
                println!("Cancelled.");
                return Ok(false);
            }
            manager.remove_venue(&venue)?;
            println!("Removed venue '{}'.", venue);
            Ok(true)
        }
    }
}

fn cmd_item(
    manager: &mut VenueStateManager<MemoryStore>,
    config: &RestockConfig,
    action: ItemAction,
) -> Result<bool> {
    match action {
        ItemAction::Add {
            location,
            item_type,
            max,
        } => {
            let index = manager.add_item(&location.venue, location.kind, &item_type)?;
            if let Some(max) = max {
                manager.set_capacity_max(&location.venue, &item_type, max)?;
            }
            println!(
                "Added '{}' to {} at {} (#{}).",
                item_type.trim(),
                location.kind,
                location.venue,
                index
            );
            Ok(true)
        }
        ItemAction::List { location } => {
            let items = manager.snapshot(&location.venue, location.kind, config)?;
            display_items(&items, &location.venue, location.kind);
            Ok(false)
        }
    }
}

fn cmd_missing(
    manager: &mut VenueStateManager<MemoryStore>,
    config: &RestockConfig,
    location: &Location,
    item_type: &str,
    change: &MissingChange,
) -> Result<bool> {
    let known = manager.item_types(&location.venue, location.kind)?;
    let Some(item_type) = resolve_item_type(&known, item_type)? else {
        return Ok(false);
    };
    let index = manager.find_item(&location.venue, location.kind, &item_type)?;

    let new_missing = if let Some(by) = change.inc {
        manager.increment_missing(&location.venue, location.kind, index, by, config)?
    } else if let Some(by) = change.dec {
        manager.decrement_missing(&location.venue, location.kind, index, by)?
    } else {
        manager.clear_missing(&location.venue, location.kind, index)?;
        0
    };

    println!("{}: {} missing.", item_type, new_missing);
    Ok(true)
}

/// Capacity from the flag, else the default when there is nothing to ask, else ask.
fn resolve_capacity(config: &RestockConfig, location: &Location, capacity: Option<u32>) -> Result<u32> {
    let interactive = std::io::stdin().is_terminal();
    match config.preselected_capacity(location.kind, capacity, interactive) {
        Some(c) => Ok(c),
        None => prompt_capacity(location.kind, config.capacities(location.kind)),
    }
}

fn cmd_crates(
    manager: &VenueStateManager<MemoryStore>,
    config: &RestockConfig,
    location: &Location,
    capacity: Option<u32>,
    export: Option<&std::path::Path>,
) -> Result<()> {
    let capacity = resolve_capacity(config, location, capacity)?;
    let items = manager.snapshot(&location.venue, location.kind, config)?;
    let crates = build_crates(&items, capacity)?;
    debug!(crates = crates.len(), capacity, "built crates");

    display_crates(&crates, &location.venue, location.kind, capacity);

    if let Some(path) = export {
        write_crates_csv(&crates, path)?;
        println!("Wrote {} crates to {}", crates.len(), path.display());
    }

    Ok(())
}

fn cmd_delete_crate(
    manager: &mut VenueStateManager<MemoryStore>,
    config: &RestockConfig,
    location: &Location,
    number: usize,
    capacity: Option<u32>,
    yes: bool,
) -> Result<bool> {
    let capacity = resolve_capacity(config, location, capacity)?;
    let items = manager.snapshot(&location.venue, location.kind, config)?;
    let crates = build_crates(&items, capacity)?;

    let Some(chosen) = number.checked_sub(1).and_then(|i| crates.get(i)) else {
        return Err(RestockError::InvalidInput(format!(
            "crate {} does not exist ({} crates)",
            number,
            crates.len()
        )));
    };

    display_crates(
        std::slice::from_ref(chosen),
        &location.venue,
        location.kind,
        capacity,
    );

    if !yes && !prompt_yes_no(&format!("Mark crate {} as restocked?", number), false)? {
        println!("Cancelled.");
        return Ok(false);
    }

    let outcome = apply_deletion(&items, chosen);
    for failure in &outcome.failures {
        warn!(%failure, "skipped crate line");
        println!("Skipped: {}", failure);
    }

    let applied = manager.apply_updates(&location.venue, location.kind, &outcome.updates)?;
    println!("Updated {} items.", applied);

    Ok(applied > 0)
}
