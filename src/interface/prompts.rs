use dialoguer::{Confirm, Select};
use strsim::jaro_winkler;

use crate::error::Result;
use crate::models::StockKind;

/// Minimum Jaro-Winkler similarity for a type to count as a fuzzy match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Maximum number of fuzzy candidates offered in a selection.
const MAX_SUGGESTIONS: usize = 5;

/// Known types similar to `input`, best match first.
pub fn fuzzy_matches<'a>(known_types: &'a [String], input: &str) -> Vec<(&'a str, f64)> {
    let input = input.trim().to_lowercase();
    let mut candidates: Vec<(&str, f64)> = known_types
        .iter()
        .map(|t| (t.as_str(), jaro_winkler(&t.to_lowercase(), &input)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates
}

/// Resolve a typed item name against the known types of a location.
///
/// Exact (case-insensitive) matches return directly; otherwise the user
/// confirms or picks among fuzzy matches. `None` means nothing was chosen.
pub fn resolve_item_type(known_types: &[String], input: &str) -> Result<Option<String>> {
    let wanted = input.trim().to_lowercase();
    if let Some(exact) = known_types.iter().find(|t| t.to_lowercase() == wanted) {
        return Ok(Some(exact.clone()));
    }

    let candidates = fuzzy_matches(known_types, input);

    if candidates.is_empty() {
        println!("No matching item found for '{}'", input.trim());
        return Ok(None);
    }

    if candidates.len() == 1 {
        let name = candidates[0].0;
        let confirm = Confirm::new()
            .with_prompt(format!("Did you mean '{}'?", name))
            .default(true)
            .interact()?;

        return Ok(confirm.then(|| name.to_string()));
    }

    let options: Vec<String> = candidates
        .iter()
        .take(MAX_SUGGESTIONS)
        .map(|(name, _)| name.to_string())
        .collect();

    let mut selection_options = options.clone();
    selection_options.push("None of these".to_string());

    let selection = Select::new()
        .with_prompt("Which did you mean?")
        .items(&selection_options)
        .default(0)
        .interact()?;

    Ok(options.get(selection).cloned())
}

/// Let the user pick one of the supported crate capacities.
pub fn prompt_capacity(kind: StockKind, capacities: &[u32]) -> Result<u32> {
    if let [only] = capacities {
        return Ok(*only);
    }

    let options: Vec<String> = capacities
        .iter()
        .map(|c| format!("{} per crate", c))
        .collect();

    let selection = Select::new()
        .with_prompt(format!("Crate size for {} stock", kind))
        .items(&options)
        .default(0)
        .interact()?;

    Ok(capacities[selection])
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
