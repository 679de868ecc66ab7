pub mod export;
pub mod prompts;
pub mod render;

pub use export::{write_crates, write_crates_csv};
pub use prompts::{fuzzy_matches, prompt_capacity, prompt_yes_no, resolve_item_type};
pub use render::{display_crates, display_items};
