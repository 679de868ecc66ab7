pub mod constants;
pub mod deletion;
pub mod packing;

pub use constants::*;
pub use deletion::{DeletionOutcome, apply_deletion};
pub use packing::{TypeGroup, build_crates, group_by_type, round_urgency, urgency};
