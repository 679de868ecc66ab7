use serde::Serialize;

use super::SourceIndex;

/// Units of one type placed into a crate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrateLine {
    pub item_type: String,

    pub quantity: u32,

    /// Urgency of the type at its latest draw into this crate, rounded to 2 decimals.
    pub urgency_snapshot: f64,

    /// Carried from the contributing item so a deletion can be mapped back.
    pub source_index: SourceIndex,
}

/// A fixed-capacity bundle of restock units.
///
/// Crates are recomputed on every request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Crate {
    /// 0-based position in fill order.
    pub sequence: usize,

    /// Lines in the order their type was first drawn into this crate.
    pub lines: Vec<CrateLine>,
}

impl Crate {
    pub fn new(sequence: usize) -> Self {
        Self {
            sequence,
            lines: Vec::new(),
        }
    }

    /// Sum of quantities across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Highest line urgency, 0.0 for an empty crate.
    pub fn max_urgency(&self) -> f64 {
        self.lines
            .iter()
            .map(|l| l.urgency_snapshot)
            .fold(0.0, f64::max)
    }

    /// Quantity of a type in this crate (exact match).
    pub fn quantity_of(&self, item_type: &str) -> u32 {
        self.lines
            .iter()
            .filter(|l| l.item_type == item_type)
            .map(|l| l.quantity)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of a type, opening a line for it if needed.
    pub(crate) fn draw_unit(&mut self, item_type: &str, urgency: f64, source_index: SourceIndex) {
        match self.lines.iter_mut().find(|l| l.item_type == item_type) {
            Some(line) => {
                line.quantity += 1;
                line.urgency_snapshot = urgency;
                line.source_index = source_index;
            }
            None => self.lines.push(CrateLine {
                item_type: item_type.to_string(),
                quantity: 1,
                urgency_snapshot: urgency,
                source_index,
            }),
        }
    }
}

/// New missing count for a storage record, produced by a crate deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MissingUpdate {
    pub source_index: SourceIndex,
    pub new_missing: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_unit_merges_lines() {
        let mut c = Crate::new(0);
        c.draw_unit("Cola", 80.0, 1);
        c.draw_unit("Tonic", 60.0, 2);
        c.draw_unit("Cola", 70.0, 1);

        assert_eq!(c.lines.len(), 2);
        assert_eq!(c.quantity_of("Cola"), 2);
        assert_eq!(c.lines[0].urgency_snapshot, 70.0);
        assert_eq!(c.total_quantity(), 3);
    }

    #[test]
    fn test_max_urgency() {
        let mut c = Crate::new(0);
        assert_eq!(c.max_urgency(), 0.0);

        c.draw_unit("Cola", 12.5, 0);
        c.draw_unit("Tonic", 40.25, 1);
        assert_eq!(c.max_urgency(), 40.25);
    }
}
