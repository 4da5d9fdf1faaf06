use crate::types::{LayoutRow, Point};
use std::collections::HashMap;
use tracing::debug;

/// Everything the index knows about an item's home slot
#[derive(Debug, Clone, PartialEq)]
pub struct SlotInfo<'a> {
    pub slot_id: &'a str,
    pub pick_seq: i64,
    pub coords: Option<Point>,
}

/// Read-only lookups built once from the layout table.
#[derive(Debug, Clone, Default)]
pub struct SlotIndex {
    item_to_slot: HashMap<String, String>,
    item_to_seq: HashMap<String, i64>,
    slot_to_coords: HashMap<String, Point>,
}

impl SlotIndex {
    /// Builds the index, keeping only the first layout row seen for each item.
    pub fn build(rows: &[LayoutRow]) -> Self {
        let mut index = Self::default();
        let mut duplicates = 0usize;

        for row in rows {
            if index.item_to_slot.contains_key(&row.item) {
                duplicates += 1;
                continue;
            }

            index
                .item_to_slot
                .insert(row.item.clone(), row.slot_id.clone());
            index.item_to_seq.insert(row.item.clone(), row.pick_seq);
            index
                .slot_to_coords
                .entry(row.slot_id.clone())
                .or_insert_with(|| Point::new(row.x, row.y));
        }

        debug!(
            items = index.item_to_slot.len(),
            slots = index.slot_to_coords.len(),
            duplicates,
            "Built slot index"
        );

        index
    }

    pub fn slot_for_item(&self, item: &str) -> Option<&str> {
        self.item_to_slot.get(item).map(String::as_str)
    }

    pub fn seq_for_item(&self, item: &str) -> Option<i64> {
        self.item_to_seq.get(item).copied()
    }

    pub fn coords(&self, slot_id: &str) -> Option<Point> {
        self.slot_to_coords.get(slot_id).copied()
    }

    /// Resolves an item to its slot, sequence and coordinates in one step.
    pub fn lookup(&self, item: &str) -> Option<SlotInfo<'_>> {
        let slot_id = self.slot_for_item(item)?;
        let pick_seq = self.seq_for_item(item)?;
        Some(SlotInfo {
            slot_id,
            pick_seq,
            coords: self.coords(slot_id),
        })
    }

    pub fn item_count(&self) -> usize {
        self.item_to_slot.len()
    }

    pub fn slot_count(&self) -> usize {
        self.slot_to_coords.len()
    }
}

/// Non-digit characters of a slot id, in order. Slots sharing a prefix share an aisle.
///
/// "Digit" here is any Unicode numeric character (`char::is_numeric`), so Roman
/// numerals such as `Ⅳ` and vulgar fractions such as `½` are stripped too.
pub fn aisle_prefix(slot_id: &str) -> String {
    slot_id.chars().filter(|c| !c.is_numeric()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(item: &str, slot: &str, seq: i64, x: f64, y: f64) -> LayoutRow {
        LayoutRow {
            item: item.to_string(),
            slot_id: slot.to_string(),
            pick_seq: seq,
            x,
            y,
        }
    }

    #[test]
    fn test_first_occurrence_wins() {
        let index = SlotIndex::build(&[
            row("100", "A1", 1, 0.0, 0.0),
            row("100", "B7", 9, 50.0, 50.0),
            row("200", "A2", 2, 12.0, 0.0),
        ]);

        assert_eq!(index.item_count(), 2);
        assert_eq!(index.slot_for_item("100"), Some("A1"));
        assert_eq!(index.seq_for_item("100"), Some(1));
        // the dropped row's slot never reaches the coordinate table
        assert_eq!(index.coords("B7"), None);
        assert_eq!(index.coords("A2"), Some(Point::new(12.0, 0.0)));
    }

    #[test]
    fn test_missing_item_is_none() {
        let index = SlotIndex::build(&[row("100", "A1", 1, 0.0, 0.0)]);
        assert!(index.lookup("999").is_none());
        assert_eq!(index.slot_for_item("999"), None);

        let info = index.lookup("100").unwrap();
        assert_eq!(info.slot_id, "A1");
        assert_eq!(info.pick_seq, 1);
        assert_eq!(info.coords, Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_aisle_prefix() {
        assert_eq!(aisle_prefix("A12"), "A");
        assert_eq!(aisle_prefix("AB-01-C3"), "AB--C");
        assert_eq!(aisle_prefix("1234"), "");
        assert_eq!(aisle_prefix(""), "");
    }

    #[test]
    fn test_aisle_prefix_strips_every_numeric_char() {
        assert_eq!(aisle_prefix("A٣2"), "A");
        assert_eq!(aisle_prefix("BⅣ7"), "B");
        assert_eq!(aisle_prefix("C½"), "C");
    }
}
