use crate::item::{Item, SLOT_COUNT};

/// Item indices which must (or must not) appear in each slot, derived from item pins.
///  An item pinned to one slot is required there and banned from every other slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinTable {
    must_contain: [Vec<usize>; SLOT_COUNT],
    must_not_contain: [Vec<usize>; SLOT_COUNT],
}

impl PinTable {
    pub fn new(items: &[Item]) -> PinTable {
        let mut table = PinTable::default();

        for (index, item) in items.iter().enumerate() {
            if let Some(pinned_slot) = item.slot() {
                table.must_contain[pinned_slot].push(index);

                for slot in 0..SLOT_COUNT {
                    if slot != pinned_slot {
                        table.must_not_contain[slot].push(index);
                    }
                }
            }
        }

        table
    }

    /// Items pinned to this (0-based) slot. When non-empty, one of them must fill it.
    pub fn must_contain(&self, slot: usize) -> &[usize] {
        &self.must_contain[slot]
    }

    /// Items pinned to some other slot, which may not fill this one.
    pub fn must_not_contain(&self, slot: usize) -> &[usize] {
        &self.must_not_contain[slot]
    }

    pub fn is_empty(&self) -> bool {
        self.must_contain.iter().all(|indices| indices.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_table_basics() {
        let items = vec![
            Item::new("A"),
            Item::pinned("B", 1),
            Item::pinned("C", 3),
            Item::pinned("D", 1),
            Item::pinned("E", 5),
        ];

        let table = PinTable::new(&items);
        assert!(!table.is_empty());

        assert_eq!(table.must_contain(0), &[1, 3]);
        assert_eq!(table.must_contain(1), &[] as &[usize]);
        assert_eq!(table.must_contain(2), &[2]);

        assert_eq!(table.must_not_contain(0), &[2]);
        assert_eq!(table.must_not_contain(1), &[1, 2, 3]);
        assert_eq!(table.must_not_contain(2), &[1, 3]);

        // No index is both required and banned for one slot
        for slot in 0..SLOT_COUNT {
            for index in table.must_contain(slot) {
                assert!(!table.must_not_contain(slot).contains(index));
            }
        }
    }

    #[test]
    fn pin_table_unpinned() {
        let table = PinTable::new(&[Item::new("A"), Item::pinned("B", 0)]);
        assert!(table.is_empty());
        assert_eq!(table, PinTable::default());
    }
}
