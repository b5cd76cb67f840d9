use tracing::debug;
use crate::{error::RsaError, item::{Item, SLOT_COUNT}, permute::permute, pins::PinTable};

/// Placed between headline texts when a combination is shown.
pub const SEPARATOR: &str = " | ";

/// Return every ordering of three headline indices which respects the headline pins.
///  Pinned headlines fill their slot (any one of them, if several share a slot) and appear nowhere else.
pub fn select_index_permutations(items: &[Item]) -> Result<Vec<Vec<usize>>, RsaError> {
    let pins = PinTable::new(items);
    let indices = (0..items.len()).collect::<Vec<usize>>();

    let mut combos = permute(&indices, SLOT_COUNT)?;
    let total = combos.len();

    // Keep only combinations with a pinned item in each slot which has pins
    for slot in 0..SLOT_COUNT {
        let must_contain = pins.must_contain(slot);
        if must_contain.is_empty() { continue; }

        combos.retain(|combo| must_contain.contains(&combo[slot]));
    }

    let with_pins = combos.len();

    // Remove combinations with a pinned item outside of its slot
    for slot in 0..SLOT_COUNT {
        let must_not_contain = pins.must_not_contain(slot);
        if must_not_contain.is_empty() { continue; }

        combos.retain(|combo| !must_not_contain.contains(&combo[slot]));
    }

    debug!(items = items.len(), total, with_pins, kept = combos.len(), "filtered headline permutations");
    Ok(combos)
}

/// Return each valid headline combination as display text ("First | Second | Third").
pub fn select_combinations(items: &[Item]) -> Result<Vec<String>, RsaError> {
    let combos = select_index_permutations(items)?;
    Ok(combos.iter().map(|combo| render(items, combo)).collect())
}

/// Join the text of the items at the given indices, in order.
pub fn render(items: &[Item], indices: &[usize]) -> String {
    indices.iter()
        .map(|index| items[*index].text.as_str())
        .collect::<Vec<&str>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{items, permute::permutation_count};

    #[test]
    fn no_pins_keeps_every_permutation() {
        let result = select_combinations(&items("A, B, C")).unwrap();
        assert_eq!(result, vec!["A | B | C", "A | C | B", "B | A | C", "B | C | A", "C | A | B", "C | B | A"]);

        for n in 3..=8 {
            let pool = (0..n).map(|i| Item::new(&format!("H{i}"))).collect::<Vec<Item>>();
            assert_eq!(select_combinations(&pool).unwrap().len(), permutation_count(n, 3));
        }
    }

    #[test]
    fn pin_to_first_slot() {
        let result = select_combinations(&items("A, B@1, C, D")).unwrap();
        assert_eq!(result, vec!["B | A | C", "B | A | D", "B | C | A", "B | C | D", "B | D | A", "B | D | C"]);
    }

    #[test]
    fn single_pin_only_in_its_slot() {
        for slot in 1..=3 {
            let pool = vec![Item::new("A"), Item::new("B"), Item::pinned("P", slot), Item::new("C"), Item::new("D")];
            let combos = select_index_permutations(&pool).unwrap();

            // P fills slot each time; the other four fill the two open slots (4 * 3)
            assert_eq!(combos.len(), 12);
            for combo in combos.iter() {
                assert_eq!(combo[slot as usize - 1], 2);
                assert_eq!(combo.iter().filter(|i| **i == 2).count(), 1);
            }
        }
    }

    #[test]
    fn two_pins_share_a_slot() {
        let pool = items("A, X@2, B, Y@2, C");
        let combos = select_index_permutations(&pool).unwrap();

        // X or Y in slot 2; the first and third slot from {A, B, C}
        assert_eq!(combos.len(), 2 * 3 * 2);

        let mut saw_x = false;
        let mut saw_y = false;
        for combo in combos.iter() {
            assert!(combo[1] == 1 || combo[1] == 3);
            assert!(combo[0] != 1 && combo[0] != 3);
            assert!(combo[2] != 1 && combo[2] != 3);

            saw_x |= combo[1] == 1;
            saw_y |= combo[1] == 3;
        }

        assert!(saw_x && saw_y);
    }

    #[test]
    fn every_slot_pinned() {
        let result = select_combinations(&items("C@3, extra, A@1, B@2")).unwrap();
        assert_eq!(result, vec!["A | B | C"]);
    }

    #[test]
    fn conflicting_pins_leave_nothing() {
        // Three items pinned to slot 1 leave nothing for slots 2 and 3
        let result = select_combinations(&items("A@1, B@1, C@1")).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn duplicate_text_is_distinct() {
        let result = select_combinations(&items("Same, Same@1, Other")).unwrap();
        assert_eq!(result, vec!["Same | Same | Other", "Same | Other | Same"]);
    }

    #[test]
    fn too_few_items() {
        assert_eq!(select_combinations(&items("A")), Err(RsaError::InvalidLength { length: 3, available: 1 }));
        assert!(select_combinations(&items("A, B@1")).is_err());
        assert!(select_combinations(&[]).is_err());
    }

    #[test]
    fn repeatable() {
        let pool = items("A, B@1, C, D@3, E, F");
        assert_eq!(select_combinations(&pool).unwrap(), select_combinations(&pool).unwrap());
    }
}
