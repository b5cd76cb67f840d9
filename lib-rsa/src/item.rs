use serde::{Deserialize, Serialize};

/// Number of headline slots shown in one ad.
pub const SLOT_COUNT: usize = 3;

/// One candidate headline (or description) and the 1-based slot it is pinned to, if any.
///  Items are identified by their position in a pool, so two items may share the same text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub text: String,

    #[serde(default)]
    pub pin_to: Option<i32>,
}

impl Item {
    pub fn new(text: &str) -> Item {
        Item { text: text.to_string(), pin_to: None }
    }

    pub fn pinned(text: &str, pin_to: i32) -> Item {
        Item { text: text.to_string(), pin_to: Some(pin_to) }
    }

    /// Return the 0-based slot this item must occupy.
    ///  Pins outside 1..=3 are treated as no pin at all.
    pub fn slot(&self) -> Option<usize> {
        match self.pin_to {
            Some(pin) if pin >= 1 && pin <= SLOT_COUNT as i32 => Some(pin as usize - 1),
            _ => None,
        }
    }

    /// Parse "text" or "text@pin" (ex: "Free Shipping@1").
    ///  Returns None for blank text. A suffix which isn't a number is kept as part of the text.
    pub fn parse(text: &str) -> Option<Item> {
        let (text, pin_to) = match text.rsplit_once('@') {
            Some((before, pin)) if pin.trim().parse::<i32>().is_ok() => {
                (before, crate::form::parse_pin(pin))
            }
            _ => (text, None),
        };

        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        Some(Item { text: text.to_string(), pin_to })
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.slot() {
            Some(slot) => write!(f, "{}@{}", self.text, slot + 1),
            None => f.write_str(&self.text),
        }
    }
}
