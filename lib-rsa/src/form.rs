use std::collections::HashMap;
use crate::item::{Item, SLOT_COUNT};

pub const HEADLINE_PREFIX: &str = "headline";
pub const DESCRIPTION_PREFIX: &str = "description";

/// Number of headline and description inputs on the ad form.
pub const MAX_HEADLINES: usize = 15;
pub const MAX_DESCRIPTIONS: usize = 4;

/// Pin value written for an unpinned item.
pub const NO_PIN: &str = "-1";

/// Headlines and descriptions entered on the ad form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdForm {
    pub headlines: Vec<Item>,
    pub descriptions: Vec<Item>,
}

impl AdForm {
    pub fn new(headlines: Vec<Item>, descriptions: Vec<Item>) -> AdForm {
        AdForm { headlines, descriptions }
    }

    /// Read the form from field values ("headline_1" = "Free Shipping", "headline_1_pin" = "1", ...)
    pub fn from_fields(fields: &HashMap<String, String>) -> AdForm {
        AdForm {
            headlines: read_items(fields, HEADLINE_PREFIX, MAX_HEADLINES),
            descriptions: read_items(fields, DESCRIPTION_PREFIX, MAX_DESCRIPTIONS),
        }
    }

    /// Read the form from an 'application/x-www-form-urlencoded' query or body.
    pub fn from_urlencoded(input: &[u8]) -> AdForm {
        let fields = form_urlencoded::parse(input)
            .into_owned()
            .collect::<HashMap<String, String>>();

        Self::from_fields(&fields)
    }

    /// Return the field values which would show this form's items
    pub fn to_fields(&self) -> Vec<(String, String)> {
        let mut fields = to_form_fields(HEADLINE_PREFIX, &self.headlines, MAX_HEADLINES);
        fields.extend(to_form_fields(DESCRIPTION_PREFIX, &self.descriptions, MAX_DESCRIPTIONS));
        fields
    }

    pub fn to_urlencoded(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_fields())
            .finish()
    }
}

/// Read up to `total` items from "{prefix}_{n}" text and "{prefix}_{n}_pin" fields (n is 1-based).
///  Entries missing either field or with blank text are skipped; text is trimmed.
pub fn read_items(fields: &HashMap<String, String>, prefix: &str, total: usize) -> Vec<Item> {
    let mut items = Vec::new();

    for i in 1..=total {
        let text = fields.get(&format!("{prefix}_{i}"));
        let pin = fields.get(&format!("{prefix}_{i}_pin"));

        let (Some(text), Some(pin)) = (text, pin) else { continue; };

        let text = text.trim();
        if text.is_empty() { continue; }

        items.push(Item { text: text.to_string(), pin_to: parse_pin(pin) });
    }

    items
}

/// Write "{prefix}_{n}" and "{prefix}_{n}_pin" fields for up to `total` items.
///  Empty text is omitted; pins outside 1..=3 are written as -1.
pub fn to_form_fields(prefix: &str, items: &[Item], total: usize) -> Vec<(String, String)> {
    let mut fields = Vec::new();

    for (i, item) in items.iter().take(total).enumerate() {
        let n = i + 1;

        if !item.text.is_empty() {
            fields.push((format!("{prefix}_{n}"), item.text.clone()));
        }

        let pin = match item.slot() {
            Some(slot) => (slot + 1).to_string(),
            None => NO_PIN.to_string(),
        };
        fields.push((format!("{prefix}_{n}_pin"), pin));
    }

    fields
}

/// Read a pin selection the way a browser reads an integer: leading digits (with an optional sign) after whitespace.
///  Anything not a number from 1 to 3 means "not pinned".
pub fn parse_pin(text: &str) -> Option<i32> {
    let text = text.trim_start();

    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    let value = digits[..end].parse::<i64>().ok()?;
    let value = if negative { -value } else { value };

    if value >= 1 && value <= SLOT_COUNT as i64 {
        Some(value as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_parse_pin() {
        assert_eq!(parse_pin("1"), Some(1));
        assert_eq!(parse_pin(" 3"), Some(3));
        assert_eq!(parse_pin("2nd"), Some(2));
        assert_eq!(parse_pin("+2"), Some(2));

        assert_eq!(parse_pin("-1"), None);
        assert_eq!(parse_pin("0"), None);
        assert_eq!(parse_pin("4"), None);
        assert_eq!(parse_pin(""), None);
        assert_eq!(parse_pin("one"), None);
        assert_eq!(parse_pin("99999999999999999999999"), None);
    }

    #[test]
    fn test_read_items() {
        let form = fields(&[
            ("headline_1", "  Free Shipping "), ("headline_1_pin", "1"),
            ("headline_2", "   "), ("headline_2_pin", "2"),
            ("headline_3", "No pin field"),
            ("headline_4", "Same Day"), ("headline_4_pin", "-1"),
            ("headline_5", "Bad pin"), ("headline_5_pin", "7"),
            ("headline_16", "Past the end"), ("headline_16_pin", "1"),
        ]);

        let items = read_items(&form, HEADLINE_PREFIX, MAX_HEADLINES);
        assert_eq!(items, vec![
            Item::pinned("Free Shipping", 1),
            Item::new("Same Day"),
            Item::new("Bad pin"),
        ]);
    }

    #[test]
    fn ad_form_urlencoded() {
        let form = AdForm::from_urlencoded(b"headline_1=Free+Shipping&headline_1_pin=1&headline_2=Sale%21&headline_2_pin=-1&description_1=Order+today&description_1_pin=2");
        assert_eq!(form.headlines, vec![Item::pinned("Free Shipping", 1), Item::new("Sale!")]);
        assert_eq!(form.descriptions, vec![Item::pinned("Order today", 2)]);

        // Writing the fields back and reading them again keeps the same form
        let text = form.to_urlencoded();
        assert_eq!(AdForm::from_urlencoded(text.as_bytes()), form);
    }

    #[test]
    fn test_to_form_fields() {
        let items = vec![Item::pinned("A", 3), Item::new(""), Item::pinned("C", 8)];
        let fields = to_form_fields(DESCRIPTION_PREFIX, &items, 2);

        assert_eq!(fields, vec![
            ("description_1".to_string(), "A".to_string()),
            ("description_1_pin".to_string(), "3".to_string()),
            ("description_2_pin".to_string(), "-1".to_string()),
        ]);
    }
}
