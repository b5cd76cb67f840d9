use item::Item;

pub mod error;
pub mod form;
pub mod item;
pub mod permute;
pub mod pins;
pub mod save_file;
pub mod select;

pub use error::{RsaError, StoreError};

/// Parse comma separated items ("Free Shipping@1, Sale, Same Day"), skipping blanks.
pub fn items(text: &str) -> Vec<Item> {
    text.split(',').filter_map(Item::parse).collect()
}

/// Return the headline combinations, one per line.
pub fn preview_lines(headlines: &[Item]) -> Result<String, RsaError> {
    Ok(select::select_combinations(headlines)?.join("\n"))
}
