// Source: https://developer.mozilla.org/en-US/docs/WebAssembly/Rust_to_Wasm
// Build: wasm-pack build --target web
use wasm_bindgen::prelude::*;
use lib_rsa::{form::AdForm, save_file::SaveFile};

/// Return the headline combinations for an urlencoded ad form, one per line.
#[wasm_bindgen]
pub fn preview(form_query: &str) -> Result<String, String> {
    let form = AdForm::from_urlencoded(form_query.as_bytes());
    lib_rsa::preview_lines(&form.headlines).map_err(|e| e.to_string())
}

/// Return the JSON to keep (ex: in localStorage) for an urlencoded ad form.
#[wasm_bindgen]
pub fn save_file_json(form_query: &str) -> Result<String, String> {
    let form = AdForm::from_urlencoded(form_query.as_bytes());
    SaveFile::capture(&form).to_json().map_err(|e| e.to_string())
}

/// Return the urlencoded form fields for saved JSON, or nothing if it can't be read.
#[wasm_bindgen]
pub fn load_form(save_json: &str) -> Option<String> {
    SaveFile::from_json(save_json).map(|save_file| save_file.restore().to_urlencoded())
}
