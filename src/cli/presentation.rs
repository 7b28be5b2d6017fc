//! CLI presentation: text and json formatters for operation results.

use crate::error::ApiError;
use crate::store::EntryView;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde::Serialize;

const PREVIEW_CHARS: usize = 60;

pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Table of watched keys. Long values are cut to a preview.
pub fn format_entries_text(entries: &[EntryView]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Key", "Exists", "Value"]);
    for entry in entries {
        let exists = if entry.exists { "yes" } else { "no" };
        let value = if entry.exists {
            preview(&entry.value)
        } else {
            "-".to_string()
        };
        table.add_row(vec![entry.key.as_str(), exists, value.as_str()]);
    }
    table.to_string()
}

/// A single entry: the full value, or a note that the key is absent.
pub fn format_entry_text(entry: &EntryView) -> String {
    if entry.exists {
        entry.value.clone()
    } else {
        format!("(no value stored for '{}')", entry.key)
    }
}

fn preview(value: &str) -> String {
    let flat = value.replace('\n', " ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
    format!("{}…", cut)
}
