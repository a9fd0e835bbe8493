/// Text and JSON renditions of inventory data
///
/// Pure formatting: nothing in here touches the store.

use crate::error::Result;
use crate::store::{InventoryRecord, SearchResult, StoreStats};

pub const EMPTY_INVENTORY: &str = "No cards yet.";

/// One `name: count` line per record
pub fn format_records(records: &[InventoryRecord]) -> String {
    records
        .iter()
        .map(|r| format!("{}: {}", r.name, r.count))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The full list, or a notice when there's nothing to show
pub fn format_inventory(records: &[InventoryRecord]) -> String {
    if records.is_empty() {
        EMPTY_INVENTORY.to_string()
    } else {
        format_records(records)
    }
}

pub fn format_no_matches(query: &str) -> String {
    format!("No cards containing '{}' were found.", query)
}

/// "Did you mean" line, `None` when there's nothing to suggest
pub fn format_suggestions(suggestions: &[SearchResult]) -> Option<String> {
    if suggestions.is_empty() {
        return None;
    }

    let names: Vec<&str> = suggestions
        .iter()
        .map(|s| s.record.name.as_str())
        .collect();
    Some(format!("Did you mean: {}?", names.join(", ")))
}

pub fn format_stats(stats: &StoreStats) -> String {
    let last_saved = stats
        .last_modified
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    format!(
        "File:        {}\nCards:       {}\nTotal count: {}\nLast saved:  {}\nUnsaved:     {}",
        stats.path.display(),
        stats.total_items,
        stats.total_count,
        last_saved,
        if stats.unsaved_changes { "yes" } else { "no" }
    )
}

/// Records as a pretty-printed JSON array
pub fn to_json(records: &[InventoryRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn stats_to_json(stats: &StoreStats) -> Result<String> {
    Ok(serde_json::to_string_pretty(stats)?)
}
