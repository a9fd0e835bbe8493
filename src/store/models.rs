/// Data models for the inventory store
///
/// `InventoryRecord` maps 1:1 to a row of the backing CSV file.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Header of the backing file, in column order
pub const NAME_COLUMN: &str = "CardName";
pub const COUNT_COLUMN: &str = "Count";

/// One item and how many of it we own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub name: String, // always NFKC-normalized
    pub count: i64,
}

impl InventoryRecord {
    pub fn new(name: impl Into<String>, count: i64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// What to do with a row of the backing file that won't parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Skip the row and log a warning
    #[default]
    SkipInvalid,
    /// Refuse to load the file at all
    Strict,
}

/// When mutations reach the disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushPolicy {
    /// Every update rewrites the backing file before returning
    #[default]
    WriteThrough,
    /// Updates stay in memory until `flush()` is called
    Deferred,
}

impl std::fmt::Display for FlushPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FlushPolicy::WriteThrough => "write-through",
            FlushPolicy::Deferred => "deferred",
        };
        write!(f, "{}", s)
    }
}

/// Options fixed when a store is opened
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreOptions {
    pub load_policy: LoadPolicy,
    pub flush_policy: FlushPolicy,
}

/// Fuzzy search hit with its score
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub record: InventoryRecord,
    pub score: i64, // Fuzzy match score
}

/// Store statistics
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub total_items: usize,
    pub total_count: i128, // sum of i64 counts can exceed i64
    pub path: PathBuf,
    pub last_modified: Option<DateTime<Local>>,
    pub unsaved_changes: bool,
}
