/// Lookup and mutation operations on the inventory
///
/// Every name coming in is normalized before it touches the map, so the
/// store only ever sees NFKC keys.

use crate::core::normalizer::normalize;
use crate::error::{LedgerError, Result};
use crate::store::models::*;
use crate::store::InventoryStore;
use tracing::debug;

impl InventoryStore {
    /// Add `delta` to an item's count, creating the item if it's new
    ///
    /// Updates are additive: calling this twice with 2 and 3 leaves 5.
    ///
    /// Under `FlushPolicy::WriteThrough` the new state is written to disk
    /// first and only committed to memory once the write succeeded, so a
    /// failed save leaves both untouched.
    ///
    /// # Arguments
    /// * `raw_name` - Item name as typed (normalized here)
    /// * `delta` - Amount to add (may be negative)
    ///
    /// # Returns
    /// * `Ok(i64)` - The item's new count
    /// * `Err(LedgerError::Validation)` - Empty name or the count would overflow
    /// * `Err(LedgerError::Io)` - The backing file couldn't be written
    pub fn update_count(&mut self, raw_name: &str, delta: i64) -> Result<i64> {
        let name = normalize(raw_name);
        if name.trim().is_empty() {
            return Err(LedgerError::Validation(
                "Please enter a card name.".to_string(),
            ));
        }

        let position = self.index.get(&name).copied();
        let new_count = match position {
            Some(i) => self.entries[i].count.checked_add(delta).ok_or_else(|| {
                LedgerError::Validation(format!("The count for '{}' would overflow.", name))
            })?,
            None => delta,
        };

        match self.options().flush_policy {
            FlushPolicy::WriteThrough => {
                let mut candidate = self.entries.clone();
                place(&mut candidate, position, &name, new_count);
                self.write_records(&candidate)?;
                self.entries = candidate;
            }
            FlushPolicy::Deferred => {
                place(&mut self.entries, position, &name, new_count);
                self.dirty = true;
            }
        }

        if position.is_none() {
            self.index.insert(name.clone(), self.entries.len() - 1);
        }

        debug!(%name, delta, count = new_count, "updated card count");
        Ok(new_count)
    }

    /// All items, in load/insertion order
    pub fn list(&self) -> &[InventoryRecord] {
        &self.entries
    }

    /// Count for a single item, if we have it
    pub fn get(&self, raw_name: &str) -> Option<i64> {
        let name = normalize(raw_name);
        self.index.get(&name).map(|&i| self.entries[i].count)
    }

    /// Items whose name contains `raw_query`
    ///
    /// Plain substring containment after normalization, case-sensitive.
    /// An empty query matches everything. Results keep the store's order.
    pub fn search(&self, raw_query: &str) -> Vec<InventoryRecord> {
        let query = normalize(raw_query);

        self.entries
            .iter()
            .filter(|record| record.name.contains(query.as_str()))
            .cloned()
            .collect()
    }
}

fn place(entries: &mut Vec<InventoryRecord>, position: Option<usize>, name: &str, count: i64) {
    match position {
        Some(i) => entries[i].count = count,
        None => entries.push(InventoryRecord::new(name, count)),
    }
}
