/// The narrow interface the front end talks to
///
/// The shell never reaches into the store directly; it only lists, updates
/// and finds through this trait.

use crate::error::Result;
use crate::store::{InventoryRecord, InventoryStore};

/// Inventory operations exposed to the presentation shell
pub trait Inventory {
    /// Every item, in display order
    fn list_all(&self) -> Vec<InventoryRecord>;

    /// Add `amount` to the named item and return its new count
    fn update(&mut self, name: &str, amount: i64) -> Result<i64>;

    /// Items whose normalized name contains `substring`
    fn find(&self, substring: &str) -> Vec<InventoryRecord>;

    /// Push anything still held in memory to durable storage
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl Inventory for InventoryStore {
    fn list_all(&self) -> Vec<InventoryRecord> {
        self.list().to_vec()
    }

    fn update(&mut self, name: &str, amount: i64) -> Result<i64> {
        self.update_count(name, amount)
    }

    fn find(&self, substring: &str) -> Vec<InventoryRecord> {
        self.search(substring)
    }

    fn flush(&mut self) -> Result<()> {
        InventoryStore::flush(self)
    }
}
