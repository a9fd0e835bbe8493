/// card-ledger library
///
/// Inventory store for counted items (trading cards, mostly) kept in a CSV
/// file, plus the terminal front end that drives it.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod shell;
pub mod store;

// Re-exports for convenience
pub use config::Config;
pub use error::{LedgerError, Result};
pub use store::{Inventory, InventoryRecord, InventoryStore};
