/// Inventory store for card-ledger
///
/// Keeps the normalized name -> count map and the CSV file it lives in.

pub mod file;
pub mod models;
pub mod port;
pub mod queries;

pub use file::InventoryStore;
pub use models::*;
pub use port::Inventory;
