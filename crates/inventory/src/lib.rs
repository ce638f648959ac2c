//! Inventory store: item-to-quantity counts with JSON persistence.
//!
//! The store itself ([`Inventory`]) is plain in-memory state with no IO.
//! Reading and writing the JSON file lives in [`storage`], and environment
//! driven settings in [`config`].

pub mod config;
pub mod log;
pub mod storage;
pub mod store;

pub use config::{ConfigError, InventoryConfig};
pub use log::{ActivityLog, LogEntry};
pub use storage::{InventorySnapshot, StorageError, DEFAULT_INVENTORY_PATH};
pub use store::{AddItem, Inventory, Removal, DEFAULT_LOW_STOCK_THRESHOLD};
