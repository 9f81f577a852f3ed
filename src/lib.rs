pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CartCommand, CliConfig};

pub use adapters::{FileStore, MemoryStore};
pub use config::StoreConfig;
pub use crate::core::{demo::run_demo, Cart, CartStore, CartSummary, ItemId, KeyValueStore};
pub use utils::error::{CartError, Result};
