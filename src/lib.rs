pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::storage::MemoryStorage;
pub use adapters::view::{RecordingView, TerminalView};
pub use config::{cli::LocalStorage, toml_config::ShopConfig};
pub use crate::core::basket::BasketStore;
pub use crate::core::{AddOutcome, BasketView, Catalog, ConflictTable, KeyValueStore, Product, ShopSettings};
pub use utils::error::{BasketError, Result};
