pub mod basket;

pub use crate::domain::model::{AddOutcome, Catalog, ConflictTable, Product, ShopSettings};
pub use crate::domain::ports::{BasketView, KeyValueStore};
pub use crate::utils::error::Result;
