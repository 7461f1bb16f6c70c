use crate::domain::model::Product;
use crate::utils::error::Result;

/// Durable string key-value storage, the analogue of a browser's localStorage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Observer that renders basket state. Holds no basket state of its own.
pub trait BasketView {
    fn render_list(&mut self, items: &[&Product]);
    fn render_indicator(&mut self, count: usize);
    fn show_error(&mut self, message: &str);
    fn clear_error(&mut self);
}
