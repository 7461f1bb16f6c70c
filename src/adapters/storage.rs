use crate::core::KeyValueStore;
use crate::utils::error::Result;
use std::collections::HashMap;

/// Volatile store for tests and embedding; nothing outlives the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.writes += 1;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert!(storage.get("basket").unwrap().is_none());

        storage.set("basket", "[]").unwrap();
        assert_eq!(storage.get("basket").unwrap().as_deref(), Some("[]"));

        storage.remove("basket").unwrap();
        storage.remove("basket").unwrap();
        assert!(storage.get("basket").unwrap().is_none());
        assert_eq!(storage.writes(), 1);
    }
}
