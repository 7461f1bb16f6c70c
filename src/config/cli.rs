use crate::core::KeyValueStore;
use crate::utils::error::{BasketError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed key-value store. The whole store is one JSON object of
/// string values, rewritten on every mutation.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| BasketError::StorageFormatError {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Like `load`, but a malformed file is discarded so the next write
    /// replaces it. The flag reports whether that happened.
    fn load_for_write(&self) -> Result<(BTreeMap<String, String>, bool)> {
        match self.load() {
            Ok(entries) => Ok((entries, false)),
            Err(BasketError::StorageFormatError { path, message }) => {
                tracing::warn!("Discarding malformed store {}: {}", path, message);
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, data)?;
        tracing::debug!("Wrote {} key(s) to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.load()?;
        Ok(entries.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let (mut entries, _) = self.load_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let (mut entries, discarded) = self.load_for_write()?;
        if entries.remove(key).is_none() && !discarded {
            return Ok(());
        }
        self.save(&entries)
    }
}
