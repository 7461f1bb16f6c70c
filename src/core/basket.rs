use crate::core::{AddOutcome, BasketView, KeyValueStore, Product, ShopSettings};
use crate::utils::error::{BasketError, Result};
use serde_json::Value;

/// Sole authority over reading, validating and writing the persisted basket.
///
/// The basket is re-read from storage on every call; nothing is cached
/// between operations.
pub struct BasketStore<S: KeyValueStore> {
    storage: S,
    settings: ShopSettings,
    views: Vec<Box<dyn BasketView>>,
}

impl<S: KeyValueStore> BasketStore<S> {
    pub fn new(storage: S, settings: ShopSettings) -> Self {
        Self {
            storage,
            settings,
            views: Vec::new(),
        }
    }

    /// Registers a view that is refreshed after every successful mutation.
    pub fn subscribe(&mut self, view: Box<dyn BasketView>) {
        self.views.push(view);
    }

    pub fn settings(&self) -> &ShopSettings {
        &self.settings
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current basket. Missing, empty or unparsable slots read as empty.
    pub fn read(&self) -> Vec<String> {
        let raw = match self.storage.get(&self.settings.slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Could not read basket slot '{}': {}", self.settings.slot, e);
                return Vec::new();
            }
        };

        if raw.is_empty() {
            return Vec::new();
        }

        match parse_basket(&raw) {
            Ok(ids) => {
                tracing::debug!("Read {} item(s) from slot '{}'", ids.len(), self.settings.slot);
                ids
            }
            Err(e) => {
                tracing::warn!("Error parsing basket from storage: {}", e);
                Vec::new()
            }
        }
    }

    pub fn is_compatible(&self, candidate: &str, basket: &[String]) -> bool {
        self.find_conflict(candidate, basket).is_none()
    }

    /// Like `is_compatible`, but names the product that blocks `candidate`.
    pub fn check_compatible(&self, candidate: &str, basket: &[String]) -> Result<()> {
        match self.find_conflict(candidate, basket) {
            Some(conflicting) => Err(BasketError::IncompatibleProduct {
                candidate: candidate.to_string(),
                conflicting: conflicting.to_string(),
                message: self.settings.incompatible_message.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn add(&mut self, candidate: &str) -> Result<AddOutcome> {
        let mut basket = self.read();

        if let Some(conflicting) = self.find_conflict(candidate, &basket).map(str::to_string) {
            tracing::warn!("Rejected '{}': conflicts with '{}'", candidate, conflicting);
            for view in self.views.iter_mut() {
                view.show_error(&self.settings.incompatible_message);
            }
            return Ok(AddOutcome::Rejected { conflicting });
        }

        basket.push(candidate.to_string());
        let serialized = serde_json::to_string(&basket)?;
        self.storage.set(&self.settings.slot, &serialized)?;
        tracing::info!("Added '{}' to basket ({} items)", candidate, basket.len());

        for view in self.views.iter_mut() {
            view.clear_error();
        }
        self.notify(&basket);

        Ok(AddOutcome::Accepted)
    }

    /// Drops the slot itself, not just its contents.
    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove(&self.settings.slot)?;
        tracing::info!("Cleared basket");

        for view in self.views.iter_mut() {
            view.clear_error();
        }
        self.notify(&[]);

        Ok(())
    }

    pub fn count(&self) -> usize {
        self.read().len()
    }

    /// Basket resolved through the catalog; unknown ids are skipped.
    pub fn items(&self) -> Vec<&Product> {
        resolve(&self.settings, &self.read())
    }

    /// Pushes the persisted basket to every view without touching storage.
    pub fn refresh(&mut self) {
        let basket = self.read();
        self.notify(&basket);
    }

    fn find_conflict<'a>(&self, candidate: &str, basket: &'a [String]) -> Option<&'a str> {
        let conflicts = self.settings.conflicts.conflicts_of(candidate)?;
        basket
            .iter()
            .find(|id| conflicts.contains(id.as_str()))
            .map(String::as_str)
    }

    fn notify(&mut self, basket: &[String]) {
        let items = resolve(&self.settings, basket);
        for view in self.views.iter_mut() {
            view.render_list(&items);
            view.render_indicator(basket.len());
        }
    }
}

fn resolve<'a>(settings: &'a ShopSettings, basket: &[String]) -> Vec<&'a Product> {
    basket
        .iter()
        .filter_map(|id| settings.catalog.get(id))
        .collect()
}

/// Non-array values read as an empty basket; non-string elements are dropped.
fn parse_basket(raw: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Array(items) = value else {
        tracing::warn!("Stored basket is not an array, treating as empty");
        return Ok(Vec::new());
    };

    let ids = items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(id) => Some(id),
            other => {
                tracing::warn!("Skipping non-string basket entry: {}", other);
                None
            }
        })
        .collect();
    Ok(ids)
}
