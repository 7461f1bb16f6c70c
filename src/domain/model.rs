use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_SLOT: &str = "basket";
pub const DEFAULT_INCOMPATIBLE_MESSAGE: &str = "Strawberries and bananas cannot be combined.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    pub icon: String,
}

impl Product {
    pub fn new(id: &str, display_name: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Read-only product lookup keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: BTreeMap<String, Product>,
}

impl Catalog {
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    /// 內建的四種水果
    pub fn builtin() -> Self {
        Self::new([
            Product::new("apple", "Apple", "🍏"),
            Product::new("banana", "Banana", "🍌"),
            Product::new("lemon", "Lemon", "🍋"),
            Product::new("strawberry", "Strawberry", "🍓"),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.products.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Conflict sets per product id. Each direction is declared on its own;
/// `a -> b` says nothing about `b -> a`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictTable {
    conflicts: BTreeMap<String, BTreeSet<String>>,
}

impl ConflictTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.insert("banana", "strawberry");
        table.insert("strawberry", "banana");
        table
    }

    pub fn insert(&mut self, product: &str, conflicts_with: &str) {
        self.conflicts
            .entry(product.to_string())
            .or_default()
            .insert(conflicts_with.to_string());
    }

    /// Absent entry means the product conflicts with nothing.
    pub fn conflicts_of(&self, product: &str) -> Option<&BTreeSet<String>> {
        self.conflicts.get(product)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.conflicts.iter()
    }
}

impl FromIterator<(String, Vec<String>)> for ConflictTable {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (product, others) in iter {
            for other in others {
                table.insert(&product, &other);
            }
        }
        table
    }
}

/// Everything a `BasketStore` needs besides its storage handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopSettings {
    pub catalog: Catalog,
    pub conflicts: ConflictTable,
    pub slot: String,
    pub incompatible_message: String,
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            catalog: Catalog::builtin(),
            conflicts: ConflictTable::builtin(),
            slot: DEFAULT_SLOT.to_string(),
            incompatible_message: DEFAULT_INCOMPATIBLE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Accepted,
    Rejected { conflicting: String },
}

impl AddOutcome {
    pub fn accepted(&self) -> bool {
        matches!(self, AddOutcome::Accepted)
    }
}
