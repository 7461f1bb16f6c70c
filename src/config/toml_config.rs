use crate::core::{Catalog, ConflictTable, Product, ShopSettings};
use crate::domain::model::{DEFAULT_INCOMPATIBLE_MESSAGE, DEFAULT_SLOT};
use crate::utils::error::{BasketError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_unique_ids, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopConfig {
    pub storage: Option<StorageConfig>,
    pub products: Option<Vec<Product>>,
    pub conflicts: Option<BTreeMap<String, Vec<String>>>,
    pub messages: Option<MessagesConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub slot: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesConfig {
    pub incompatible: Option<String>,
}

impl ShopConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BasketError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SHOP_SLOT})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn slot(&self) -> &str {
        self.storage
            .as_ref()
            .and_then(|s| s.slot.as_deref())
            .unwrap_or(DEFAULT_SLOT)
    }

    pub fn incompatible_message(&self) -> &str {
        self.messages
            .as_ref()
            .and_then(|m| m.incompatible.as_deref())
            .unwrap_or(DEFAULT_INCOMPATIBLE_MESSAGE)
    }

    pub fn catalog(&self) -> Catalog {
        match &self.products {
            Some(products) => Catalog::new(products.iter().cloned()),
            None => Catalog::builtin(),
        }
    }

    pub fn conflict_table(&self) -> ConflictTable {
        match &self.conflicts {
            Some(conflicts) => conflicts
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            None => ConflictTable::builtin(),
        }
    }

    pub fn to_settings(&self) -> ShopSettings {
        ShopSettings {
            catalog: self.catalog(),
            conflicts: self.conflict_table(),
            slot: self.slot().to_string(),
            incompatible_message: self.incompatible_message().to_string(),
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("storage.slot", self.slot())?;
        validate_non_empty_string("messages.incompatible", self.incompatible_message())?;

        if let Some(products) = &self.products {
            for product in products {
                validate_non_empty_string("products.id", &product.id)?;
                validate_non_empty_string("products.name", &product.display_name)?;
            }
            validate_unique_ids("products.id", products.iter().map(|p| p.id.as_str()))?;
        }

        let catalog = self.catalog();
        for (product, others) in self.conflict_table().iter() {
            validate_non_empty_string("conflicts", product)?;
            for other in others {
                validate_non_empty_string(&format!("conflicts.{}", product), other)?;
            }
            // 衝突表可以引用目錄外的商品，只記錄警告
            for id in std::iter::once(product).chain(others.iter()) {
                if !catalog.contains(id) {
                    tracing::warn!("Conflict table references unknown product '{}'", id);
                }
            }
        }

        Ok(())
    }
}

impl Validate for ShopConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[storage]
slot = "cart"

[[products]]
id = "kiwi"
name = "Kiwi"
icon = "🥝"

[[products]]
id = "lemon"
name = "Lemon"
icon = "🍋"

[conflicts]
kiwi = ["lemon"]

[messages]
incompatible = "Kiwis and lemons do not mix."
"#;

        let config = ShopConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        let settings = config.to_settings();
        assert_eq!(settings.slot, "cart");
        assert_eq!(settings.catalog.len(), 2);
        assert_eq!(settings.catalog.get("kiwi").unwrap().display_name, "Kiwi");
        assert!(settings.conflicts.conflicts_of("kiwi").unwrap().contains("lemon"));
        assert!(settings.conflicts.conflicts_of("lemon").is_none());
        assert_eq!(settings.incompatible_message, "Kiwis and lemons do not mix.");
    }

    #[test]
    fn test_empty_config_uses_builtin_shop() {
        let config = ShopConfig::from_toml_str("").unwrap();
        assert_eq!(config.to_settings(), ShopSettings::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FRUIT_BASKET_TEST_SLOT", "env-basket");

        let config = ShopConfig::from_toml_str(
            r#"
[storage]
slot = "${FRUIT_BASKET_TEST_SLOT}"

[messages]
incompatible = "${FRUIT_BASKET_UNSET_VAR}"
"#,
        )
        .unwrap();

        assert_eq!(config.slot(), "env-basket");
        assert_eq!(config.incompatible_message(), "${FRUIT_BASKET_UNSET_VAR}");
    }

    #[test]
    fn test_config_validation() {
        let empty_slot = ShopConfig::from_toml_str("[storage]\nslot = \"  \"\n").unwrap();
        assert!(empty_slot.validate().is_err());

        let duplicate = ShopConfig::from_toml_str(
            r#"
[[products]]
id = "apple"
name = "Apple"
icon = "🍏"

[[products]]
id = "apple"
name = "Green apple"
icon = "🍏"
"#,
        )
        .unwrap();
        assert!(duplicate.validate().is_err());

        let unknown_conflict =
            ShopConfig::from_toml_str("[conflicts]\ndurian = [\"apple\"]\n").unwrap();
        assert!(unknown_conflict.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = ShopConfig::from_toml_str("[storage\nslot =").unwrap_err();
        assert!(matches!(err, BasketError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[messages]\nincompatible = \"No.\"").unwrap();

        let config = ShopConfig::from_file(file.path()).unwrap();
        assert_eq!(config.incompatible_message(), "No.");
        assert_eq!(config.slot(), "basket");
    }
}
