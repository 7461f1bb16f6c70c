pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "basket")]
#[command(about = "A persisted fruit basket with product compatibility rules")]
pub struct CliConfig {
    /// Path to a TOML shop configuration (built-in catalog when omitted)
    #[arg(long)]
    pub config: Option<String>,

    /// File holding the persisted key-value store
    #[arg(long, default_value = "./basket-store.json")]
    pub store: String,

    /// Report errors as alerts on stderr instead of an inline banner
    #[arg(long)]
    pub no_banner: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add a product to the basket
    Add { product: String },
    /// Remove every product from the basket
    Clear,
    /// Print the basket
    Show,
    /// List the product catalog
    Products,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("store", &self.store)?;
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }
        if let Command::Add { product } = &self.command {
            validate_non_empty_string("product", product)?;
        }
        Ok(())
    }
}
