use anyhow::Context;
use clap::Parser;
use fruit_basket::utils::error::ErrorSeverity;
use fruit_basket::utils::logger::{self, LogFormat};
use fruit_basket::utils::validation::Validate;
use fruit_basket::{
    AddOutcome, BasketError, BasketStore, CliConfig, Command, LocalStorage, ShopConfig,
    TerminalView,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CliConfig::parse();

    // 初始化日誌
    let format = if config.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(format, config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    match run(&config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("❌ {:#}", e);
            match e.downcast_ref::<BasketError>() {
                Some(basket_error) => match basket_error.severity() {
                    // 錯誤訊息已由 view 顯示過
                    ErrorSeverity::Low => {
                        eprintln!("💡 Suggestion: {}", basket_error.recovery_suggestion());
                        ExitCode::from(2)
                    }
                    ErrorSeverity::Medium | ErrorSeverity::High => {
                        eprintln!("❌ {}", basket_error.user_friendly_message());
                        eprintln!("💡 Suggestion: {}", basket_error.recovery_suggestion());
                        ExitCode::FAILURE
                    }
                },
                None => {
                    eprintln!("❌ {:#}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn run(config: &CliConfig) -> anyhow::Result<ExitCode> {
    config.validate()?;

    let shop = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading shop configuration from: {}", path);
            let shop = ShopConfig::from_file(path)
                .with_context(|| format!("failed to load shop config '{}'", path))?;
            shop.validate()?;
            shop
        }
        None => ShopConfig::default(),
    };

    let storage = LocalStorage::new(&config.store);
    let mut store = BasketStore::new(storage, shop.to_settings());

    let view = if config.no_banner {
        TerminalView::without_banner(std::io::stdout())
    } else {
        TerminalView::new(std::io::stdout())
    };
    store.subscribe(Box::new(view));

    match &config.command {
        Command::Add { product } => match store.add(product)? {
            AddOutcome::Accepted => Ok(ExitCode::SUCCESS),
            AddOutcome::Rejected { conflicting } => Err(BasketError::IncompatibleProduct {
                candidate: product.clone(),
                conflicting,
                message: store.settings().incompatible_message.clone(),
            }
            .into()),
        },
        Command::Clear => {
            store.clear()?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Show => {
            store.refresh();
            Ok(ExitCode::SUCCESS)
        }
        Command::Products => {
            let settings = store.settings();
            for product in settings.catalog.iter() {
                let blocked: Vec<&str> = settings
                    .conflicts
                    .conflicts_of(&product.id)
                    .map(|set| set.iter().map(String::as_str).collect())
                    .unwrap_or_default();
                if blocked.is_empty() {
                    println!("{} {} ({})", product.icon, product.display_name, product.id);
                } else {
                    println!(
                        "{} {} ({}) - not with: {}",
                        product.icon,
                        product.display_name,
                        product.id,
                        blocked.join(", ")
                    );
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
