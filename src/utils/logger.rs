use std::io::Stderr;
use tracing_subscriber::fmt::format::{DefaultFields, Format, Full};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATE_TARGET: &str = "fruit_basket";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    /// 給嵌入其他程序時收集日誌用
    Json,
}

/// `RUST_LOG` wins over the built-in directives.
pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Compact => registry.with(stderr_layer().compact()).init(),
        LogFormat::Json => registry.with(stderr_layer().json()).init(),
    }
}

fn default_directives(verbose: bool) -> String {
    if verbose {
        format!("{}=debug,info", CRATE_TARGET)
    } else {
        format!("{}=info", CRATE_TARGET)
    }
}

// Logs share stderr so stdout only carries the rendered basket.
fn stderr_layer<S>() -> fmt::Layer<S, DefaultFields, Format<Full>, fn() -> Stderr> {
    fmt::layer()
        .with_writer(std::io::stderr as fn() -> Stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}
