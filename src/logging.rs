use std::path::{Path, PathBuf};

use color_eyre::eyre::Result;
use tracing::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE: &str = "cell-inspect.log";

/// Log to [`LOG_FILE`] under `data_dir`, creating the directory. Returns the log path.
///
/// `RUST_LOG` adds to the default `debug` level for the crate and the binary.
pub fn init(data_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(data_dir)?;
    let log_path = data_dir.join(LOG_FILE);
    let log_file = std::fs::File::create(&log_path)?;

    let filter = EnvFilter::from_default_env()
        .add_directive("ckb_cell_model=debug".parse()?)
        .add_directive("cell_inspect=debug".parse()?);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    info!("cell-inspect {} logging to {}", env!("CARGO_PKG_VERSION"), log_path.display());
    Ok(log_path)
}

/// Record a panic in the log before the color-eyre report is printed.
pub fn log_panic(panic: &std::panic::PanicHookInfo) {
    let payload = panic.payload();
    let msg = payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");

    match panic.location() {
        Some(loc) => error!("cell-inspect panicked at {}:{}: {}", loc.file(), loc.line(), msg),
        None => error!("cell-inspect panicked: {}", msg),
    }
}
