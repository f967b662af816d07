//! Subcommands of the `facturas` binary.

pub mod batch;
pub mod config;
pub mod process;
pub mod report;
pub mod watch;

use std::path::{Path, PathBuf};

use facturas_core::FacturasConfig;
use tracing::debug;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("facturas")
        .join("config.json")
}

/// Load the configuration for a run.
///
/// An explicit `--config` path must exist. Without one, the default file is
/// used when present, otherwise built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FacturasConfig> {
    let config = match config_path {
        Some(path) => FacturasConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Cannot load config {}: {}", path, e))?,
        None => {
            let default_path = default_config_path();
            if default_path.exists() {
                debug!("Using config at {}", default_path.display());
                FacturasConfig::from_file(&default_path)?
            } else {
                FacturasConfig::default()
            }
        }
    };

    config.validate()?;
    Ok(config)
}
