//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod extract;

use std::path::Path;

use tracing::debug;

use poex_core::PoexConfig;

/// Load configuration from `path`, the default location, or built-in defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<PoexConfig> {
    if let Some(path) = path {
        debug!("Loading config from {}", path);
        return Ok(PoexConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(PoexConfig::from_file(&default_path)?)
    } else {
        Ok(PoexConfig::default())
    }
}
