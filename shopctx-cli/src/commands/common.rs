//! Shared helpers for CLI commands.

use std::path::Path;

use shopctx::app::{AppConfig, ShopCtxApp};
use shopctx::config::ConfigFile;
use tracing::debug;

use crate::error::CliError;

/// Loads the configuration file, honoring an explicit `--config` path.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path).map_err(|e| CliError::Config(e.to_string()))?,
        None => ConfigFile::load().map_err(|e| CliError::Config(e.to_string()))?,
    };
    debug!(site_id = %config.api.site_id, "Configuration loaded");
    Ok(config)
}

/// Starts the SDK from a loaded configuration file.
pub fn start_app(config: &ConfigFile) -> Result<ShopCtxApp, CliError> {
    ShopCtxApp::start(AppConfig::from_config_file(config))
        .map_err(|e| CliError::Startup(e.to_string()))
}
