//! Configuration CLI commands.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use shopctx::config::{format_size, ConfigFile};

use crate::error::CliError;

use super::common::load_config;

/// Config action subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand.
pub fn run(action: ConfigAction, config_path: Option<&Path>) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            println!("[api]");
            println!("  base_url     = {}", config.api.base_url);
            println!("  organization = {}", config.api.organization);
            println!("  site_id      = {}", config.api.site_id);
            println!("  client_id    = {}", config.api.client_id);
            println!(
                "  access_token = {}",
                if config.api.access_token.is_some() {
                    "(set)"
                } else {
                    "(unset)"
                }
            );
            println!("  timeout      = {}s", config.api.timeout_secs);
            println!("[cache]");
            println!(
                "  memory_size  = {}",
                format_size(config.cache.memory_size)
            );
            println!("  ttl          = {}s", config.cache.ttl_secs);
            Ok(())
        }
        ConfigAction::Init { force } => {
            let path = resolve_init_path(config_path)?;
            if path.exists() && !force {
                return Err(CliError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            ConfigFile::default()
                .save_to(&path)
                .map_err(|e| CliError::Config(e.to_string()))?;
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}

fn resolve_init_path(config_path: Option<&Path>) -> Result<PathBuf, CliError> {
    match config_path {
        Some(path) => Ok(path.to_path_buf()),
        None => ConfigFile::default_path()
            .ok_or_else(|| CliError::Config("no config directory available".to_string())),
    }
}
