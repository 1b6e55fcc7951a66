//! Cache inspection CLI commands.
//!
//! The response cache is in-memory and process-local, so these commands
//! report the configured limits and the counters of the current invocation.

use std::path::Path;

use clap::Subcommand;
use shopctx::config::format_size;

use crate::error::CliError;

use super::common::{load_config, start_app};

/// Cache action subcommands.
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Show configured cache limits and live counters
    Stats,
    /// Clear the response cache of this invocation
    Clear,
}

/// Run a cache subcommand.
pub async fn run(action: CacheAction, config_path: Option<&Path>) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let app = start_app(&config)?;

    match action {
        CacheAction::Stats => {
            let cache = app.cache();
            println!("Memory cache");
            println!("  Max size: {}", format_size(cache.max_size_bytes() as usize));
            println!(
                "  TTL:      {}",
                match config.cache.ttl_secs {
                    0 => "disabled".to_string(),
                    secs => format!("{}s", secs),
                }
            );
            println!("  Entries:  {}", cache.entry_count());
            println!("  Size:     {}", format_size(cache.size_bytes() as usize));

            let metrics = app.metrics_snapshot();
            println!("Counters (this invocation)");
            println!("  Hits:     {}", metrics.cache_hits);
            println!("  Misses:   {}", metrics.cache_misses);
            Ok(())
        }
        CacheAction::Clear => {
            app.cache()
                .clear()
                .await
                .map_err(|e| CliError::Api(e.to_string()))?;
            println!("Response cache cleared");
            Ok(())
        }
    }
}
