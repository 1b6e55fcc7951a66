//! ShopCtx CLI - Command-line interface
//!
//! This binary provides a command-line interface to the ShopCtx library.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod error;

use commands::{cache::CacheAction, config::ConfigAction, context::ContextAction};

/// Manage shopper contexts from the terminal.
#[derive(Debug, Parser)]
#[command(name = "shopctx", version, about)]
struct Cli {
    /// Path to an alternate configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create, read, update, or delete shopper contexts
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },
    /// Inspect or clear the response cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    shopctx::log::init_tracing("shopctx=info");

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Command::Context { action } => commands::context::run(action, config_path).await,
        Command::Cache { action } => commands::cache::run(action, config_path).await,
        Command::Config { action } => commands::config::run(action, config_path),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
