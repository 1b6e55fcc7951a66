//! Shopper context CLI commands.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use shopctx::context::{
    ContextKey, CreateContextOptions, DeleteContextOptions, GetContextOptions, ShopperContext,
    UpdateContextOptions,
};
use shopctx::mutation::MutationPayload;

use crate::error::CliError;

use super::common::{load_config, start_app};

/// Qualifier arguments shared by create and update.
#[derive(Debug, Args)]
pub struct ContextBody {
    /// Source code to apply to the session
    #[arg(long)]
    pub source_code: Option<String>,

    /// Custom qualifier as KEY=VALUE (repeatable)
    #[arg(long = "qualifier", value_name = "KEY=VALUE")]
    pub qualifiers: Vec<String>,

    /// Assignment qualifier as KEY=VALUE (repeatable)
    #[arg(long = "assignment", value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,

    /// Effective date-time, RFC 3339 (e.g. 2026-08-07T12:00:00Z)
    #[arg(long)]
    pub effective: Option<String>,

    /// Client IP for geolocation qualification
    #[arg(long)]
    pub client_ip: Option<String>,
}

/// Context action subcommands.
#[derive(Debug, Subcommand)]
pub enum ContextAction {
    /// Create (or replace) the shopper context for a usid
    Create {
        /// Shopper usid the context is attached to
        usid: String,
        /// Site identifier (defaults to the configured site)
        #[arg(long)]
        site: Option<String>,
        #[command(flatten)]
        body: ContextBody,
    },
    /// Show the shopper context for a usid
    Get {
        usid: String,
        #[arg(long)]
        site: Option<String>,
    },
    /// Partially update the shopper context for a usid
    Update {
        usid: String,
        #[arg(long)]
        site: Option<String>,
        #[command(flatten)]
        body: ContextBody,
    },
    /// Delete the shopper context for a usid
    Delete {
        usid: String,
        #[arg(long)]
        site: Option<String>,
    },
}

/// Run a context subcommand.
pub async fn run(action: ContextAction, config_path: Option<&Path>) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let app = start_app(&config)?;
    let api = app
        .shopper_contexts()
        .map_err(|e| CliError::Startup(e.to_string()))?;

    let site_default = config.api.site_id.clone();
    let key = |usid: &str, site: &Option<String>| {
        ContextKey::new(usid, site.clone().unwrap_or_else(|| site_default.clone()))
    };

    match action {
        ContextAction::Create { usid, site, body } => {
            let handle = api
                .mutation("createShopperContext")
                .map_err(|e| CliError::Api(e.to_string()))?;
            let payload = MutationPayload::Create(CreateContextOptions {
                key: key(&usid, &site),
                context: build_context(&body)?,
            });
            let created = handle
                .trigger(payload)
                .await
                .map_err(|e| CliError::Api(e.to_string()))?;
            print_context(created.as_ref());
        }
        ContextAction::Get { usid, site } => {
            let context = api
                .get(&GetContextOptions {
                    key: key(&usid, &site),
                })
                .await
                .map_err(|e| CliError::Api(e.to_string()))?;
            print_context(Some(&context));
        }
        ContextAction::Update { usid, site, body } => {
            let handle = api
                .mutation("updateShopperContext")
                .map_err(|e| CliError::Api(e.to_string()))?;
            let payload = MutationPayload::Update(UpdateContextOptions {
                key: key(&usid, &site),
                context: build_context(&body)?,
            });
            let updated = handle
                .trigger(payload)
                .await
                .map_err(|e| CliError::Api(e.to_string()))?;
            print_context(updated.as_ref());
        }
        ContextAction::Delete { usid, site } => {
            let key = key(&usid, &site);
            let handle = api
                .mutation("deleteShopperContext")
                .map_err(|e| CliError::Api(e.to_string()))?;
            handle
                .trigger(MutationPayload::Delete(DeleteContextOptions {
                    key: key.clone(),
                }))
                .await
                .map_err(|e| CliError::Api(e.to_string()))?;
            println!("Deleted shopper context for {}", key);
        }
    }

    Ok(())
}

/// Builds a context body from command-line arguments.
fn build_context(body: &ContextBody) -> Result<ShopperContext, CliError> {
    let effective_date_time = body
        .effective
        .as_deref()
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    CliError::InvalidArgument(format!("--effective '{}': {}", raw, e))
                })
        })
        .transpose()?;

    Ok(ShopperContext {
        effective_date_time,
        source_code: body.source_code.clone(),
        custom_qualifiers: parse_pairs(&body.qualifiers, "--qualifier")?,
        assignment_qualifiers: parse_pairs(&body.assignments, "--assignment")?,
        client_ip: body.client_ip.clone(),
    })
}

/// Parses repeated KEY=VALUE arguments into a map.
fn parse_pairs(pairs: &[String], flag: &str) -> Result<BTreeMap<String, String>, CliError> {
    let mut map = BTreeMap::new();
    for pair in pairs {
        match pair.split_once('=') {
            Some((k, v)) if !k.is_empty() => {
                map.insert(k.to_string(), v.to_string());
            }
            _ => {
                return Err(CliError::InvalidArgument(format!(
                    "{} expects KEY=VALUE, got '{}'",
                    flag, pair
                )))
            }
        }
    }
    Ok(map)
}

fn print_context(context: Option<&ShopperContext>) {
    match context.and_then(|c| serde_json::to_string_pretty(c).ok()) {
        Some(json) => println!("{}", json),
        None => println!("(no content)"),
    }
}
