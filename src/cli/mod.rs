//! CLI module for context-guard
//!
//! Provides subcommands:
//! - `serve`: run the HTTP server behind the security chain
//! - `check`: evaluate the security chain for a path without serving

pub mod check;
pub mod serve;

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::{AppConfig, DEFAULT_CONFIG_DIR};
use crate::infrastructure::logging;

/// context-guard - context-aware request matching for HTTP services
#[derive(Parser)]
#[command(name = "context-guard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Evaluate the security chain for a request
    Check(check::CheckArgs),
}

/// Load `.env` and configuration, then initialize logging
///
/// An invalid configuration aborts the command instead of falling back to
/// default security rules.
pub(crate) fn load_config() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();
    load_config_from(Path::new(DEFAULT_CONFIG_DIR))
}

fn load_config_from(dir: &Path) -> anyhow::Result<AppConfig> {
    let config = AppConfig::load_from(dir)
        .with_context(|| format!("Failed to load configuration from {}", dir.display()))?;
    logging::init_logging(&config.logging);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_invalid_config_aborts_command() {
        let dir = std::env::temp_dir().join(format!("context-guard-cli-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("default.toml"),
            "[server]\nport = \"not-a-port\"\n\n[management]\npublic_endpoints = []\n",
        )
        .unwrap();

        let err = load_config_from(&dir).unwrap_err();
        fs::remove_dir_all(&dir).ok();

        assert!(err.to_string().starts_with("Failed to load configuration"));
    }

    #[test]
    fn test_check_command_parses_method_and_path() {
        let cli = Cli::try_parse_from(["context-guard", "check", "post", "/api/orders"]).unwrap();

        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.method, "post");
                assert_eq!(args.path, "/api/orders");
            }
            Command::Serve => panic!("expected check command"),
        }
    }
}
