//! # Config Commands
//!
//! Shows the effective configuration or writes a default config file.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use storefront_client::StorefrontConfig;

use crate::error::{CliError, ErrorCode};

#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Print the configuration in effect (file + environment)
    Show,
    /// Write a config file with default values
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(command: ConfigCommand, config_path: Option<PathBuf>) -> Result<String, CliError> {
    match command.command {
        ConfigSubcommand::Show => show(&StorefrontConfig::load_or_default(config_path)),
        ConfigSubcommand::Init { force } => init(config_path, force),
    }
}

pub fn show(config: &StorefrontConfig) -> Result<String, CliError> {
    toml::to_string_pretty(config)
        .map_err(|e| CliError::new(ErrorCode::ConfigError, e.to_string()))
}

fn init(config_path: Option<PathBuf>, force: bool) -> Result<String, CliError> {
    let path = config_path
        .or_else(StorefrontConfig::default_config_path)
        .ok_or_else(|| CliError::new(ErrorCode::ConfigError, "No config directory available"))?;

    if path.exists() && !force {
        return Err(CliError::new(
            ErrorCode::ConfigError,
            format!("{} already exists (use --force to overwrite)", path.display()),
        ));
    }

    StorefrontConfig::default().save(Some(path.clone()))?;
    Ok(format!("Wrote {}", path.display()))
}
