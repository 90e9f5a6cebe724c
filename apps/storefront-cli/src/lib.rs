//! # Storefront CLI Library
//!
//! Command-line front end for the storefront cart and checkout.
//!
//! ## Module Organization
//! ```text
//! storefront_cli/
//! ├── lib.rs          ◄─── You are here (argument parsing & dispatch)
//! ├── state/
//! │   ├── mod.rs      ◄─── State exports
//! │   └── session.rs  ◄─── Cart file + HTTP transport for one run
//! ├── commands/
//! │   ├── mod.rs      ◄─── Shared rendering helpers
//! │   ├── cart.rs     ◄─── cart show|add|update|remove|clear
//! │   ├── stock.rs    ◄─── stock
//! │   ├── checkout.rs ◄─── checkout
//! │   └── config.rs   ◄─── config show|init
//! └── error.rs        ◄─── CliError with SCREAMING_SNAKE codes
//! ```
//!
//! Command output goes to stdout, logs and errors to stderr.

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use storefront_client::StorefrontConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::cart::CartCommand;
use commands::checkout::CheckoutArgs;
use commands::config::ConfigCommand;
use commands::stock::StockArgs;
use error::CliError;
use state::Session;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront cart and checkout", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "STOREFRONT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Inspect and change the cart
    Cart(CartCommand),
    /// Show live stock for a product
    Stock(StockArgs),
    /// Place an order for the cart
    Checkout(CheckoutArgs),
    /// Inspect or create the config file
    Config(ConfigCommand),
}

impl Cli {
    pub async fn run(self) -> Result<String, CliError> {
        let Cli {
            config: config_path,
            command,
        } = self;
        debug!(?command, "Dispatching command");

        match command {
            Commands::Config(command) => commands::config::run(command, config_path),
            Commands::Cart(command) => {
                let mut session = open_session(config_path)?;
                commands::cart::run(
                    command,
                    &mut session.cart,
                    &session.catalog,
                    &session.config.display.currency,
                )
                .await
            }
            Commands::Stock(args) => {
                let session = open_session(config_path)?;
                commands::stock::run(&args, &session.cart, &session.catalog).await
            }
            Commands::Checkout(args) => {
                let mut session = open_session(config_path)?;
                commands::checkout::run(
                    args,
                    &mut session.cart,
                    &session.catalog,
                    &session.checkout,
                    &session.config.display.currency,
                )
                .await
            }
        }
    }
}

fn open_session(config_path: Option<PathBuf>) -> Result<Session, CliError> {
    let config = StorefrontConfig::load(config_path)?;
    Session::open(config)
}

/// Parses arguments, runs the command and prints its outcome.
///
/// ## Exit Codes
/// - `0` - command succeeded, output on stdout
/// - `1` - `[CODE] message` on stderr
pub async fn run() -> ExitCode {
    init_tracing();

    match Cli::parse().run().await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Show trace for storefront crates only
/// - Default: warnings, plus INFO from storefront crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,storefront=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
