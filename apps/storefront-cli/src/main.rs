//! # Storefront CLI Entry Point
//!
//! Binary entry point; everything lives in the library crate
//! (`storefront_cli`) so commands can be tested without a process.
//!
//! ```text
//! storefront cart add p1 --size M --quantity 2
//! storefront cart show
//! storefront checkout --email mona@example.com --name Mona --city Cairo \
//!     --street Tahrir --building-number 12 --flat-number 3 \
//!     --phone-number 01012345678
//! ```

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    storefront_cli::run().await
}
