//! # storefront-client: Backend Access & Checkout
//!
//! Network-facing half of the storefront client.
//!
//! ## Modules
//! - [`transport`] - `Transport` trait and the reqwest-backed `HttpTransport`
//! - [`catalog`] - Product catalog reads (the stock source)
//! - [`checkout`] - Order submission and its state machine
//! - [`config`] - `StorefrontConfig` (file + environment)
//! - [`error`] - Client error types
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront_client::{CatalogClient, HttpTransport, StorefrontConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StorefrontConfig::load(None)?;
//! let transport = Arc::new(HttpTransport::new(&config.api)?);
//!
//! let catalog = CatalogClient::new(Arc::clone(&transport));
//! let products = catalog.fetch_products().await?;
//! println!("{} products", products.len());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod transport;

pub use catalog::{CatalogClient, CatalogQuery};
pub use checkout::{Checkout, CheckoutPhase, OrderConfirmation};
pub use config::StorefrontConfig;
pub use error::{CheckoutError, ClientError, ClientResult, ConfigError, TransportError, TransportResult};
pub use transport::{HttpTransport, Transport};
