//! # storefront-core: Pure Cart & Order Logic
//!
//! This crate is the heart of the storefront client. It owns every rule the
//! cart and checkout follow, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Client Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 UI / CLI (storefront-cli)                       │   │
//! │  │    Product page ──► Cart ──► Checkout form ──► Confirmation     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │     storefront-client (transport, catalog read, checkout)       │   │
//! │  │     storefront-store  (Cart Store, durable client storage)      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ storefront-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌────────┐ ┌────────┐ ┌────────┐ ┌────────────┐ ┌────────┐   │   │
//! │  │   │ money  │ │  cart  │ │ stock  │ │ validation │ │ order  │   │   │
//! │  │   └────────┘ └────────┘ └────────┘ └────────────┘ └────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Cart lines, catalog entries, checkout form, order payload
//! - [`money`] - Decimal `Money` and the discount/line/cart total functions
//! - [`cart`] - The cart state machine (merge, update, remove, clear)
//! - [`stock`] - Stock Resolver and the quantity-control policy
//! - [`validation`] - Checkout form validation
//! - [`order`] - Order submission assembly
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use storefront_core::{Cart, CartLine, Money};
//!
//! let mut cart = Cart::new();
//! cart.add_line(CartLine {
//!     product_id: "p1".to_string(),
//!     size_id: Some("s1".to_string()),
//!     size: "M".to_string(),
//!     name: "Hoodie".to_string(),
//!     image: "/api/v1/product/image/p1".to_string(),
//!     price: Money::from_major(100),
//!     discount: Decimal::from(20),
//!     quantity: 2,
//! });
//!
//! assert_eq!(cart.total(), Money::from_major(160));
//! assert_eq!(cart.total().to_string(), "160.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod order;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use stock::QuantityControls;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Durable storage key the cart is persisted under.
///
/// Shared with the web front end, so a cart written by one client is read
/// back by the other.
pub const CART_STORAGE_KEY: &str = "cart";

/// Prefix some legacy catalogs put in front of product UUIDs.
///
/// Stripped during order assembly; see [`order::submission_product_id`].
pub const LEGACY_ID_PREFIX: &str = "id";

/// Upper bound of a discount percentage.
pub const MAX_DISCOUNT_PERCENT: i64 = 100;
