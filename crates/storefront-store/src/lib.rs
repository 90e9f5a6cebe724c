//! # storefront-store: Client Storage & Cart Store
//!
//! Durable client storage and the persisted cart built on it.
//!
//! ## Modules
//! - [`storage`] - `KeyValueStore` trait, `MemoryStore`, `FileStore`
//! - [`cart_store`] - `CartStore`, the session cart with its last-added signal
//! - [`error`] - `StoreError`
//!
//! ## Example
//! ```rust
//! use rust_decimal::Decimal;
//! use storefront_core::{CartLine, Money};
//! use storefront_store::{CartStore, MemoryStore};
//!
//! let mut store = CartStore::open(MemoryStore::new());
//! store.add_to_cart(CartLine {
//!     product_id: "p1".to_string(),
//!     size_id: Some("s1".to_string()),
//!     size: "M".to_string(),
//!     name: "Hoodie".to_string(),
//!     image: String::new(),
//!     price: Money::from_major(200),
//!     discount: Decimal::from(10),
//!     quantity: 3,
//! });
//!
//! assert_eq!(store.total().to_string(), "540.00");
//! ```

pub mod cart_store;
pub mod error;
pub mod storage;

pub use cart_store::CartStore;
pub use error::{StoreError, StoreResult};
pub use storage::{default_data_dir, FileStore, KeyValueStore, MemoryStore};
