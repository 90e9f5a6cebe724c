//! # State Module
//!
//! Everything a command needs, opened once per invocation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session                                              │
//! │                                                                         │
//! │  StorefrontConfig ──┬──► FileStore(data_dir) ──► CartStore              │
//! │                     │                                                   │
//! │                     └──► Arc<HttpTransport> ──┬──► CatalogClient        │
//! │                                               └──► Checkout             │
//! │                                                                         │
//! │  Catalog and checkout share one transport, so they share one cookie     │
//! │  jar: the CSRF cookie picked up by a catalog read is sent on checkout.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod session;

pub use session::Session;
