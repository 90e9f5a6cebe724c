//! # Cart Store
//!
//! The session's cart: an explicitly owned [`Cart`] bound to durable
//! storage, plus the last-added signal.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Lifecycle                                 │
//! │                                                                         │
//! │  open(storage)                                                          │
//! │    │  get_item("cart")                                                  │
//! │    ├── Some(valid JSON) ──────► hydrated cart                           │
//! │    ├── None ──────────────────► empty cart                              │
//! │    └── corrupt / read error ──► empty cart (warn!, never an error)      │
//! │                                                                         │
//! │  add_to_cart ─────┐                                                     │
//! │  update_quantity ─┤   mutate Cart ──► set_item("cart", json)            │
//! │  remove_from_cart ┤                     └── failure: warn!, keep going  │
//! │  clear_cart ──────┘                                                     │
//! │                                                                         │
//! │  add_to_cart also overwrites the last-added slot (watch channel).       │
//! │  The slot is never persisted.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! One owner per session. Mutations take `&mut self`, so a mutation always
//! runs to completion before anything else can observe the cart. Separate
//! processes sharing a `FileStore` each hold their own copy; the last write
//! wins.

use chrono::{DateTime, Utc};
use storefront_core::{Cart, CartLine, LastAdded, Money, CART_STORAGE_KEY};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::storage::KeyValueStore;

/// Persisted cart with a last-added signal.
///
/// ## Example
/// ```rust
/// use storefront_store::{CartStore, MemoryStore};
///
/// let store = CartStore::open(MemoryStore::new());
/// assert!(store.cart().is_empty());
/// assert!(store.last_added().is_none());
/// ```
pub struct CartStore<S> {
    storage: S,
    cart: Cart,
    last_added: watch::Sender<Option<LastAdded>>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Opens the store, hydrating the cart from `storage`.
    ///
    /// Never fails: a missing or unreadable cart yields an empty one.
    pub fn open(storage: S) -> Self {
        let cart = hydrate(&storage);
        let (last_added, _) = watch::channel(None);
        CartStore {
            storage,
            cart,
            last_added,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a line, merging with an existing `(product_id, size)` line.
    pub fn add_to_cart(&mut self, line: CartLine) {
        self.add_to_cart_at(line, Utc::now());
    }

    /// [`add_to_cart`](Self::add_to_cart) with an explicit event time.
    pub fn add_to_cart_at(&mut self, line: CartLine, time: DateTime<Utc>) {
        let event = LastAdded::new(line.clone(), time);
        let merged = self.cart.add_line(line);
        debug!(
            product_id = %event.line.product_id,
            size = %event.line.size,
            quantity = event.line.quantity,
            merged,
            "Added to cart"
        );
        self.persist();
        self.last_added.send_replace(Some(event));
    }

    /// Sets a line's quantity verbatim. Returns `false` if no line matched.
    pub fn update_quantity(&mut self, product_id: &str, size: &str, quantity: u32) -> bool {
        let found = self.cart.update_quantity(product_id, size, quantity);
        if found {
            debug!(product_id, size, quantity, "Updated cart quantity");
        } else {
            debug!(product_id, size, "Quantity update for a line not in the cart");
        }
        self.persist();
        found
    }

    /// Removes a line. Returns `false` if no line matched.
    pub fn remove_from_cart(&mut self, product_id: &str, size: &str) -> bool {
        let found = self.cart.remove_line(product_id, size);
        debug!(product_id, size, found, "Removed from cart");
        self.persist();
        found
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        debug!("Cleared cart");
        self.persist();
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// The most recent add-to-cart event of this session, if any.
    pub fn last_added(&self) -> Option<LastAdded> {
        self.last_added.borrow().clone()
    }

    /// A receiver notified whenever a line is added.
    ///
    /// Single slot: a slow reader sees only the latest event.
    pub fn subscribe_last_added(&self) -> watch::Receiver<Option<LastAdded>> {
        self.last_added.subscribe()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Best-effort write of the whole cart.
    fn persist(&self) {
        let json = match serde_json::to_string(&self.cart) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart; not persisted");
                return;
            }
        };
        if let Err(e) = self.storage.set_item(CART_STORAGE_KEY, &json) {
            warn!(error = %e, lines = self.cart.len(), "Failed to persist cart");
        }
    }
}

fn hydrate<S: KeyValueStore>(storage: &S) -> Cart {
    let raw = match storage.get_item(CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read persisted cart; starting empty");
            return Cart::new();
        }
    };

    match serde_json::from_str::<Vec<CartLine>>(&raw) {
        Ok(lines) => {
            let cart = Cart::from_lines(lines);
            debug!(lines = cart.len(), "Hydrated cart");
            cart
        }
        Err(e) => {
            warn!(error = %e, "Persisted cart is corrupt; starting empty");
            Cart::new()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
