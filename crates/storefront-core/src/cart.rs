//! # Cart
//!
//! The cart as a pure value: an ordered list of lines plus the rules for
//! changing it. Persistence and the last-added signal live in
//! `storefront-store`; nothing here does I/O.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation                Key match?   Effect                           │
//! │  ─────────                ──────────   ──────                           │
//! │                                                                         │
//! │  add_line(line) ─────────► yes ──────► qty summed, other fields from    │
//! │                                        `line`, position unchanged       │
//! │                  ─────────► no ───────► appended                        │
//! │                                                                         │
//! │  update_quantity(p, s, n) ► yes ──────► qty = n (verbatim)              │
//! │                  ─────────► no ───────► no-op                           │
//! │                                                                         │
//! │  remove_line(p, s) ──────► yes ──────► line dropped                     │
//! │                  ─────────► no ───────► no-op                           │
//! │                                                                         │
//! │  clear() ───────────────────────────────► empty                         │
//! │                                                                         │
//! │  Key = (product_id, size), case-sensitive.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::{cart_total, Money};
use crate::types::CartLine;

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per `(product_id, size)`
/// - Lines keep the position of their first add, across merges
///
/// Serializes as a bare JSON array of lines, the format persisted under
/// [`crate::CART_STORAGE_KEY`]. Deserializing goes through
/// [`Cart::from_lines`], so repeated keys are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Builds a cart from persisted lines.
    ///
    /// Lines that repeat an earlier key are merged into it, so a hand-edited
    /// or legacy payload still satisfies the one-line-per-key invariant.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Cart::new();
        for line in lines {
            cart.add_line(line);
        }
        cart
    }

    /// Adds a line, merging with an existing line of the same key.
    ///
    /// ## Behavior
    /// - Key present: the stored line is replaced by `line` with
    ///   `quantity = existing + line.quantity`. Price, discount, name, image
    ///   and size id all come from `line` (newest snapshot wins).
    /// - Key absent: `line` is appended.
    ///
    /// Returns `true` if an existing line was merged.
    pub fn add_line(&mut self, line: CartLine) -> bool {
        match self.position(&line.product_id, &line.size) {
            Some(index) => {
                let existing = self.lines[index].quantity;
                let quantity = existing.saturating_add(line.quantity);
                self.lines[index] = CartLine { quantity, ..line };
                true
            }
            None => {
                self.lines.push(line);
                false
            }
        }
    }

    /// Sets a line's quantity verbatim. No clamping happens here.
    ///
    /// Returns `false` (and leaves the cart unchanged) if no line matches.
    pub fn update_quantity(&mut self, product_id: &str, size: &str, quantity: u32) -> bool {
        match self.lines.iter_mut().find(|l| l.matches(product_id, size)) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Removes a line. Returns `false` if no line matched.
    pub fn remove_line(&mut self, product_id: &str, size: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| !l.matches(product_id, size));
        self.lines.len() != initial_len
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up a line by key.
    pub fn find(&self, product_id: &str, size: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(product_id, size))
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities (the badge number on a cart icon).
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Discount-aware cart total at full precision.
    pub fn total(&self) -> Money {
        cart_total(&self.lines)
    }

    fn position(&self, product_id: &str, size: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.matches(product_id, size))
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Cart::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
