//! # Stock Resolver
//!
//! Looks up how many units of a line's product and size can be bought, from
//! a catalog fetched elsewhere. The cart doesn't own stock; this module only
//! reads it.
//!
//! ## Unknown vs. Out of Stock
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  max_stock_for(line, catalog)                                           │
//! │                                                                         │
//! │  product not in catalog ─────────┐                                      │
//! │  product has no size list ───────┼──► None      "unknown, don't block"  │
//! │  no size label matches ──────────┘                                      │
//! │                                                                         │
//! │  size matches, quantity 0 ───────────► Some(0)  "known, blocked"        │
//! │  size matches, quantity n ───────────► Some(n)                          │
//! │                                                                         │
//! │  Size labels match case-INsensitively here, unlike cart identity.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::types::{CartLine, CatalogProduct};

/// Maximum purchasable quantity for a cart line.
///
/// `None` means unknown; callers must not treat it as zero.
pub fn max_stock_for(line: &CartLine, catalog: &[CatalogProduct]) -> Option<u32> {
    max_stock_for_size(&line.product_id, &line.size, catalog)
}

/// Same lookup as [`max_stock_for`] for a size that isn't in the cart yet.
pub fn max_stock_for_size(product_id: &str, size: &str, catalog: &[CatalogProduct]) -> Option<u32> {
    catalog
        .iter()
        .find(|p| p.id == product_id)?
        .find_size(size)
        .map(|s| s.quantity)
}

// =============================================================================
// Quantity Controls
// =============================================================================

/// Which quantity controls a cart line should offer.
///
/// ## Example
/// ```rust
/// use storefront_core::QuantityControls;
///
/// let controls = QuantityControls::new(3, Some(3));
/// assert!(!controls.can_increment);
/// assert!(controls.can_decrement);
///
/// // Unknown stock never allows growing the line.
/// assert!(!QuantityControls::new(1, None).can_increment);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityControls {
    pub can_increment: bool,
    pub can_decrement: bool,
    pub out_of_stock: bool,
}

impl QuantityControls {
    pub fn new(quantity: u32, max_stock: Option<u32>) -> Self {
        QuantityControls {
            can_increment: max_stock.is_some_and(|max| quantity < max),
            can_decrement: quantity > 1,
            out_of_stock: max_stock == Some(0),
        }
    }

    /// Controls for a line against the current catalog.
    pub fn for_line(line: &CartLine, catalog: &[CatalogProduct]) -> Self {
        Self::new(line.quantity, max_stock_for(line, catalog))
    }
}

/// Clamps a requested quantity before it is handed to the cart.
///
/// Never below 1. Capped at a known positive stock. An unknown stock, or a
/// known stock of zero, leaves the request as is.
pub fn clamp_quantity(requested: u32, max_stock: Option<u32>) -> u32 {
    let requested = requested.max(1);
    match max_stock {
        Some(max) if max > 0 => requested.min(max),
        _ => requested,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
