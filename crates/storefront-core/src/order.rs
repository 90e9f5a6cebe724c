//! # Order Assembly
//!
//! Turns a cart and a checkout form into the backend's order payload.
//! Everything here is a pure function; sending the payload is the client
//! crate's job.
//!
//! ## Payload Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart lines                          OrderSubmission                    │
//! │  ──────────                          ───────────────                    │
//! │  {p1, M, sizeId s1, qty 3}  ──┐      productUUIDS:      ["p1", "p2"]    │
//! │  {p1, L, sizeId s2, qty 1}  ──┼──►   productSizesUUIDS: {s1: 3, s2: 1,  │
//! │  {p2, M, no sizeId, qty 2}  ──┘                          }              │
//! │                                      customerDTO:       form            │
//! │                                                                         │
//! │  product ids: one per distinct product, first-seen order                │
//! │  sizes: only lines with a size id; a later line wins a shared id        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeMap, HashSet};

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::types::{CustomerForm, OrderSubmission};
use crate::validation::validate_customer_form;
use crate::LEGACY_ID_PREFIX;

/// Product id as the order endpoint expects it.
///
/// Ids from old catalogs carried a literal `"id"` prefix that must not reach
/// the backend; current ids pass through unchanged.
pub fn submission_product_id(product_id: &str) -> &str {
    product_id
        .strip_prefix(LEGACY_ID_PREFIX)
        .unwrap_or(product_id)
}

/// Distinct product ids in the cart, first occurrence first.
pub fn product_ids(cart: &Cart) -> Vec<String> {
    let mut seen = HashSet::new();
    cart.lines()
        .iter()
        .map(|line| submission_product_id(&line.product_id))
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Quantity per size variant. Lines without a size id are skipped.
pub fn quantity_by_size_id(cart: &Cart) -> BTreeMap<String, u32> {
    cart.lines()
        .iter()
        .filter_map(|line| Some((line.size_id.clone()?, line.quantity)))
        .collect()
}

/// Builds the order payload. Does not validate.
pub fn assemble(cart: &Cart, form: &CustomerForm) -> OrderSubmission {
    OrderSubmission {
        customer: form.clone(),
        product_ids: product_ids(cart),
        quantity_by_size_id: quantity_by_size_id(cart),
    }
}

/// Validates the form, rejects an empty cart, then assembles.
///
/// ## Example
/// ```rust
/// use storefront_core::order::prepare;
/// use storefront_core::{Cart, CoreError, CustomerForm};
///
/// let form = CustomerForm {
///     email: "mona@example.com".to_string(),
///     name: "Mona".to_string(),
///     city: "Cairo".to_string(),
///     street: "Tahrir".to_string(),
///     building_number: "12".to_string(),
///     flat_number: "3".to_string(),
///     phone_number: "01012345678".to_string(),
/// };
///
/// assert_eq!(prepare(&Cart::new(), &form), Err(CoreError::EmptyCart));
/// ```
pub fn prepare(cart: &Cart, form: &CustomerForm) -> CoreResult<OrderSubmission> {
    validate_customer_form(form)?;
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }
    Ok(assemble(cart, form))
}

// =============================================================================
// Unit Tests
// =============================================================================
