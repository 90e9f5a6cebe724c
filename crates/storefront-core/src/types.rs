//! # Domain Types
//!
//! Core domain types used throughout the storefront client.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog (read from backend)         Cart (owned by the client)         │
//! │  ┌─────────────────────┐             ┌─────────────────────┐            │
//! │  │  CatalogProduct     │  snapshot   │     CartLine        │            │
//! │  │  id, name, price,   │ ──────────► │  productId, size,   │            │
//! │  │  discount, sizes[]  │  at add     │  sizeId?, price,    │            │
//! │  └─────────┬───────────┘             │  discount, quantity │            │
//! │            │                         └──────────┬──────────┘            │
//! │  ┌─────────▼───────────┐                        │                       │
//! │  │  CatalogSize        │                        │ + CustomerForm        │
//! │  │  id?, size|name,    │                        ▼                       │
//! │  │  quantity (stock)   │             ┌─────────────────────┐            │
//! │  └─────────────────────┘             │  OrderSubmission    │            │
//! │                                      │  (backend payload)  │            │
//! │                                      └─────────────────────┘            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A cart line copies name, image, price and discount from the catalog when
//! it is added. Later catalog changes don't reach lines already in the cart.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Path the backend serves product images from.
pub const PRODUCT_IMAGE_PATH: &str = "/api/v1/product/image";

// =============================================================================
// Cart Line
// =============================================================================

/// One purchasable unit in the cart: a (product, size) pair with its
/// quantity and add-time price snapshot.
///
/// ## Identity
/// A cart holds at most one line per `(product_id, size)`, compared
/// **case-sensitively**. Stock lookup compares sizes case-insensitively
/// (see [`crate::stock`]); the two rules are deliberately not unified.
///
/// ## Wire Format
/// camelCase JSON, shared with the web front end's persisted cart:
/// ```json
/// { "productId": "p1", "sizeId": "s1", "size": "M", "name": "Hoodie",
///   "image": "/api/v1/product/image/p1", "price": 200, "discount": 10,
///   "quantity": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Catalog product identifier (opaque).
    pub product_id: String,

    /// Identifier of the chosen size variant, when the catalog supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub size_id: Option<String>,

    /// Human-readable size label. Part of line identity.
    pub size: String,

    /// Product name at time of adding (frozen).
    #[serde(default)]
    pub name: String,

    /// Image path at time of adding (frozen).
    #[serde(default)]
    pub image: String,

    /// Unit price before discount at time of adding (frozen).
    #[ts(type = "number")]
    pub price: Money,

    /// Discount percentage in `[0, 100]`, 0 meaning none.
    #[serde(default, with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub discount: Decimal,

    /// How many the customer wants. Mutable.
    pub quantity: u32,
}

impl CartLine {
    /// Builds a line from a catalog product and a chosen size label.
    ///
    /// This is the input boundary for cart lines:
    /// - the discount is clamped to `[0, 100]`
    /// - the quantity is raised to at least 1
    /// - `size_id` is taken from the catalog size whose label matches
    ///   case-insensitively, and left empty if none does
    /// - the image path points at the backend image endpoint
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{CartLine, CatalogProduct, CatalogSize};
    ///
    /// let product = CatalogProduct {
    ///     id: "p1".to_string(),
    ///     name: "Hoodie".to_string(),
    ///     price: None,
    ///     discount: None,
    ///     product_sizes: Some(vec![CatalogSize {
    ///         id: Some("s1".to_string()),
    ///         size: Some("m".to_string()),
    ///         name: None,
    ///         quantity: 4,
    ///     }]),
    /// };
    ///
    /// let line = CartLine::from_catalog(&product, "M", 2);
    /// assert_eq!(line.size_id.as_deref(), Some("s1"));
    /// assert_eq!(line.size, "M");
    /// ```
    pub fn from_catalog(product: &CatalogProduct, size: &str, quantity: u32) -> Self {
        CartLine {
            product_id: product.id.clone(),
            size_id: product.find_size(size).and_then(|s| s.id.clone()),
            size: size.to_string(),
            name: product.name.clone(),
            image: product_image_path(&product.id),
            price: product.price.unwrap_or_default(),
            discount: clamp_discount(product.discount.unwrap_or_default()),
            quantity: quantity.max(1),
        }
    }

    /// The `(product_id, size)` identity of this line.
    #[inline]
    pub fn key(&self) -> (&str, &str) {
        (&self.product_id, &self.size)
    }

    /// Case-sensitive identity match.
    #[inline]
    pub fn matches(&self, product_id: &str, size: &str) -> bool {
        self.product_id == product_id && self.size == size
    }
}

/// Clamps a discount percentage into `[0, 100]`.
pub fn clamp_discount(discount: Decimal) -> Decimal {
    discount.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Backend image path for a product.
pub fn product_image_path(product_id: &str) -> String {
    format!("{}/{}", PRODUCT_IMAGE_PATH, product_id)
}

// =============================================================================
// Last Added
// =============================================================================

/// The most recent add-to-cart event.
///
/// Drives transient UI feedback (a cart icon bounce, a toast). It is not
/// part of the cart: never persisted, overwritten by every add.
///
/// Serialized as the added line plus `time` in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LastAdded {
    /// The line exactly as it was passed to add-to-cart.
    #[serde(flatten)]
    #[ts(flatten)]
    pub line: CartLine,

    /// When it was added.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[ts(type = "number")]
    pub time: DateTime<Utc>,
}

impl LastAdded {
    /// Records `line` as added at `time`.
    pub fn new(line: CartLine, time: DateTime<Utc>) -> Self {
        LastAdded { line, time }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A product as served by the catalog endpoint.
///
/// Only the fields the cart needs are modelled; everything else in the
/// backend response is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogProduct {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    #[ts(type = "number | null")]
    pub price: Option<Money>,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[ts(type = "number | null")]
    pub discount: Option<Decimal>,

    /// Size variants with their stock. Absent for products the backend
    /// hasn't attached sizes to.
    #[serde(rename = "productSizeDTOS", default)]
    pub product_sizes: Option<Vec<CatalogSize>>,
}

impl CatalogProduct {
    /// Finds the size entry whose label matches `size`, ignoring case.
    pub fn find_size(&self, size: &str) -> Option<&CatalogSize> {
        let wanted = size.to_lowercase();
        self.product_sizes
            .as_deref()?
            .iter()
            .find(|s| s.label().is_some_and(|label| label.to_lowercase() == wanted))
    }

    /// Size labels in catalog order.
    pub fn size_labels(&self) -> Vec<&str> {
        self.product_sizes
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(CatalogSize::label)
            .collect()
    }
}

/// One size variant of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogSize {
    #[serde(default)]
    pub id: Option<String>,

    /// Size label. Some endpoints send it as `size`, others as `name`.
    #[serde(default)]
    pub size: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// Units in stock.
    pub quantity: u32,
}

impl CatalogSize {
    /// The label: `size` if non-empty, else `name`.
    pub fn label(&self) -> Option<&str> {
        self.size
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.name.as_deref())
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// Shipping/contact details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerForm {
    pub email: String,
    pub name: String,
    pub city: String,
    pub street: String,
    pub building_number: String,
    pub flat_number: String,
    pub phone_number: String,
}

impl CustomerForm {
    /// Every field with its wire name, in form order.
    pub fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("email", self.email.as_str()),
            ("name", self.name.as_str()),
            ("city", self.city.as_str()),
            ("street", self.street.as_str()),
            ("buildingNumber", self.building_number.as_str()),
            ("flatNumber", self.flat_number.as_str()),
            ("phoneNumber", self.phone_number.as_str()),
        ]
    }
}

/// The backend-facing order payload. Derived from cart + form, never stored.
///
/// Field names on the wire are the backend's (`customerDTO`, `productUUIDS`,
/// `productSizesUUIDS`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderSubmission {
    #[serde(rename = "customerDTO")]
    pub customer: CustomerForm,

    /// One entry per distinct product, in cart order.
    #[serde(rename = "productUUIDS")]
    pub product_ids: Vec<String>,

    /// Quantity per size variant. Lines without a `size_id` are left out.
    #[serde(rename = "productSizesUUIDS")]
    pub quantity_by_size_id: BTreeMap<String, u32>,
}

// =============================================================================
// Unit Tests
// =============================================================================
