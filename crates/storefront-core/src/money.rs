//! # Money Module
//!
//! Provides the `Money` type and the price functions the cart is built on.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Discounts make it worse:                                               │
//! │    9.99 - 9.99 * 15 / 100 = 8.4915 (needs 4 exact decimal places)      │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    Every stored value keeps full precision. Rounding to 2 places       │
//! │    happens only when a value is displayed.                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal::Decimal;
//! use storefront_core::money::{discounted_unit_price, Money};
//!
//! let price = Money::from_major(200);
//! let unit = discounted_unit_price(price, Decimal::from(10)); // 10% off
//! assert_eq!(unit, Money::from_major(180));
//! assert_eq!(unit.multiply_quantity(3).to_string(), "540.00");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::types::CartLine;

/// Decimal places shown to the customer.
pub const DISPLAY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the store currency, at full decimal precision.
///
/// ## Design Decisions
/// - **Decimal, not float**: sums of discounted prices stay exact
/// - **Single field tuple struct**: zero-cost wrapper over `Decimal`
/// - **JSON number on the wire**: persisted carts written by the web front
///   end store `"price": 200`, and those must keep loading
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Catalog price ──► CartLine.price ──► discounted unit ──► line total   │
/// │                                                             │           │
/// │                                             Σ line totals ──► cart total│
/// │                                                                         │
/// │  Only Display rounds (2 places). Stored values are never rounded.      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a whole-unit amount.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(160).to_string(), "160.00");
    /// ```
    #[inline]
    pub fn from_major(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Returns the underlying decimal amount (full precision).
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Reduces the amount by a percentage.
    ///
    /// Computed as `amount - amount * percent / 100` with no intermediate
    /// rounding. The percentage is expected in `[0, 100]`; clamping happens
    /// where a line enters the cart, not here. Saturates at the `Decimal`
    /// bounds.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_major(100);
    /// assert_eq!(price.apply_percentage_discount(Decimal::from(20)), Money::from_major(80));
    /// ```
    pub fn apply_percentage_discount(&self, percent: Decimal) -> Money {
        Money(
            self.0
                .saturating_sub(self.0.saturating_mul(percent) / Decimal::ONE_HUNDRED),
        )
    }

    /// Multiplies money by a quantity, saturating at the `Decimal` bounds.
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Money {
        Money(self.0.saturating_mul(Decimal::from(qty)))
    }

    /// The amount rounded for display (2 places, half away from zero).
    pub fn rounded(&self) -> Decimal {
        let mut rounded = self
            .0
            .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
        // Pads "160" to "160.00"; never rounds again.
        rounded.rescale(DISPLAY_DECIMALS);
        rounded
    }
}

// =============================================================================
// Price Functions
// =============================================================================

/// Unit price after a percentage discount.
///
/// `price - price * discount_percent / 100`. Never negative as long as the
/// discount was clamped to `[0, 100]` when the line was created.
pub fn discounted_unit_price(price: Money, discount_percent: Decimal) -> Money {
    price.apply_percentage_discount(discount_percent)
}

/// What one cart line costs: discounted unit price × quantity.
pub fn line_total(line: &CartLine) -> Money {
    discounted_unit_price(line.price, line.discount).multiply_quantity(line.quantity)
}

/// Sum of every line total in the cart.
pub fn cart_total(lines: &[CartLine]) -> Money {
    lines.iter().map(line_total).sum()
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the 2-place presentation value, without a currency label.
///
/// The label ("LE") is a display setting; see the client configuration.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rounded())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
