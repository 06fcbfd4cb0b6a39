//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Currency Units                                   │
//! │    The catalog carries whole currency units only (no sub-unit          │
//! │    currency is modeled). Where a fraction can arise (applying a        │
//! │    dealer discount rate) we round half-up, explicitly.                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::{DiscountRate, Money};
//!
//! let store_price = Money::from_units(100);
//!
//! // Dealer pays 85% of store price, rounded half-up
//! let rate = DiscountRate::from_bps(8500);
//! assert_eq!(rate.apply(store_price).units(), 85);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediates (shortfall = tendered - due)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// PriceTiers ──► PricedLine.chosen_unit_price ──► PricedLine.line_subtotal
///                                                        │
///                                                        ▼
///              Settlement.amount_due ◄── Σ line_subtotal − point offset
///                                                        │
///                                                        ▼
///              change / credit / paid / cashback figures
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the larger of two values.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// Returns the smaller of two values.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    /// Clamps a value to zero or above.
    ///
    /// Used where a derived figure must never go negative: line discounts,
    /// the point-offset-reduced amount due, credit amounts.
    #[inline]
    pub fn clamp_non_negative(self) -> Self {
        Money(self.0.max(0))
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let unit_price = Money::from_units(80);
    /// assert_eq!(unit_price.multiply_quantity(3).units(), 240);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// A fractional rate (≤ 1) represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 8500 bps = 85% (a dealer paying 85% of the store price)
///
/// Applied only for dealer-tier pricing, when the catalog does not carry an
/// explicit dealer price for a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points. Values above 10000 are capped at 1.0.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        if bps > 10_000 {
            DiscountRate(10_000)
        } else {
            DiscountRate(bps)
        }
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Applies the rate to an amount, rounding half-up to the nearest
    /// whole currency unit.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`
    /// The +5000 provides the half-up rounding (5000/10000 = 0.5).
    /// i128 intermediates prevent overflow on large amounts.
    pub fn apply(&self, amount: Money) -> Money {
        let scaled = (amount.units() as i128 * self.0 as i128 + 5000) / 10_000;
        Money::from_units(scaled as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Use frontend formatting for actual UI
/// display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}", sign, self.0.abs())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(240);
        assert_eq!(money.units(), 240);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_units(100)), "$100");
        assert_eq!(format!("{}", Money::from_units(-140)), "-$140");
        assert_eq!(format!("{}", Money::from_units(0)), "$0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(100);
        let b = Money::from_units(40);

        assert_eq!((a + b).units(), 140);
        assert_eq!((a - b).units(), 60);
        let result: Money = a * 3;
        assert_eq!(result.units(), 300);
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(Money::from_units(-5).clamp_non_negative().units(), 0);
        assert_eq!(Money::from_units(5).clamp_non_negative().units(), 5);
    }

    #[test]
    fn test_discount_rate_apply_exact() {
        // 85% of 100 = 85 exactly, no rounding needed
        let rate = DiscountRate::from_bps(8500);
        assert_eq!(rate.apply(Money::from_units(100)).units(), 85);
    }

    #[test]
    fn test_discount_rate_rounds_half_up() {
        // 85% of 50 = 42.5 → 43 (half-up)
        let rate = DiscountRate::from_bps(8500);
        assert_eq!(rate.apply(Money::from_units(50)).units(), 43);

        // 33% of 50 = 16.5 → 17 (half-up)
        let rate = DiscountRate::from_bps(3300);
        assert_eq!(rate.apply(Money::from_units(50)).units(), 17);
    }

    #[test]
    fn test_discount_rate_caps_at_one() {
        let rate = DiscountRate::from_bps(20_000);
        assert_eq!(rate.bps(), 10_000);
        assert_eq!(rate.apply(Money::from_units(77)).units(), 77);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_units(100);
        assert!(positive.is_positive());

        let negative = Money::from_units(-100);
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_units(80);
        assert_eq!(unit_price.multiply_quantity(3).units(), 240);
    }
}
