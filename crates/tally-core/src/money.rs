//! # Money Module
//!
//! Provides the `Money` type for handling monetary values exactly.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Bills chain several multiplications:                                   │
//! │    price × tax rate → (subtotal + tax) × discount % → ...              │
//! │    Every step would add drift.                                          │
//! │                                                                         │
//! │  OUR SOLUTION: Base-10 Decimal (rust_decimal)                           │
//! │    45.00 × 0.05 = 2.2500 exactly                                        │
//! │    Never rounded to cents until a collaborator asks for it             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Limits
//! A `Decimal` holds 28 significant digits. Products that need more (long
//! chains of fractional rates) have their last digits rounded by
//! `rust_decimal`; money-sized bills never get near that.
//!
//! Magnitudes are capped at `Decimal::MAX` (about 7.9 × 10²⁸). Addition,
//! subtraction and [`Money::apply_rate`] saturate at `±Decimal::MAX` instead
//! of panicking.
//!
//! ## Usage
//! ```rust
//! use rust_decimal_macros::dec;
//! use tally_core::money::Money;
//! use tally_core::types::Rate;
//!
//! let price = Money::new(dec!(45.00));
//! let tax = price.apply_rate(Rate::from_fraction(dec!(0.05)));
//! assert_eq!(tax.amount(), dec!(2.25));
//!
//! // Cents are still handy for literals
//! assert_eq!(Money::from_cents(1099).amount(), dec!(10.99));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// An exact monetary amount.
///
/// ## Design Decisions
/// - **Decimal, not cents**: rates are arbitrary fractions, so intermediate
///   values routinely carry more than two places (e.g. 7.25 saved on a 50.00
///   base). Keeping full precision means totals never drift.
/// - **Signed**: discounts are reported as negative amounts, and negative
///   prices are accepted (the engine does not validate).
/// - **Serialized as a string**: `"10.99"`, so JSON consumers never parse a
///   float.
///
/// ## Where Money Flows
/// ```text
/// Item.price ──► Σ subtotal ──┬──► Σ tax (price × rate) ──┐
///                             │                            ▼
///                             └──────────────► discount base ──► total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (two decimal places).
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-550).amount(), dec!(-5.50));
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns the exact decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero (at any scale: `0.00 == 0`).
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is strictly less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies the amount by a fractional rate, without rounding.
    ///
    /// This is the single multiplication both engines use: a tax charge is
    /// `price.apply_rate(tax.rate)` and a percentage discount is
    /// `remaining.apply_rate(p)`.
    ///
    /// Saturates at `±Decimal::MAX`.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tally_core::money::Money;
    /// use tally_core::types::Rate;
    ///
    /// let base = Money::new(dec!(45));
    /// let saved = base.apply_rate(Rate::from_fraction(dec!(0.05)));
    /// assert_eq!(saved.amount(), dec!(2.25));
    /// ```
    #[inline]
    pub fn apply_rate(&self, rate: Rate) -> Money {
        Money(self.0.saturating_mul(rate.fraction()))
    }

    /// Rounds to `dp` decimal places using Bankers Rounding
    /// (round half to even).
    ///
    /// The engine never calls this; it exists for collaborators that settle
    /// or print amounts at a fixed precision.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::new(dec!(0.825)).rounded(2).amount(), dec!(0.82));
    /// assert_eq!(Money::new(dec!(0.835)).rounded(2).amount(), dec!(0.84));
    /// ```
    pub fn rounded(&self, dp: u32) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering for logs and debugging.
///
/// ## Note
/// No currency symbol, no grouping. Presentation formats money itself.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Forward so width and precision flags reach the decimal
        fmt::Display::fmt(&self.0, f)
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Negation, used to report discounts as a deduction.
///
/// Zero stays an unsigned zero, so an undiscounted bill never shows `-0`.
impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(Decimal::ZERO - self.0)
    }
}

impl Mul<Rate> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, rate: Rate) -> Self {
        self.apply_rate(rate)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.amount(), dec!(10.99));
        assert_eq!(Money::from_cents(-550).amount(), dec!(-5.50));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::new(dec!(7.25))), "7.25");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(dec!(10));
        let b = Money::new(dec!(2.5));

        assert_eq!((a + b).amount(), dec!(12.5));
        assert_eq!((a - b).amount(), dec!(7.5));
        assert_eq!((-b).amount(), dec!(-2.5));
        assert_eq!((-Money::zero()).to_string(), "0");

        let mut c = a;
        c += b;
        c -= Money::new(dec!(0.5));
        assert_eq!(c.amount(), dec!(12));
    }

    #[test]
    fn test_scale_does_not_affect_equality() {
        assert_eq!(Money::new(dec!(4.0)), Money::new(dec!(4)));
        assert_eq!(Money::new(dec!(0.00)), Money::zero());
    }

    #[test]
    fn test_apply_rate_is_exact() {
        // 0.1 + 0.2 style drift would show up here with floats
        let price = Money::new(dec!(0.1)) + Money::new(dec!(0.2));
        assert_eq!(price.amount(), dec!(0.3));

        let tax = Money::new(dec!(40)) * Rate::from_fraction(dec!(0.1));
        assert_eq!(tax.amount(), dec!(4));
    }

    #[test]
    fn test_arithmetic_saturates_at_decimal_bounds() {
        let max = Money::new(Decimal::MAX);
        let min = Money::new(Decimal::MIN);

        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(min - Money::from_cents(1), min);
        assert_eq!(max.apply_rate(Rate::from_fraction(dec!(2))), max);
        assert_eq!(min.apply_rate(Rate::from_fraction(dec!(2))), min);

        let mut total = max;
        total += max;
        assert_eq!(total, max);
        total -= min;
        assert_eq!(total, max);
    }

    #[test]
    fn test_long_rate_chains_stay_within_precision() {
        let after_discount = Rate::from_fraction(dec!(0.9175));
        let mut remaining = Money::new(dec!(13.99));
        for _ in 0..10 {
            remaining = remaining.apply_rate(after_discount);
        }

        assert!(remaining.is_positive());
        assert!(remaining.amount().scale() <= 28);
        assert_eq!(remaining.rounded(2), Money::new(dec!(5.91)));
    }

    #[test]
    fn test_rounded_uses_bankers_rounding() {
        assert_eq!(Money::new(dec!(2.5)).rounded(0).amount(), dec!(2));
        assert_eq!(Money::new(dec!(3.5)).rounded(0).amount(), dec!(4));
        assert_eq!(Money::new(dec!(-0.125)).rounded(2).amount(), dec!(-0.12));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs(), Money::from_cents(100));
    }

    #[test]
    fn test_sum() {
        let prices = [Money::from_cents(4000), Money::from_cents(7000)];
        let by_ref: Money = prices.iter().sum();
        let by_value: Money = prices.into_iter().sum();
        assert_eq!(by_ref, Money::new(dec!(110)));
        assert_eq!(by_ref, by_value);
        assert_eq!(std::iter::empty::<Money>().sum::<Money>(), Money::zero());
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Money::new(dec!(10.99))).unwrap();
        assert_eq!(json, "\"10.99\"");

        let back: Money = serde_json::from_str("\"7.25\"").unwrap();
        assert_eq!(back.amount(), dec!(7.25));
    }
}
