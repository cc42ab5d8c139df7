//! # Discount Engine
//!
//! Discount rules and sequential stacking.
//!
//! ## Sequential Stacking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base = 50.00, rules = [$5 off, 5% off]                                 │
//! │                                                                         │
//! │  remaining 50.00 ──► $5 off  ──► saved 5.00  ──► remaining 45.00        │
//! │  remaining 45.00 ──► 5% off  ──► saved 2.25  ──► remaining 42.75        │
//! │                                                  total saved 7.25       │
//! │                                                                         │
//! │  rules = [5% off, $5 off]                                               │
//! │  remaining 50.00 ──► 5% off  ──► saved 2.50  ──► remaining 47.50        │
//! │  remaining 47.50 ──► $5 off  ──► saved 5.00  ──► remaining 42.50        │
//! │                                                  total saved 7.50       │
//! │                                                                         │
//! │  ORDER MATTERS. A percentage applies to whatever the earlier rules      │
//! │  left over. Disabled rules save 0 and leave `remaining` untouched.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{DiscountId, Rate};

// =============================================================================
// Discount Amount
// =============================================================================

/// How much a discount takes off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountAmount {
    /// A fraction of the running figure (`0.10` = 10% off).
    Percentage(Rate),
    /// A flat amount, regardless of the running figure. May exceed it.
    Absolute(Money),
}

// =============================================================================
// Discount
// =============================================================================

/// A discount rule. Disabled until the cashier turns it on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Discount {
    pub id: DiscountId,
    pub label: String,
    pub amount: DiscountAmount,
    pub is_enabled: bool,
}

impl Discount {
    /// Creates a disabled discount.
    pub fn new(label: impl Into<String>, amount: DiscountAmount) -> Self {
        Discount {
            id: DiscountId::new(),
            label: label.into(),
            amount,
            is_enabled: false,
        }
    }

    /// Creates a disabled percentage discount.
    pub fn percentage(label: impl Into<String>, rate: Rate) -> Self {
        Discount::new(label, DiscountAmount::Percentage(rate))
    }

    /// Creates a disabled flat discount.
    pub fn absolute(label: impl Into<String>, amount: Money) -> Self {
        Discount::new(label, DiscountAmount::Absolute(amount))
    }

    /// Builder-style setter for the enabled flag.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.is_enabled = enabled;
        self
    }

    /// Flips the enabled flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.is_enabled = !self.is_enabled;
        self.is_enabled
    }

    /// Amount this rule saves on `base`.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tally_core::{Discount, Money, Rate};
    ///
    /// let five_off = Discount::absolute("$5 Off", Money::new(dec!(5))).enabled(true);
    /// let five_pct =
    ///     Discount::percentage("5% Off", Rate::from_fraction(dec!(0.05))).enabled(true);
    ///
    /// assert_eq!(five_off.amount_saved(Money::new(dec!(50))).amount(), dec!(5));
    /// assert_eq!(five_pct.amount_saved(Money::new(dec!(50))).amount(), dec!(2.5));
    /// ```
    pub fn amount_saved(&self, base: Money) -> Money {
        if !self.is_enabled {
            return Money::zero();
        }
        match self.amount {
            DiscountAmount::Percentage(rate) => base.apply_rate(rate),
            DiscountAmount::Absolute(amount) => amount,
        }
    }
}

// =============================================================================
// Sequential Application
// =============================================================================

/// One step of a sequential discount run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppliedDiscount {
    pub discount_id: DiscountId,
    pub label: String,
    /// What this rule saved (zero when disabled).
    pub saved: Money,
    /// Running figure after this rule. Can go negative.
    pub remaining: Money,
}

/// Applies `discounts` in list order, each to what the previous ones left.
///
/// Returns one entry per rule, disabled rules included, so a receipt can
/// show every line.
pub fn apply_sequentially(discounts: &[Discount], base: Money) -> Vec<AppliedDiscount> {
    let mut remaining = base;
    discounts
        .iter()
        .map(|discount| {
            let saved = discount.amount_saved(remaining);
            remaining -= saved;
            if !saved.is_zero() {
                trace!(discount = %discount.label, %saved, %remaining, "Discount applied");
            }
            AppliedDiscount {
                discount_id: discount.id,
                label: discount.label.clone(),
                saved,
                remaining,
            }
        })
        .collect()
}

/// Total saved by applying `discounts` sequentially to `base`.
pub fn sequential_savings(discounts: &[Discount], base: Money) -> Money {
    apply_sequentially(discounts, base)
        .iter()
        .map(|step| step.saved)
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
