//! # Tax Engine
//!
//! Tax rules and the charge each one levies on an item.
//!
//! ## Charge Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  charge(tax, item)                                                      │
//! │                                                                         │
//! │  tax enabled?  ──no──► 0                                                │
//! │       │yes                                                              │
//! │  item exempt?  ──yes─► 0                                                │
//! │       │no                                                               │
//! │  scope matches? ─no──► 0     Universal: always                          │
//! │       │yes               Targeted(c): item.category == c (exact)        │
//! │       ▼                                                                 │
//! │  item.price × tax.rate                                                  │
//! │                                                                         │
//! │  Rules never interact: an item's tax is the plain sum of every rule's   │
//! │  charge, so rule order cannot change the result.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;
use ts_rs::TS;

use crate::item::Item;
use crate::money::Money;
use crate::types::{Category, Rate, TaxId};

// =============================================================================
// Tax Scope
// =============================================================================

/// Which items a tax applies to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxScope {
    /// Every item.
    #[default]
    Universal,
    /// Only items whose category label equals this one.
    TargetedAtCategory(Category),
}

impl TaxScope {
    /// Returns true if an item filed under `category` is in scope.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            TaxScope::Universal => true,
            TaxScope::TargetedAtCategory(target) => target == category,
        }
    }
}

// =============================================================================
// Tax
// =============================================================================

/// A tax rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Tax {
    pub id: TaxId,
    pub label: String,
    /// Fraction of the item price charged (`0.05` = 5%).
    pub rate: Rate,
    pub scope: TaxScope,
    pub is_enabled: bool,
}

impl Tax {
    /// Creates an enabled, universal tax.
    pub fn new(label: impl Into<String>, rate: Rate) -> Self {
        Tax {
            id: TaxId::new(),
            label: label.into(),
            rate,
            scope: TaxScope::Universal,
            is_enabled: true,
        }
    }

    /// Restricts the tax to one category.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tally_core::{Item, Money, Rate, Tax};
    ///
    /// let alcohol_tax =
    ///     Tax::new("Alcohol Tax", Rate::from_fraction(dec!(0.10))).targeted("Alcohol");
    /// let beer = Item::new("Beer", "Alcohol", Money::from_cents(500));
    /// let pop = Item::new("Pop", "Drinks", Money::from_cents(200));
    ///
    /// assert_eq!(alcohol_tax.charge_for(&beer).amount(), dec!(0.5));
    /// assert!(alcohol_tax.charge_for(&pop).is_zero());
    /// ```
    pub fn targeted(mut self, category: impl Into<Category>) -> Self {
        self.scope = TaxScope::TargetedAtCategory(category.into());
        self
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

    /// Returns true if this tax charges anything on `item`.
    pub fn applies_to(&self, item: &Item) -> bool {
        self.is_enabled && !item.is_tax_exempt && self.scope.matches(&item.category)
    }

    /// Charge levied on one item; zero when the tax does not apply.
    pub fn charge_for(&self, item: &Item) -> Money {
        if !self.applies_to(item) {
            return Money::zero();
        }
        let charge = item.price.apply_rate(self.rate);
        trace!(tax = %self.label, item = %item.name, %charge, "Tax charged");
        charge
    }
}

// =============================================================================
// Collection Operations
// =============================================================================

/// Sum of every rule's charge on one item.
pub fn charges_for(taxes: &[Tax], item: &Item) -> Money {
    taxes.iter().map(|tax| tax.charge_for(item)).sum()
}

/// Total tax across a list of items.
///
/// Both sums are order-independent: permuting `items` or `taxes` yields the
/// same figure.
pub fn total_tax(items: &[Item], taxes: &[Tax]) -> Money {
    items.iter().map(|item| charges_for(taxes, item)).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
