//! # Item
//!
//! A purchasable line entry: a name, a category label, a price and a
//! tax-exempt flag. Items are values; whoever holds one (a menu category, an
//! open order) owns it, and there is no link back to the category.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Category, ItemId};

/// A line item on a menu or a bill.
///
/// Only `is_tax_exempt` changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Unique identifier (UUID v4).
    pub id: ItemId,

    /// Display name shown to the cashier and on the bill.
    pub name: String,

    /// Category label, matched exactly by targeted taxes.
    pub category: Category,

    /// Price, never rounded.
    pub price: Money,

    /// Excludes the item from every tax, universal or targeted.
    pub is_tax_exempt: bool,
}

impl Item {
    /// Creates a taxable item with a fresh identity.
    pub fn new(name: impl Into<String>, category: impl Into<Category>, price: Money) -> Self {
        Item {
            id: ItemId::new(),
            name: name.into(),
            category: category.into(),
            price,
            is_tax_exempt: false,
        }
    }

    /// Builder-style setter for the tax-exempt flag.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::{Item, Money};
    ///
    /// let leg = Item::new("Right Arm", "Body Parts", Money::from_cents(7000)).tax_exempt(true);
    /// assert!(leg.is_tax_exempt);
    /// ```
    pub fn tax_exempt(mut self, exempt: bool) -> Self {
        self.is_tax_exempt = exempt;
        self
    }

    /// Flips the tax-exempt flag and returns the new value.
    pub fn toggle_tax_exempt(&mut self) -> bool {
        self.is_tax_exempt = !self.is_tax_exempt;
        self.is_tax_exempt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_is_taxable() {
        let item = Item::new("Burger", "Mains", Money::from_cents(999));
        assert!(!item.is_tax_exempt);
        assert_eq!(item.category, "Mains");
    }

    #[test]
    fn test_toggle_tax_exempt() {
        let mut item = Item::new("Tylenol", "Drug", Money::from_cents(200));
        assert!(item.toggle_tax_exempt());
        assert!(!item.toggle_tax_exempt());
    }

    #[test]
    fn test_same_fields_different_identity() {
        let a = Item::new("Water", "Drinks", Money::zero());
        let b = Item::new("Water", "Drinks", Money::zero());
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
    }
}
