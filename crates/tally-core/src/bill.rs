//! # Bill Aggregator
//!
//! Composes items, taxes and discounts into the four totals shown on a bill.
//!
//! ## Order of Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. subtotal  = Σ item.price                                            │
//! │  2. tax       = Σ items Σ taxes charge(tax, item)                       │
//! │  3. base      = subtotal + tax        ◄── discounts see the taxed sum   │
//! │  4. saved     = sequential_savings(discounts, base)                     │
//! │  5. total     = subtotal + tax - saved                                  │
//! │  6. discounts = -saved                ◄── reported as a deduction       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Totals` is always recomputed from scratch. Nothing here caches, so a
//! totals value can never be stale relative to the inputs it came from.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::discount::{self, AppliedDiscount, Discount};
use crate::item::Item;
use crate::money::Money;
use crate::tax::{self, Tax};
use crate::types::ItemId;

// =============================================================================
// Totals
// =============================================================================

/// Snapshot of a bill's figures. Compared structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Totals {
    /// Sum of item prices, untouched by taxes and discounts.
    pub subtotal: Money,
    /// Sum of every applicable tax charge.
    pub tax: Money,
    /// Negative of the total saved (zero or below for sane inputs).
    pub discounts: Money,
    /// `subtotal + tax + discounts`.
    pub total: Money,
}

impl Totals {
    /// All four figures zero.
    pub const fn zero() -> Self {
        Totals {
            subtotal: Money::zero(),
            tax: Money::zero(),
            discounts: Money::zero(),
            total: Money::zero(),
        }
    }
}

/// Computes totals for a set of items under the given rules.
///
/// Pure: identical inputs always produce identical totals.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tally_core::{compute_totals, Item, Money, Rate, Tax};
///
/// let arm = Item::new("Left Arm", "Body Parts", Money::new(dec!(40)));
/// let leg = Item::new("Right Arm", "Body Parts", Money::new(dec!(70))).tax_exempt(true);
/// let life_tax = Tax::new("Life Tax", Rate::from_fraction(dec!(0.1)));
///
/// let totals = compute_totals(&[arm, leg], &[life_tax], &[]);
/// assert_eq!(totals.subtotal.amount(), dec!(110));
/// assert_eq!(totals.tax.amount(), dec!(4));
/// assert_eq!(totals.total.amount(), dec!(114));
/// ```
pub fn compute_totals(items: &[Item], taxes: &[Tax], discounts: &[Discount]) -> Totals {
    let subtotal: Money = items.iter().map(|item| item.price).sum();
    let tax = tax::total_tax(items, taxes);
    let saved = discount::sequential_savings(discounts, subtotal + tax);
    let total = subtotal + tax - saved;

    debug!(
        items = items.len(),
        %subtotal,
        %tax,
        %saved,
        %total,
        "Computed bill totals"
    );

    Totals {
        subtotal,
        tax,
        discounts: -saved,
        total,
    }
}

// =============================================================================
// Bill
// =============================================================================

/// An owned bill: the items on an order plus the rules in force.
///
/// ## Usage
/// ```rust
/// use rust_decimal_macros::dec;
/// use tally_core::{Bill, Discount, Item, Money};
///
/// let mut bill = Bill::default();
/// bill.add_item(Item::new("Left Arm", "Body Parts", Money::new(dec!(40))));
/// bill.add_item(Item::new("Right Arm", "Body Parts", Money::new(dec!(70))));
/// bill.discounts.push(Discount::absolute("$10 Off", Money::new(dec!(10))).enabled(true));
///
/// let totals = bill.totals();
/// assert_eq!(totals.discounts.amount(), dec!(-10));
/// assert_eq!(totals.total.amount(), dec!(100));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub items: Vec<Item>,
    pub taxes: Vec<Tax>,
    pub discounts: Vec<Discount>,
}

impl Bill {
    pub fn new(items: Vec<Item>, taxes: Vec<Tax>, discounts: Vec<Discount>) -> Self {
        Bill {
            items,
            taxes,
            discounts,
        }
    }

    /// Recomputes the totals from the current items and rules.
    pub fn totals(&self) -> Totals {
        compute_totals(&self.items, &self.taxes, &self.discounts)
    }

    /// Per-rule discount lines, applied to the post-tax figure the same way
    /// [`Bill::totals`] applies them.
    pub fn discount_breakdown(&self) -> Vec<AppliedDiscount> {
        let subtotal: Money = self.items.iter().map(|item| item.price).sum();
        let tax = tax::total_tax(&self.items, &self.taxes);
        discount::apply_sequentially(&self.discounts, subtotal + tax)
    }

    /// Appends an item to the bill.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Removes the item with `id`, if present.
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Flips the tax-exempt flag of the item with `id` on this bill only.
    ///
    /// Returns false (and changes nothing) if no such item is on the bill.
    pub fn toggle_item_exemption(&mut self, id: ItemId) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.toggle_tax_exempt();
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    const BODY: &str = "Body Parts";

    fn money(amount: Decimal) -> Money {
        Money::new(amount)
    }

    fn arm() -> Item {
        Item::new("Left Arm", BODY, money(dec!(40)))
    }

    fn leg() -> Item {
        Item::new("Right Arm", BODY, money(dec!(70)))
    }

    fn life_tax() -> Tax {
        Tax::new("Life Tax", Rate::from_fraction(dec!(0.1)))
    }

    fn ten_percent_off() -> Discount {
        Discount::percentage("10% Off", Rate::from_fraction(dec!(0.1))).enabled(true)
    }

    fn assert_totals(
        totals: Totals,
        subtotal: Decimal,
        tax: Decimal,
        discounts: Decimal,
        total: Decimal,
    ) {
        assert_eq!(totals.subtotal.amount(), subtotal, "subtotal");
        assert_eq!(totals.tax.amount(), tax, "tax");
        assert_eq!(totals.discounts.amount(), discounts, "discounts");
        assert_eq!(totals.total.amount(), total, "total");
    }

    #[test]
    fn test_empty_bill() {
        assert_eq!(Bill::default().totals(), Totals::zero());
    }

    #[test]
    fn test_empty_bill_with_taxes() {
        let bill = Bill::new(vec![], vec![life_tax()], vec![]);
        assert_eq!(bill.totals(), Totals::zero());
    }

    #[test]
    fn test_empty_bill_with_discounts() {
        // Only an enabled absolute discount could move the figures; this one is off
        let discount = Discount::absolute("$100 Off", money(dec!(100)));
        let bill = Bill::new(vec![], vec![], vec![discount]);
        assert_eq!(bill.totals(), Totals::zero());
    }

    #[test]
    fn test_item_order_doesnt_matter() {
        let (arm, leg) = (arm(), leg());
        let arm_and_leg = Bill::new(vec![arm.clone(), leg.clone()], vec![], vec![]);
        let leg_and_arm = Bill::new(vec![leg, arm], vec![], vec![]);

        assert_totals(arm_and_leg.totals(), dec!(110), dec!(0), dec!(0), dec!(110));
        assert_eq!(arm_and_leg.totals(), leg_and_arm.totals());
    }

    #[test]
    fn test_single_tax_applies_universally() {
        let bill = Bill::new(vec![arm(), leg()], vec![life_tax()], vec![]);
        assert_totals(bill.totals(), dec!(110), dec!(11), dec!(0), dec!(121));
    }

    #[test]
    fn test_disabling_tax() {
        let liberty_tax = Tax::new("Liberty Tax", Rate::from_fraction(dec!(0.5))).enabled(false);
        let bill = Bill::new(
            vec![arm(), leg().tax_exempt(true)],
            vec![life_tax(), liberty_tax],
            vec![],
        );
        assert_totals(bill.totals(), dec!(110), dec!(4), dec!(0), dec!(114));
    }

    #[test]
    fn test_disabling_discount() {
        let good = Discount::absolute("$5 Off", money(dec!(5))).enabled(true);
        let great = Discount::absolute("$20 Off", money(dec!(20)));
        let bill = Bill::new(vec![arm(), leg().tax_exempt(true)], vec![], vec![good, great]);
        assert_totals(bill.totals(), dec!(110), dec!(0), dec!(-5), dec!(105));
    }

    #[test]
    fn test_tax_exemption() {
        let bill = Bill::new(vec![arm(), leg().tax_exempt(true)], vec![life_tax()], vec![]);
        assert_totals(bill.totals(), dec!(110), dec!(4), dec!(0), dec!(114));
    }

    #[test]
    fn test_tax_category() {
        let body_tax = Tax::new("Body Tax", Rate::from_fraction(dec!(0.4))).targeted(BODY);
        let hat = Item::new("Hat", "Clothing", money(dec!(20)));
        let bill = Bill::new(
            vec![arm(), leg().tax_exempt(true), hat],
            vec![life_tax(), body_tax],
            vec![],
        );
        // arm: 4 + 16, leg: exempt, hat: 2
        assert_totals(bill.totals(), dec!(130), dec!(22), dec!(0), dec!(152));
    }

    #[test]
    fn test_absolute_discount() {
        let discount = Discount::absolute("$10 Off", money(dec!(10))).enabled(true);
        let bill = Bill::new(vec![arm(), leg()], vec![], vec![discount]);
        assert_totals(bill.totals(), dec!(110), dec!(0), dec!(-10), dec!(100));
    }

    #[test]
    fn test_percentage_discount() {
        let bill = Bill::new(vec![arm(), leg().tax_exempt(true)], vec![], vec![ten_percent_off()]);
        assert_totals(bill.totals(), dec!(110), dec!(0), dec!(-11), dec!(99));
    }

    #[test]
    fn test_discount_order_matters() {
        let absolute = Discount::absolute("$10 Off", money(dec!(10))).enabled(true);
        let percentage = ten_percent_off();
        let items = vec![arm(), leg().tax_exempt(true)];

        let ab_per = Bill::new(items.clone(), vec![], vec![absolute.clone(), percentage.clone()]);
        let per_ab = Bill::new(items, vec![], vec![percentage, absolute]);

        assert_totals(ab_per.totals(), dec!(110), dec!(0), dec!(-20), dec!(90));
        assert_totals(per_ab.totals(), dec!(110), dec!(0), dec!(-21), dec!(89));
    }

    #[test]
    fn test_discounts_apply_to_taxed_figure() {
        let bill = Bill::new(vec![arm(), leg()], vec![life_tax()], vec![ten_percent_off()]);
        // base = 110 + 11 = 121, saved = 12.1
        assert_totals(bill.totals(), dec!(110), dec!(11), dec!(-12.1), dec!(108.9));
    }

    #[test]
    fn test_huge_amounts_saturate_instead_of_panicking() {
        let item = Item::new("Yacht", BODY, money(Decimal::MAX));
        let double_tax = Tax::new("Double Tax", Rate::from_fraction(dec!(2)));

        let totals = compute_totals(&[item.clone(), item], &[double_tax], &[ten_percent_off()]);
        assert_eq!(totals.subtotal, money(Decimal::MAX));
        assert_eq!(totals.tax, money(Decimal::MAX));
        assert!(totals.total.is_positive());
        assert!(totals.total <= money(Decimal::MAX));
    }

    #[test]
    fn test_totals_are_recomputed_not_cached() {
        let mut bill = Bill::new(vec![arm(), leg()], vec![life_tax()], vec![]);
        let before = bill.totals();
        assert_eq!(bill.totals(), before);

        bill.taxes[0].toggle();
        assert_totals(bill.totals(), dec!(110), dec!(0), dec!(0), dec!(110));

        bill.taxes[0].toggle();
        assert_eq!(bill.totals(), before);
    }

    #[test]
    fn test_discount_breakdown_matches_totals() {
        let rules = vec![
            Discount::absolute("$10 Off", money(dec!(10))).enabled(true),
            Discount::percentage("20% Off", Rate::from_fraction(dec!(0.2))),
            Discount::percentage("10% Off", Rate::from_fraction(dec!(0.1))).enabled(true),
        ];
        let bill = Bill::new(vec![arm(), leg()], vec![life_tax()], rules);
        let steps = bill.discount_breakdown();
        let saved: Money = steps.iter().map(|s| s.saved).sum();

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].remaining.amount(), dec!(111));
        assert_eq!(steps[2].saved.amount(), dec!(11.1));
        assert_eq!(-saved, bill.totals().discounts);
    }

    #[test]
    fn test_remove_and_toggle_items() {
        let (arm, leg) = (arm(), leg());
        let mut bill = Bill::new(vec![arm.clone(), leg.clone()], vec![life_tax()], vec![]);

        assert!(bill.toggle_item_exemption(leg.id));
        assert_totals(bill.totals(), dec!(110), dec!(4), dec!(0), dec!(114));

        assert_eq!(bill.remove_item(arm.id).map(|item| item.id), Some(arm.id));
        assert_eq!(bill.remove_item(arm.id), None);
        assert!(!bill.toggle_item_exemption(arm.id));
        assert_totals(bill.totals(), dec!(70), dec!(0), dec!(0), dec!(70));
    }

    #[test]
    fn test_totals_serialize_for_frontend() {
        let bill = Bill::new(vec![arm()], vec![life_tax()], vec![]);
        let json = serde_json::to_value(bill.totals()).unwrap();
        assert_eq!(json["subtotal"], "40");
        assert_eq!(json["tax"], "4.0");
        assert_eq!(json["total"], "44.0");
    }
}
