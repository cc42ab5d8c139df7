//! Property tests for the bill engine.
//!
//! Covers the ordering guarantees: item and tax order never matter, discount
//! order does, and disabled or exempt inputs contribute nothing.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally_core::discount::sequential_savings;
use tally_core::tax::total_tax;
use tally_core::{compute_totals, Discount, Item, Money, Rate, Tax, Totals};

const CATEGORIES: &[&str] = &["Appetizers", "Mains", "Drinks", "Alcohol"];

fn item_strategy() -> impl Strategy<Value = Item> {
    (0i64..100_000, 0usize..CATEGORIES.len(), any::<bool>()).prop_map(|(cents, cat, exempt)| {
        Item::new("Item", CATEGORIES[cat], Money::from_cents(cents)).tax_exempt(exempt)
    })
}

fn tax_strategy() -> impl Strategy<Value = Tax> {
    (0u32..2_500, prop::option::of(0usize..CATEGORIES.len()), any::<bool>()).prop_map(
        |(bps, target, enabled)| {
            let tax = Tax::new("Tax", Rate::from_bps(bps)).enabled(enabled);
            match target {
                Some(cat) => tax.targeted(CATEGORIES[cat]),
                None => tax,
            }
        },
    )
}

fn discount_strategy() -> impl Strategy<Value = Discount> {
    (0u32..5_000, 0i64..5_000, any::<bool>(), any::<bool>()).prop_map(
        |(bps, cents, is_percentage, enabled)| {
            let discount = if is_percentage {
                Discount::percentage("Pct", Rate::from_bps(bps))
            } else {
                Discount::absolute("Flat", Money::from_cents(cents))
            };
            discount.enabled(enabled)
        },
    )
}

fn items_and_shuffled() -> impl Strategy<Value = (Vec<Item>, Vec<Item>)> {
    prop::collection::vec(item_strategy(), 0..12)
        .prop_flat_map(|items| (Just(items.clone()), Just(items).prop_shuffle()))
}

fn taxes_and_shuffled() -> impl Strategy<Value = (Vec<Tax>, Vec<Tax>)> {
    prop::collection::vec(tax_strategy(), 0..8)
        .prop_flat_map(|taxes| (Just(taxes.clone()), Just(taxes).prop_shuffle()))
}

proptest! {
    #[test]
    fn item_order_never_changes_subtotal_or_tax(
        (items, shuffled) in items_and_shuffled(),
        taxes in prop::collection::vec(tax_strategy(), 0..6),
        discounts in prop::collection::vec(discount_strategy(), 0..4),
    ) {
        let a = compute_totals(&items, &taxes, &discounts);
        let b = compute_totals(&shuffled, &taxes, &discounts);
        prop_assert_eq!(a.subtotal, b.subtotal);
        prop_assert_eq!(a.tax, b.tax);
        // Same subtotal and tax means the same discount base, so everything matches
        prop_assert_eq!(a, b);
    }

    #[test]
    fn tax_order_never_changes_tax_total(
        items in prop::collection::vec(item_strategy(), 0..10),
        (taxes, shuffled) in taxes_and_shuffled(),
    ) {
        prop_assert_eq!(total_tax(&items, &taxes), total_tax(&items, &shuffled));
    }

    #[test]
    fn tax_is_never_negative_for_non_negative_inputs(
        items in prop::collection::vec(item_strategy(), 0..10),
        taxes in prop::collection::vec(tax_strategy(), 0..6),
    ) {
        prop_assert!(!total_tax(&items, &taxes).is_negative());
    }

    #[test]
    fn subtotal_ignores_rules(
        items in prop::collection::vec(item_strategy(), 0..10),
        taxes in prop::collection::vec(tax_strategy(), 0..6),
        discounts in prop::collection::vec(discount_strategy(), 0..4),
    ) {
        let bare = compute_totals(&items, &[], &[]);
        let ruled = compute_totals(&items, &taxes, &discounts);
        prop_assert_eq!(bare.subtotal, ruled.subtotal);
    }

    #[test]
    fn total_is_signed_sum_of_parts(
        items in prop::collection::vec(item_strategy(), 0..10),
        taxes in prop::collection::vec(tax_strategy(), 0..6),
        discounts in prop::collection::vec(discount_strategy(), 0..4),
    ) {
        let t = compute_totals(&items, &taxes, &discounts);
        prop_assert_eq!(t.total, t.subtotal + t.tax + t.discounts);
    }

    #[test]
    fn exempt_items_contribute_no_tax(
        items in prop::collection::vec(item_strategy(), 1..10),
        taxes in prop::collection::vec(tax_strategy(), 0..6),
    ) {
        let exempt: Vec<Item> = items.into_iter().map(|item| item.tax_exempt(true)).collect();
        prop_assert!(total_tax(&exempt, &taxes).is_zero());
    }

    #[test]
    fn disabled_rules_contribute_nothing(
        items in prop::collection::vec(item_strategy(), 0..10),
        taxes in prop::collection::vec(tax_strategy(), 0..6),
        discounts in prop::collection::vec(discount_strategy(), 0..4),
    ) {
        let taxes: Vec<Tax> = taxes.into_iter().map(|t| t.enabled(false)).collect();
        let discounts: Vec<Discount> = discounts.into_iter().map(|d| d.enabled(false)).collect();
        let t = compute_totals(&items, &taxes, &discounts);
        prop_assert!(t.tax.is_zero());
        prop_assert!(t.discounts.is_zero());
        prop_assert_eq!(t.total, t.subtotal);
    }

    #[test]
    fn computing_twice_gives_identical_totals(
        items in prop::collection::vec(item_strategy(), 0..10),
        taxes in prop::collection::vec(tax_strategy(), 0..6),
        discounts in prop::collection::vec(discount_strategy(), 0..4),
    ) {
        prop_assert_eq!(
            compute_totals(&items, &taxes, &discounts),
            compute_totals(&items, &taxes, &discounts)
        );
    }

    #[test]
    fn swapping_flat_and_percentage_changes_savings(
        base_cents in 1i64..1_000_000,
        flat_cents in 1i64..10_000,
        bps in 1u32..10_000,
    ) {
        let base = Money::from_cents(base_cents);
        let flat = Discount::absolute("Flat", Money::from_cents(flat_cents)).enabled(true);
        let pct = Discount::percentage("Pct", Rate::from_bps(bps)).enabled(true);

        let flat_first = sequential_savings(&[flat.clone(), pct.clone()], base);
        let pct_first = sequential_savings(&[pct, flat], base);
        // Percentage after a flat discount sees a smaller base
        prop_assert!(flat_first < pct_first);
    }
}

#[test]
fn documented_order_example() {
    let base = Money::new(dec!(50));
    let five_off = Discount::absolute("$5 Off", Money::new(dec!(5))).enabled(true);
    let five_pct = Discount::percentage("5% Off", Rate::from_fraction(dec!(0.05))).enabled(true);

    let forward = sequential_savings(&[five_off.clone(), five_pct.clone()], base);
    let reversed = sequential_savings(&[five_pct, five_off], base);

    assert_eq!(forward.amount(), dec!(7.25));
    assert_eq!(reversed.amount(), dec!(7.5));
    assert_ne!(forward, reversed);
}

#[test]
fn empty_inputs_give_zero_totals() {
    assert_eq!(compute_totals(&[], &[], &[]), Totals::zero());
}

#[test]
fn category_targeting_end_to_end() {
    let body = "Body Parts";
    let items = vec![
        Item::new("Left Arm", body, Money::new(dec!(40))),
        Item::new("Right Arm", body, Money::new(dec!(70))).tax_exempt(true),
        Item::new("Hat", "Clothing", Money::new(dec!(20))),
    ];
    let taxes = vec![
        Tax::new("Body Tax", Rate::from_fraction(dec!(0.4))).targeted(body),
        Tax::new("Life Tax", Rate::from_fraction(dec!(0.1))),
    ];

    let totals = compute_totals(&items, &taxes, &[]);

    assert_eq!(totals.subtotal.amount(), dec!(130));
    assert_eq!(totals.tax.amount(), dec!(22));
    assert_eq!(totals.discounts.amount(), Decimal::ZERO);
    assert_eq!(totals.total.amount(), dec!(152));
}
