//! # Validation Module
//!
//! Optional pre-checks for menu data.
//!
//! ## Where Validation Sits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation                                                 │
//! │  └── Basic format checks, immediate feedback                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Menu config loading (tally-menu)                             │
//! │  └── THIS MODULE: rejects negative prices, odd rates, blank labels     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Bill engine                                                  │
//! │  └── NO CHECKS. Whatever arrives is summed and multiplied as-is.       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal_macros::dec;
//! use tally_core::validation::{validate_item, validate_price};
//! use tally_core::{Item, Money};
//!
//! assert!(validate_price(Money::new(dec!(-1))).is_err());
//! assert!(validate_item(&Item::new("Nachos", "Appetizers", Money::new(dec!(13.99)))).is_ok());
//! ```

use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::bill::Bill;
use crate::discount::{Discount, DiscountAmount};
use crate::error::ValidationError;
use crate::item::Item;
use crate::money::Money;
use crate::tax::{Tax, TaxScope};
use crate::types::Rate;
use crate::MAX_LABEL_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_LABEL_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_LABEL_LEN,
        });
    }

    Ok(())
}

/// Validates an item name or rule label.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most [`MAX_LABEL_LEN`] characters
pub fn validate_label(label: &str) -> ValidationResult<()> {
    validate_text("label", label)
}

/// Validates a category label. Same rules as [`validate_label`].
///
/// Surrounding whitespace is not trimmed away when matching; `"Food "` and
/// `"Food"` are different categories to the tax engine.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    validate_text("category", category)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an item price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, e.g. tap water)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
            value: price.amount(),
        });
    }

    Ok(())
}

fn validate_fraction(field: &str, rate: Rate) -> ValidationResult<()> {
    let value = rate.fraction();
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: Decimal::ZERO,
            max: Decimal::ONE,
            value,
        });
    }

    Ok(())
}

/// Validates a single tax rate.
///
/// ## Rules
/// - Between 0 and 1 (0% to 100%) per rule
/// - Several rules may still add up past 100%; that is not checked
pub fn validate_tax_rate(rate: Rate) -> ValidationResult<()> {
    validate_fraction("tax rate", rate)
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates an item's name, category and price.
pub fn validate_item(item: &Item) -> ValidationResult<()> {
    validate_label(&item.name)?;
    validate_category(&item.category)?;
    validate_price(item.price)
}

/// Validates a tax rule's label, rate and target category.
pub fn validate_tax(tax: &Tax) -> ValidationResult<()> {
    validate_label(&tax.label)?;
    validate_tax_rate(tax.rate)?;
    if let TaxScope::TargetedAtCategory(category) = &tax.scope {
        validate_category(category)?;
    }
    Ok(())
}

/// Validates a discount rule.
///
/// ## Rules
/// - Percentage between 0 and 1
/// - Absolute amount non-negative (it may still exceed the bill; that is
///   allowed)
pub fn validate_discount(discount: &Discount) -> ValidationResult<()> {
    validate_label(&discount.label)?;
    match discount.amount {
        DiscountAmount::Percentage(rate) => validate_fraction("discount percentage", rate),
        DiscountAmount::Absolute(amount) => {
            if amount.is_negative() {
                return Err(ValidationError::MustNotBeNegative {
                    field: "discount amount".to_string(),
                    value: amount.amount(),
                });
            }
            Ok(())
        }
    }
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates every item and rule on a bill, stopping at the first problem.
///
/// Also rejects two rules sharing an identity, which would make toggles
/// ambiguous.
pub fn validate_bill(bill: &Bill) -> ValidationResult<()> {
    bill.items.iter().try_for_each(validate_item)?;
    bill.taxes.iter().try_for_each(validate_tax)?;
    bill.discounts.iter().try_for_each(validate_discount)?;

    let mut seen_taxes = HashSet::new();
    if let Some(dup) = bill.taxes.iter().find(|tax| !seen_taxes.insert(tax.id)) {
        return Err(ValidationError::Duplicate {
            field: "tax id".to_string(),
            value: dup.id.to_string(),
        });
    }

    let mut seen_discounts = HashSet::new();
    if let Some(dup) = bill
        .discounts
        .iter()
        .find(|discount| !seen_discounts.insert(discount.id))
    {
        return Err(ValidationError::Duplicate {
            field: "discount id".to_string(),
            value: dup.id.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
