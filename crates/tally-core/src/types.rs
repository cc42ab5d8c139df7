//! # Shared Types
//!
//! Identifiers and the `Rate` fraction used by taxes and discounts.
//!
//! ## Dual-Key Identity Pattern
//! Every rule and item has:
//! - `id`: UUID v4 - immutable, used for toggles and lookups
//! - A human label (`name` / `label`) - shown to the cashier, may repeat
//!
//! Two taxes with the same label and rate are still different rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

/// Category label an item is filed under (e.g. "Alcohol").
///
/// Compared exactly and case-sensitively when a tax targets a category.
pub type Category = String;

// =============================================================================
// Identifiers
// =============================================================================

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
        #[ts(export)]
        pub struct $name(#[ts(type = "string")] Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(raw)?))
            }
        }
    };
}

define_id!(ItemId, "ITEM");
define_id!(TaxId, "TAX");
define_id!(DiscountId, "DSC");
define_id!(MenuId, "MENU");

// =============================================================================
// Rate
// =============================================================================

/// A rate expressed as a fraction: `0.05` means 5%.
///
/// ## Why a Fraction?
/// Basis points cap precision at 0.01%. A fraction keeps whatever precision
/// the menu was configured with, and multiplying `Money` by it is a single
/// exact decimal multiplication.
///
/// Used for tax rates and percentage discounts alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(#[ts(type = "string")] Decimal);

impl Rate {
    /// Creates a rate from a fraction (`0.08` = 8%).
    #[inline]
    pub const fn from_fraction(fraction: Decimal) -> Self {
        Rate(fraction)
    }

    /// Creates a rate from a percentage (`8.25` = 8.25%).
    #[inline]
    pub fn from_percent(percent: Decimal) -> Self {
        Rate(percent / Decimal::ONE_HUNDRED)
    }

    /// Creates a rate from basis points (`825` = 8.25%).
    #[inline]
    pub fn from_bps(bps: u32) -> Self {
        Rate(Decimal::new(i64::from(bps), 4))
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn fraction(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a percentage (`0.05` → `5`).
    #[inline]
    pub fn percent(&self) -> Decimal {
        (self.0 * Decimal::ONE_HUNDRED).normalize()
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(Decimal::ZERO)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
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
    fn test_rate_constructors_agree() {
        let fraction = Rate::from_fraction(dec!(0.0825));
        assert_eq!(Rate::from_percent(dec!(8.25)), fraction);
        assert_eq!(Rate::from_bps(825), fraction);
        assert_eq!(fraction.percent(), dec!(8.25));
    }

    #[test]
    fn test_rate_display() {
        assert_eq!(Rate::from_fraction(dec!(0.05)).to_string(), "5%");
        assert_eq!(Rate::from_fraction(dec!(0.10)).to_string(), "10%");
    }

    #[test]
    fn test_rate_default_is_zero() {
        assert!(Rate::default().is_zero());
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(TaxId::new(), TaxId::new());
        assert_ne!(ItemId::new(), ItemId::new());
    }

    #[test]
    fn test_id_display_round_trips() {
        let id = DiscountId::new();
        let shown = id.to_string();
        assert!(shown.starts_with("DSC-"));
        assert_eq!(shown.parse::<DiscountId>().unwrap(), id);
        assert_eq!(id.as_uuid().to_string().parse::<DiscountId>().unwrap(), id);
    }
}
