//! # tally-core: Pure Bill Calculation for Tally POS
//!
//! This crate is the **heart** of Tally POS. Given the items on an order, the
//! tax rules and the discount rules, it computes subtotal, tax, discounts and
//! total, with exact decimal arithmetic and zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Presentation (outside this workspace)             │   │
//! │  │    Menu list ──► Order list ──► Tax/Discount pickers ──► Totals │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ in-process calls                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-menu                                   │   │
//! │  │    Menu, toggles, observers, Register, menu.toml                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌──────────┐  ┌─────────┐          │   │
//! │  │   │  money  │  │   tax   │  │ discount │  │  bill   │          │   │
//! │  │   │  Money  │  │   Tax   │  │ Discount │  │ Totals  │          │   │
//! │  │   │  Rate   │  │  Scope  │  │ stacking │  │  Bill   │          │   │
//! │  │   └─────────┘  └─────────┘  └──────────┘  └─────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Exact decimal `Money`
//! - [`types`] - Identifiers, `Rate`, `Category`
//! - [`item`] - Line items
//! - [`tax`] - Tax rules and the tax engine
//! - [`discount`] - Discount rules and sequential stacking
//! - [`bill`] - The aggregator and `Totals`
//! - [`validation`] - Optional input pre-checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same items and rules in, same totals out
//! 2. **No I/O**: configuration files and notification live in tally-menu
//! 3. **Decimal Money**: no floats anywhere in the arithmetic
//! 4. **No Validation in the Engine**: odd inputs propagate; checks are opt-in
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use tally_core::{compute_totals, Discount, Item, Money, Rate, Tax};
//!
//! let arm = Item::new("Left Arm", "Body Parts", Money::new(dec!(40)));
//! let leg = Item::new("Right Arm", "Body Parts", Money::new(dec!(70)));
//! let body_tax = Tax::new("Body Tax", Rate::from_fraction(dec!(0.1))).targeted("Body Parts");
//! let ten_off = Discount::absolute("$10 Off", Money::new(dec!(10))).enabled(true);
//!
//! let totals = compute_totals(&[arm, leg], &[body_tax], &[ten_off]);
//!
//! assert_eq!(totals.subtotal.amount(), dec!(110));
//! assert_eq!(totals.tax.amount(), dec!(11));
//! assert_eq!(totals.discounts.amount(), dec!(-10));
//! assert_eq!(totals.total.amount(), dec!(111));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod discount;
pub mod error;
pub mod item;
pub mod money;
pub mod tax;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tally_core::Money` instead of
// `use tally_core::money::Money`

pub use bill::{compute_totals, Bill, Totals};
pub use discount::{AppliedDiscount, Discount, DiscountAmount};
pub use error::{CoreError, CoreResult, ValidationError};
pub use item::Item;
pub use money::Money;
pub use tax::{Tax, TaxScope};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of an item name, category or rule label.
///
/// ## Business Reason
/// Labels are shown in narrow list rows and on receipts.
pub const MAX_LABEL_LEN: usize = 100;
