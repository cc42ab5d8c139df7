//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Lookups that found nothing                     │
//! │  └── ValidationError  - Optional input pre-checks                      │
//! │                                                                         │
//! │  tally-menu errors (separate crate)                                    │
//! │  └── MenuError        - Config file and menu construction failures     │
//! │                                                                         │
//! │  The bill engine itself never fails: every figure is a plain sum or    │
//! │  product. Errors only come from the layers around it.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{DiscountId, ItemId, TaxId};

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the hardened (`try_*`) menu operations.
///
/// The default toggles treat an unknown identity as a silent no-op; these
/// variants exist for callers that want to hear about it.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No item with this identity is on the menu or bill.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// No tax rule with this identity exists.
    #[error("Tax not found: {0}")]
    TaxNotFound(TaxId),

    /// No discount rule with this identity exists.
    #[error("Discount not found: {0}")]
    DiscountNotFound(DiscountId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Produced only by [`crate::validation`], which callers run before handing
/// inputs to the engine if they want to reject odd values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Amount or rate is below zero.
    #[error("{field} must not be negative, got {value}")]
    MustNotBeNegative { field: String, value: Decimal },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
        value: Decimal,
    },

    /// An item filed under a category it does not belong to.
    #[error("Item '{item}' has category '{found}' but is listed under '{expected}'")]
    CategoryMismatch {
        item: String,
        expected: String,
        found: String,
    },

    /// Duplicate value (e.g. two categories with the same label).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
