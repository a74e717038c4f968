//! # Error Types
//!
//! Domain-specific error types for vend-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vend-core errors (this file)                                          │
//! │  └── VendError       - Validation + business-rule rejections           │
//! │                                                                         │
//! │  vend-store errors (separate crate)                                    │
//! │  └── StoreError      - Persistence failures (logged, never fatal)      │
//! │                                                                         │
//! │  vend-machine responses (facade crate)                                 │
//! │  └── Reply           - What the presentation layer sees (serialized)   │
//! │                                                                         │
//! │  Flow: VendError → Reply { success: false, code, message } → UI        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, amounts, shortfall)
//! 3. Errors are enum variants, never String
//! 4. Expected failures never mutate state; the transaction is left untouched

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Vend Error
// =============================================================================

/// Business logic errors for the vending machine core.
///
/// Validation errors (`ItemNotFound`, `InvalidAmount`) mean the caller
/// supplied bad input. The rest are business-rule rejections: expected,
/// frequent, and always recoverable by the user.
#[derive(Debug, Clone, Error)]
pub enum VendError {
    /// Item id is not in the catalog.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Item exists but its stock is zero.
    ///
    /// ## When This Occurs
    /// - Selecting a sold-out item
    /// - Purchasing after stock was edited to zero out-of-band
    /// - The ledger decrement racing to zero at purchase time
    #[error("Item {0} is sold out")]
    OutOfStock(String),

    /// Inserted amount is zero or negative.
    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: i64 },

    /// Accepting the insert would push the accumulated funds past the limit.
    ///
    /// The transaction is unmodified on this failure; there is no partial
    /// insertion and no rollback.
    #[error("Cannot exceed the {max} limit (insert would total {attempted})")]
    LimitExceeded { attempted: Money, max: Money },

    /// Purchase attempted with no item selected.
    #[error("No item selected")]
    NoSelection,

    /// Accumulated funds do not cover the selected item's price.
    #[error("Insufficient funds: {shortfall} more needed")]
    InsufficientFunds { shortfall: Money },

    /// Two catalog items share an id (construction-time validation).
    #[error("Duplicate catalog id: {0}")]
    DuplicateItem(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with VendError.
pub type VendResult<T> = Result<T, VendError>;

// =============================================================================
// Unit Tests
// =============================================================================
