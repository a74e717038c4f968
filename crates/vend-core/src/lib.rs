//! # vend-core: Pure Business Logic for Vinyl Vend
//!
//! This crate is the **heart** of the vending machine. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Vinyl Vend Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation Layer (out of scope)               │   │
//! │  │    Item Grid ──► Coin Slot UI ──► Purchase Button ──► Tray      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 vend-machine (facade crate)                     │   │
//! │  │    select_item, insert_funds, purchase, cancel                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vend-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌─────────────┐  ┌──────────┐  │   │
//! │  │   │  catalog  │  │   money   │  │ transaction │  │  error   │  │   │
//! │  │   │ CatalogItem│ │   Money   │  │ Transaction │  │ VendError│  │   │
//! │  │   │  Catalog  │  │ $ integer │  │ Eligibility │  │          │  │   │
//! │  │   └───────────┘  └───────────┘  └─────────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • PURE FUNCTIONS                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              vend-store (Persistence Layer)                     │   │
//! │  │        Inventory ledger, JSON stock snapshot on disk            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - The immutable item catalog (ids, names, prices)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`transaction`] - The in-progress purchase record and eligibility rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Persistence, logging and rendering live in other crates
//! 3. **Integer Money**: All monetary values are whole currency units (i64)
//! 4. **Explicit Errors**: Expected failures are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod transaction;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vend_core::Money` instead of
// `use vend_core::money::Money`

pub use catalog::{Catalog, CatalogItem};
pub use error::{VendError, VendResult};
pub use money::Money;
pub use transaction::{Eligibility, Transaction};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum funds the machine accepts in a single transaction.
///
/// ## Business Reason
/// The coin slot rejects money once the accumulated amount would pass this
/// limit. The check happens BEFORE mutating the transaction, so a rejected
/// insert leaves the accumulated amount untouched.
pub const DEFAULT_FUNDS_LIMIT: Money = Money::from_units(50);

/// Maximum stock level a single item can hold.
///
/// ## Business Reason
/// The physical machine has finite slots; administrative stock edits are
/// clamped to `[0, MAX_STOCK]` rather than rejected.
pub const MAX_STOCK: i64 = 999;

/// Items with stock below this count show up in the low-stock report.
pub const LOW_STOCK_THRESHOLD: i64 = 3;
