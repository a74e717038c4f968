//! # Transaction
//!
//! The in-progress purchase record: which slot is selected and how much
//! money has been inserted so far.
//!
//! ## State Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Transaction Lifecycle                                │
//! │                                                                         │
//! │          select_item                insert_funds                        │
//! │   Idle ─────────────► Selected ─────────────────► Funded               │
//! │    ▲                                                 │                  │
//! │    │◄──────────────── purchase (stock -1, change) ───┘                  │
//! │    │◄──────────────── cancel   (refund full amount) ─┘                  │
//! │                                                                         │
//! │  "Selected"/"Funded" are DERIVED conditions over the same record,       │
//! │  never stored flags. Funded = inserted_amount >= selected price,        │
//! │  recomputed on every check so it can never go stale.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Funds Carry-Over
//! Re-selecting a different item keeps the inserted amount. This is
//! deliberate (it drives the "insufficient funds" display when switching
//! to a pricier record) and matches the physical-machine behavior of not
//! refunding on selection change.

use serde::{Deserialize, Serialize};

use crate::error::{VendError, VendResult};
use crate::money::Money;

// =============================================================================
// Transaction Record
// =============================================================================

/// A single in-progress purchase.
///
/// ## Invariants
/// - `inserted` never exceeds the configured funds limit
/// - `inserted` is never negative
/// - Expected failures (`insert` rejections) leave the record untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transaction {
    /// Selected slot code, if any. A non-owning reference into the catalog.
    selected: Option<String>,

    /// Accumulated inserted funds.
    inserted: Money,
}

impl Transaction {
    /// Creates an empty (Idle) transaction.
    pub fn new() -> Self {
        Transaction::default()
    }

    /// The currently selected slot code, if any.
    pub fn selected_item_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The accumulated inserted amount.
    pub fn inserted_amount(&self) -> Money {
        self.inserted
    }

    /// True when nothing is selected and no money is inserted.
    pub fn is_idle(&self) -> bool {
        self.selected.is_none() && self.inserted.is_zero()
    }

    /// Records a selection. Funds deliberately carry over (see module docs).
    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    /// Adds funds, enforcing the limit BEFORE mutating.
    ///
    /// ## Behavior
    /// - `amount <= 0` → `InvalidAmount`, record unchanged
    /// - total would pass `limit` → `LimitExceeded`, record unchanged
    /// - otherwise adds and returns the new total
    ///
    /// Reject-then-no-op: there is never an insert-then-rollback.
    pub fn insert(&mut self, amount: i64, limit: Money) -> VendResult<Money> {
        if amount <= 0 {
            return Err(VendError::InvalidAmount { amount });
        }

        // Checked add: an absurdly large amount is still just "over the
        // limit", never an arithmetic panic or a wrapped-negative total.
        let attempted = match self.inserted.units().checked_add(amount) {
            Some(total) if total <= limit.units() => Money::from_units(total),
            _ => {
                return Err(VendError::LimitExceeded {
                    attempted: Money::from_units(self.inserted.units().saturating_add(amount)),
                    max: limit,
                });
            }
        };

        self.inserted = attempted;
        Ok(self.inserted)
    }

    /// True once the accumulated amount has reached the limit.
    ///
    /// Informational, not an error: reaching the limit exactly is fine,
    /// only going past it is rejected.
    pub fn is_limit_reached(&self, limit: Money) -> bool {
        self.inserted >= limit
    }

    /// Change preview: what would come back if the item at `price` were
    /// bought right now. Floored at zero for display.
    pub fn change_preview(&self, price: Money) -> Money {
        self.inserted.saturating_sub(price)
    }

    /// Resets to Idle and returns the amount that was held.
    ///
    /// Used by both the purchase success path (amount already consumed)
    /// and cancel (amount refunded to the user).
    pub fn reset(&mut self) -> Money {
        self.selected = None;
        std::mem::take(&mut self.inserted)
    }
}

// =============================================================================
// Purchase Eligibility
// =============================================================================

/// Why a purchase can or cannot proceed right now.
///
/// Derived fresh on every check from `(selection, live availability,
/// inserted vs price)` - never cached, so it cannot diverge from the
/// record it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// Selection exists, stock is available, funds cover the price.
    Eligible,

    /// No item selected yet.
    NoSelection,

    /// Selected item's live stock is zero.
    OutOfStock,

    /// Funds do not cover the price; `shortfall` is the exact gap.
    InsufficientFunds { shortfall: Money },
}

impl Eligibility {
    /// Computes eligibility from the pure inputs.
    ///
    /// `available` must be the ledger's LIVE answer for the selected item,
    /// not a snapshot taken at selection time - stock can be edited
    /// out-of-band between selection and purchase.
    pub fn check(tx: &Transaction, price: Option<Money>, available: bool) -> Self {
        let Some(price) = price else {
            return Eligibility::NoSelection;
        };

        if tx.selected_item_id().is_none() {
            return Eligibility::NoSelection;
        }

        if !available {
            return Eligibility::OutOfStock;
        }

        if tx.inserted_amount() < price {
            return Eligibility::InsufficientFunds {
                shortfall: price - tx.inserted_amount(),
            };
        }

        Eligibility::Eligible
    }

    /// True when a purchase may proceed.
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    /// Human-readable reason for display.
    pub fn reason(&self) -> String {
        match self {
            Eligibility::Eligible => "Ready to purchase".to_string(),
            Eligibility::NoSelection => "No item selected".to_string(),
            Eligibility::OutOfStock => "Item is sold out".to_string(),
            Eligibility::InsufficientFunds { shortfall } => {
                format!("Insert {shortfall} more")
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
