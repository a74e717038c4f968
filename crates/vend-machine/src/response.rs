//! # Response Records
//!
//! What the presentation layer actually receives: every operation's
//! outcome flattened into a `{ success, message, code?, payload? }`
//! record, ready to serialize over whatever boundary the UI sits behind.
//!
//! ## Serialization
//! ```json
//! { "success": true,  "message": "Abbey Road selected", "payload": { ... } }
//! { "success": false, "message": "Item A2 is sold out", "code": "OUT_OF_STOCK" }
//! ```
//!
//! Expected business-rule failures travel as unsuccessful records, never
//! as thrown errors; only programmer errors panic.

use serde::Serialize;

use vend_core::{VendError, VendResult};

use crate::machine::{InsertReceipt, ItemView, PurchaseReceipt, Refund};

// =============================================================================
// Error Codes
// =============================================================================

/// Machine-readable code for a rejected operation.
///
/// The UI switches on the code; the message is for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Item id is not in the catalog.
    NotFound,

    /// Item has no stock (at selection or purchase time).
    OutOfStock,

    /// Inserted amount was zero or negative.
    InvalidAmount,

    /// Insert would pass the funds limit.
    LimitExceeded,

    /// Purchase attempted with no selection.
    NoSelection,

    /// Funds do not cover the price.
    InsufficientFunds,

    /// Anything that should not happen at runtime (construction-time
    /// validation surfacing late).
    Internal,
}

impl From<&VendError> for ErrorCode {
    fn from(err: &VendError) -> Self {
        match err {
            VendError::ItemNotFound(_) => ErrorCode::NotFound,
            VendError::OutOfStock(_) => ErrorCode::OutOfStock,
            VendError::InvalidAmount { .. } => ErrorCode::InvalidAmount,
            VendError::LimitExceeded { .. } => ErrorCode::LimitExceeded,
            VendError::NoSelection => ErrorCode::NoSelection,
            VendError::InsufficientFunds { .. } => ErrorCode::InsufficientFunds,
            VendError::DuplicateItem(_) => ErrorCode::Internal,
        }
    }
}

// =============================================================================
// Reply Record
// =============================================================================

/// A flattened operation outcome for the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply<T: Serialize> {
    /// Whether the operation went through.
    pub success: bool,

    /// Human-readable line for the machine's display panel.
    pub message: String,

    /// Present only on failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,

    /// Present only on successes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl<T: Serialize> Reply<T> {
    /// A successful record with a display message and payload.
    pub fn ok(message: impl Into<String>, payload: T) -> Self {
        Reply {
            success: true,
            message: message.into(),
            code: None,
            payload: Some(payload),
        }
    }

    /// A rejected record carrying the error's code and message.
    pub fn rejected(err: &VendError) -> Self {
        Reply {
            success: false,
            message: err.to_string(),
            code: Some(ErrorCode::from(err)),
            payload: None,
        }
    }
}

impl<T: Serialize + DisplayLine> Reply<T> {
    /// Flattens an operation result into a record, using the payload's
    /// own display line on success.
    pub fn from_result(result: VendResult<T>) -> Self {
        match result {
            Ok(payload) => {
                let message = payload.display_line();
                Reply::ok(message, payload)
            }
            Err(err) => Reply::rejected(&err),
        }
    }
}

// =============================================================================
// Display Lines
// =============================================================================

/// What each payload says on the machine's display panel.
pub trait DisplayLine {
    fn display_line(&self) -> String;
}

impl DisplayLine for ItemView {
    fn display_line(&self) -> String {
        format!("{} selected", self.name)
    }
}

impl DisplayLine for InsertReceipt {
    fn display_line(&self) -> String {
        if self.limit_reached {
            format!("{} inserted ({} total, limit reached)", self.accepted, self.total)
        } else {
            format!("{} inserted ({} total)", self.accepted, self.total)
        }
    }
}

impl DisplayLine for PurchaseReceipt {
    fn display_line(&self) -> String {
        format!("Enjoy {}! Change: {}", self.item.name, self.change)
    }
}

impl DisplayLine for Refund {
    fn display_line(&self) -> String {
        if self.amount.is_zero() {
            "Transaction cancelled".to_string()
        } else {
            format!("Returned {}", self.amount)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
