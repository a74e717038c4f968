//! # vend-machine: The Vending Machine Facade
//!
//! This crate is what the presentation layer calls. It wires vend-core's
//! pure transaction rules to vend-store's inventory ledger and exposes the
//! four user operations plus the ledger's administrative surface.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Machine Operations                                   │
//! │                                                                         │
//! │  User Action             Machine Call             Effect                │
//! │  ───────────             ────────────             ──────                │
//! │                                                                         │
//! │  Tap item card ────────► select_item() ─────────► selection set        │
//! │                                                    (funds carry over)   │
//! │  Insert coin ──────────► insert_funds() ────────► amount accumulated   │
//! │                                                    (limit-checked)      │
//! │  Press BUY ────────────► purchase() ────────────► ledger -1, change,   │
//! │                                                    transaction reset    │
//! │  Press CANCEL ─────────► cancel() ──────────────► full refund, reset   │
//! │                                                                         │
//! │  Expected failures come back as typed errors; the [`response`] module  │
//! │  turns either outcome into a { success, message, payload } record.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use vend_core::catalog::default_catalog;
//! use vend_machine::{MachineConfig, VendingMachine};
//! use vend_store::{InventoryLedger, MemoryStore};
//!
//! let ledger = InventoryLedger::open(
//!     Arc::new(default_catalog()),
//!     Box::new(MemoryStore::new()),
//! );
//! let mut machine = VendingMachine::new(ledger, MachineConfig::default());
//!
//! machine.insert_funds(20).unwrap();
//! machine.insert_funds(20).unwrap();
//! machine.select_item("A1").unwrap();
//!
//! let receipt = machine.purchase().unwrap();
//! assert_eq!(receipt.change.units(), 8); // $40 - $32
//! ```

pub mod machine;
pub mod response;

pub use machine::{
    InsertReceipt, ItemView, MachineConfig, PurchaseReceipt, Refund, VendingMachine,
};
pub use response::{ErrorCode, Reply};
