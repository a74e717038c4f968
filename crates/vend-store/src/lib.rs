//! # vend-store: Inventory Ledger + Persistence
//!
//! This crate owns the mutable per-item stock counts and their durable
//! persistence. Everything else reads stock through the [`InventoryLedger`]
//! and requests decrements via its API; nothing mutates stock directly.
//!
//! ## Persistence Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Persistence Flow                                    │
//! │                                                                         │
//! │   startup:  read_all() ──► Some(snapshot) ──► merge into ledger        │
//! │                        └─► None/corrupt ────► keep defaults,           │
//! │                                               write_all(defaults)      │
//! │                                                                         │
//! │   mutation: decrement / set_stock / reset                              │
//! │                │                                                        │
//! │                ▼                                                        │
//! │          in-memory stock map updated  (authoritative)                  │
//! │                │                                                        │
//! │                ▼                                                        │
//! │          write_all(snapshot)  - best effort; failure is logged         │
//! │                                 and NEVER rolls back the mutation      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The on-disk footprint is a single JSON object mapping slot code to
//! stock count, stored at `<dir>/<namespace>-stock.json`.

pub mod error;
pub mod ledger;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use ledger::{InventoryLedger, StockLine, StockSummary};
pub use store::{JsonFileStore, MemoryStore, StockSnapshot, StockStore, StoreConfig};
