//! # Inventory Ledger
//!
//! The single source of truth for per-item stock, with durable
//! persistence behind the [`StockStore`] provider.
//!
//! ## Ownership Rules
//! - Only the ledger mutates stock. The transaction machine requests
//!   decrements through the API and never touches counts directly.
//! - Every successful mutation persists the full snapshot synchronously
//!   before returning, so a crash right after a purchase never loses it.
//! - A persistence failure is logged and swallowed: the in-memory state
//!   stays authoritative for the running session and the mutation is
//!   NOT rolled back.

use std::sync::Arc;
use tracing::{debug, info, warn};

use vend_core::{Catalog, VendError, VendResult, LOW_STOCK_THRESHOLD, MAX_STOCK};

use crate::store::{StockSnapshot, StockStore};

// =============================================================================
// Inventory Ledger
// =============================================================================

/// Owns the live stock counts for every catalog item.
pub struct InventoryLedger {
    catalog: Arc<Catalog>,
    stock: StockSnapshot,
    store: Box<dyn StockStore>,
}

impl InventoryLedger {
    /// Opens the ledger: seeds stock from catalog defaults, then overlays
    /// whatever the store has persisted.
    ///
    /// ## Startup Behavior
    /// - Persisted snapshot present: known ids overlay their defaults
    ///   (clamped to `[0, MAX_STOCK]`); unknown ids are ignored; ids
    ///   missing from the snapshot keep their defaults.
    /// - Nothing persisted: the default snapshot is written out, so the
    ///   file exists from the first session on.
    /// - Malformed or unreadable snapshot: logged, defaults kept, store
    ///   reseeded with them.
    pub fn open(catalog: Arc<Catalog>, store: Box<dyn StockStore>) -> Self {
        let stock = catalog
            .items()
            .iter()
            .map(|item| (item.id.clone(), item.default_stock))
            .collect();

        let mut ledger = InventoryLedger {
            catalog,
            stock,
            store,
        };
        ledger.load_from_persistence();
        ledger
    }

    /// The catalog this ledger tracks stock for.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    fn load_from_persistence(&mut self) {
        match self.store.read_all() {
            Ok(Some(snapshot)) => {
                let mut applied = 0usize;
                for (id, count) in snapshot {
                    if self.stock.contains_key(&id) {
                        self.stock.insert(id, count.clamp(0, MAX_STOCK));
                        applied += 1;
                    }
                }
                debug!(applied, "stock snapshot loaded");
            }
            Ok(None) => {
                info!("no persisted stock, seeding defaults");
                self.persist();
            }
            Err(err) => {
                warn!(error = %err, "failed to load stock snapshot, keeping defaults");
                self.persist();
            }
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current stock for an item. Unknown ids are a caller error.
    pub fn get_stock(&self, id: &str) -> VendResult<i64> {
        self.stock
            .get(id)
            .copied()
            .ok_or_else(|| VendError::ItemNotFound(id.to_string()))
    }

    /// True iff the item exists and has stock. Unknown ids read as
    /// unavailable, not as an error.
    pub fn is_available(&self, id: &str) -> bool {
        self.stock.get(id).is_some_and(|&count| count > 0)
    }

    /// A full copy of the current stock mapping.
    pub fn snapshot(&self) -> StockSnapshot {
        self.stock.clone()
    }

    // =========================================================================
    // Mutations (every success persists before returning)
    // =========================================================================

    /// Reduces stock by one if any is left; reports whether it happened.
    ///
    /// No-op returning `false` when stock is already zero or the id is
    /// unknown - the purchase path turns that into `OutOfStock` without
    /// forfeiting the buyer's funds.
    pub fn decrement(&mut self, id: &str) -> bool {
        match self.stock.get_mut(id) {
            Some(count) if *count > 0 => {
                *count -= 1;
                debug!(item = id, stock = *count, "stock decremented");
                self.persist();
                true
            }
            _ => false,
        }
    }

    /// Overwrites an item's stock, clamped to `[0, MAX_STOCK]`.
    ///
    /// Returns the clamped value actually stored. Administrative edits go
    /// through here; the transaction machine never calls it.
    pub fn set_stock(&mut self, id: &str, value: i64) -> VendResult<i64> {
        if !self.stock.contains_key(id) {
            return Err(VendError::ItemNotFound(id.to_string()));
        }

        let clamped = value.clamp(0, MAX_STOCK);
        self.stock.insert(id.to_string(), clamped);
        debug!(item = id, stock = clamped, "stock set");
        self.persist();
        Ok(clamped)
    }

    /// Restores every item to its catalog default and persists.
    pub fn reset_to_defaults(&mut self) {
        for item in self.catalog.items() {
            self.stock.insert(item.id.clone(), item.default_stock);
        }
        info!("stock reset to defaults");
        self.persist();
    }

    /// Writes the current snapshot to the store.
    ///
    /// Best effort by policy: a failure is logged and the in-memory state
    /// remains authoritative for the running session.
    pub fn persist(&self) {
        if let Err(err) = self.store.write_all(&self.stock) {
            warn!(error = %err, "failed to persist stock snapshot");
        }
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Admin/debug view over the whole inventory.
    pub fn summary(&self) -> StockSummary {
        let items: Vec<StockLine> = self
            .catalog
            .items()
            .iter()
            .map(|item| StockLine {
                id: item.id.clone(),
                name: item.name.clone(),
                stock: *self.stock.get(&item.id).unwrap_or(&0),
            })
            .collect();

        StockSummary {
            total_units: items.iter().map(|line| line.stock).sum(),
            low_stock_count: items
                .iter()
                .filter(|line| line.stock < LOW_STOCK_THRESHOLD)
                .count(),
            out_of_stock_count: items.iter().filter(|line| line.stock == 0).count(),
            items,
        }
    }
}

impl std::fmt::Debug for InventoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryLedger")
            .field("items", &self.stock.len())
            .field("stock", &self.stock)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Stock Summary
// =============================================================================

/// One catalog item's live stock, for reporting.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLine {
    pub id: String,
    pub name: String,
    pub stock: i64,
}

/// Inventory totals for the admin panel and logs.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    /// Sum of all stock counts.
    pub total_units: i64,

    /// Items with stock below the low-stock threshold.
    pub low_stock_count: usize,

    /// Items with zero stock.
    pub out_of_stock_count: usize,

    /// Per-item lines in catalog order.
    pub items: Vec<StockLine>,
}

// =============================================================================
// Unit Tests
// =============================================================================
