//! # Vending Machine
//!
//! The transaction state machine: one active transaction orchestrated
//! against the inventory ledger.
//!
//! ## Validation Discipline
//! Every mutation re-validates against LIVE ledger state at the moment it
//! runs. Selection-time availability is only a courtesy check; stock can
//! be edited administratively between selection and purchase, and the
//! purchase path must notice. Expected failures leave both the
//! transaction and the ledger untouched.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use vend_core::{
    Catalog, CatalogItem, Eligibility, Money, Transaction, VendError, VendResult,
    DEFAULT_FUNDS_LIMIT,
};
use vend_store::InventoryLedger;

// =============================================================================
// Configuration
// =============================================================================

/// Tunable knobs for one machine.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    /// Maximum accumulated funds per transaction.
    pub funds_limit: Money,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            funds_limit: DEFAULT_FUNDS_LIMIT,
        }
    }
}

// =============================================================================
// Response Payloads
// =============================================================================

/// An item as the presentation layer sees it: catalog fields plus the
/// ledger's live stock count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub price: Money,
    pub stock: i64,
    pub media_ref: String,
}

impl ItemView {
    fn new(item: &CatalogItem, stock: i64) -> Self {
        ItemView {
            id: item.id.clone(),
            name: item.name.clone(),
            artist: item.artist.clone(),
            price: item.price,
            stock,
            media_ref: item.media_ref.clone(),
        }
    }
}

/// Outcome of an accepted insert.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertReceipt {
    /// The amount just accepted.
    pub accepted: Money,

    /// New accumulated total.
    pub total: Money,

    /// Informational: the total has now reached the limit. Reaching it
    /// exactly is allowed; only going past it is rejected.
    pub limit_reached: bool,
}

/// Outcome of a successful purchase.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    /// The item dispensed, with its post-purchase stock count.
    pub item: ItemView,

    /// Funds returned: inserted amount minus price, never negative.
    pub change: Money,
}

/// Outcome of a cancel: the full held amount comes back.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    /// Exact pre-cancel accumulated amount. Zero is a valid refund.
    pub amount: Money,
}

// =============================================================================
// Vending Machine
// =============================================================================

/// A single-user vending machine: one transaction, one ledger.
///
/// The ledger is injected at construction; the machine reads stock through
/// it and requests decrements, never mutating counts itself.
#[derive(Debug)]
pub struct VendingMachine {
    catalog: Arc<Catalog>,
    ledger: InventoryLedger,
    tx: Transaction,
    config: MachineConfig,
}

impl VendingMachine {
    /// Builds a machine around an opened ledger.
    pub fn new(ledger: InventoryLedger, config: MachineConfig) -> Self {
        VendingMachine {
            catalog: Arc::clone(ledger.catalog()),
            ledger,
            tx: Transaction::new(),
            config,
        }
    }

    // =========================================================================
    // User Operations
    // =========================================================================

    /// Selects an item for purchase.
    ///
    /// ## Behavior
    /// - Unknown id → `ItemNotFound`
    /// - Known but sold out → `OutOfStock`
    /// - Success sets the selection and returns the item with live stock.
    ///   Inserted funds deliberately carry over from any prior selection.
    /// On failure the previous selection (and funds) remain as they were.
    pub fn select_item(&mut self, id: &str) -> VendResult<ItemView> {
        let item = self
            .catalog
            .get(id)
            .ok_or_else(|| VendError::ItemNotFound(id.to_string()))?;

        if !self.ledger.is_available(id) {
            return Err(VendError::OutOfStock(id.to_string()));
        }

        self.tx.select(id);
        debug!(item = id, "item selected");
        Ok(ItemView::new(item, self.ledger.get_stock(id)?))
    }

    /// Accepts money into the transaction.
    ///
    /// Limit-checked BEFORE mutating: a rejected insert leaves the
    /// accumulated amount exactly as it was.
    pub fn insert_funds(&mut self, amount: i64) -> VendResult<InsertReceipt> {
        let total = self.tx.insert(amount, self.config.funds_limit)?;
        debug!(amount, total = %total, "funds inserted");
        Ok(InsertReceipt {
            accepted: Money::from_units(amount),
            total,
            limit_reached: self.tx.is_limit_reached(self.config.funds_limit),
        })
    }

    /// Whether a purchase would go through right now, and if not, why.
    ///
    /// Recomputed from live state on every call; availability comes from
    /// the ledger, not from anything cached at selection time.
    pub fn can_purchase(&self) -> Eligibility {
        let (price, available) = match self.tx.selected_item_id() {
            None => (None, false),
            Some(id) => {
                // Selection was validated against the catalog; its id
                // disappearing afterwards is a programmer error.
                let price = self
                    .catalog
                    .price_of(id)
                    .expect("selected id must exist in catalog");
                (Some(price), self.ledger.is_available(id))
            }
        };

        Eligibility::check(&self.tx, price, available)
    }

    /// Executes the purchase.
    ///
    /// ## Behavior
    /// - Ineligible → the matching error, nothing mutated
    /// - Ledger decrement losing the race to zero → `OutOfStock`, funds
    ///   retained so the user can cancel or pick something else
    /// - Success → stock decremented and persisted, change computed,
    ///   transaction reset to Idle
    pub fn purchase(&mut self) -> VendResult<PurchaseReceipt> {
        match self.can_purchase() {
            Eligibility::Eligible => {}
            Eligibility::NoSelection => return Err(VendError::NoSelection),
            Eligibility::OutOfStock => {
                let id = self.tx.selected_item_id().unwrap_or_default().to_string();
                return Err(VendError::OutOfStock(id));
            }
            Eligibility::InsufficientFunds { shortfall } => {
                return Err(VendError::InsufficientFunds { shortfall });
            }
        }

        let id = self
            .tx
            .selected_item_id()
            .expect("eligible purchase has a selection")
            .to_string();
        let item = self
            .catalog
            .get(&id)
            .expect("selected id must exist in catalog");

        // Invariant: eligibility guaranteed inserted >= price. A negative
        // change here is a bug in can_purchase, not a user error.
        let change = self
            .tx
            .inserted_amount()
            .checked_sub(item.price)
            .expect("eligible purchase covers the price");

        if !self.ledger.decrement(&id) {
            // Stock raced to zero between the check and the decrement.
            // Funds are NOT forfeited; the transaction stands.
            return Err(VendError::OutOfStock(id));
        }

        let stock = self
            .ledger
            .get_stock(&id)
            .expect("decremented id must exist in ledger");
        let view = ItemView::new(item, stock);
        self.tx.reset();

        info!(item = %id, change = %change, "purchase complete");
        Ok(PurchaseReceipt { item: view, change })
    }

    /// Cancels the transaction, refunding everything held.
    ///
    /// Unconditional: cancelling an idle transaction refunds $0, which is
    /// a normal outcome, not an error.
    pub fn cancel(&mut self) -> Refund {
        let amount = self.tx.reset();
        info!(refund = %amount, "transaction cancelled");
        Refund { amount }
    }

    // =========================================================================
    // Read Accessors
    // =========================================================================

    /// Accumulated inserted funds.
    pub fn inserted_amount(&self) -> Money {
        self.tx.inserted_amount()
    }

    /// Currently selected slot code, if any.
    pub fn selected_item_id(&self) -> Option<&str> {
        self.tx.selected_item_id()
    }

    /// True once the inserted total has reached the funds limit.
    pub fn is_limit_reached(&self) -> bool {
        self.tx.is_limit_reached(self.config.funds_limit)
    }

    /// Display preview of the change a purchase would return right now.
    /// $0 with no selection or a shortfall.
    pub fn change_preview(&self) -> Money {
        match self.tx.selected_item_id().and_then(|id| self.catalog.price_of(id)) {
            Some(price) => self.tx.change_preview(price),
            None => Money::zero(),
        }
    }

    /// Every catalog item with its live stock, in stocking order. This is
    /// what the presentation layer renders as the item grid.
    pub fn item_views(&self) -> Vec<ItemView> {
        self.catalog
            .items()
            .iter()
            .map(|item| ItemView::new(item, self.ledger.get_stock(&item.id).unwrap_or(0)))
            .collect()
    }

    /// Read access to the ledger (stock queries, summaries).
    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }

    /// Administrative access to the ledger (set_stock, reset_to_defaults).
    pub fn ledger_mut(&mut self) -> &mut InventoryLedger {
        &mut self.ledger
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vend_core::catalog::{default_catalog, Catalog, CatalogItem};
    use vend_store::MemoryStore;

    fn machine_with(items: Vec<CatalogItem>) -> VendingMachine {
        let catalog = Arc::new(Catalog::new(items).unwrap());
        let ledger = InventoryLedger::open(catalog, Box::new(MemoryStore::new()));
        VendingMachine::new(ledger, MachineConfig::default())
    }

    fn default_machine() -> VendingMachine {
        let ledger = InventoryLedger::open(
            Arc::new(default_catalog()),
            Box::new(MemoryStore::new()),
        );
        VendingMachine::new(ledger, MachineConfig::default())
    }

    #[test]
    fn test_a1_purchase_scenario() {
        // A1: price $32, stock 3. Insert 20 + 20, third 20 rejected,
        // purchase succeeds with $8 change and stock drops to 2.
        let mut machine = default_machine();

        assert_eq!(machine.insert_funds(20).unwrap().total.units(), 20);
        assert_eq!(machine.insert_funds(20).unwrap().total.units(), 40);

        let err = machine.insert_funds(20).unwrap_err();
        assert!(matches!(err, VendError::LimitExceeded { .. }));
        assert_eq!(machine.inserted_amount().units(), 40);

        machine.select_item("A1").unwrap();
        assert!(machine.can_purchase().is_eligible());

        let receipt = machine.purchase().unwrap();
        assert_eq!(receipt.change.units(), 8);
        assert_eq!(receipt.item.id, "A1");
        assert_eq!(receipt.item.stock, 2);

        // Transaction back to Idle
        assert_eq!(machine.inserted_amount(), Money::zero());
        assert_eq!(machine.selected_item_id(), None);
        assert_eq!(machine.ledger().get_stock("A1").unwrap(), 2);
    }

    #[test]
    fn test_purchase_receipt_stock_matches_ledger() {
        let mut machine = default_machine();
        machine.insert_funds(40).unwrap();
        machine.select_item("A1").unwrap();

        let receipt = machine.purchase().unwrap();
        // The receipt carries the ledger's real post-purchase count,
        // never a placeholder
        assert_eq!(
            receipt.item.stock,
            machine.ledger().get_stock("A1").unwrap()
        );
        assert_eq!(receipt.item.stock, 2);
    }

    #[test]
    fn test_select_unknown_item() {
        let mut machine = default_machine();
        let err = machine.select_item("Z9").unwrap_err();
        assert!(matches!(err, VendError::ItemNotFound(id) if id == "Z9"));
    }

    #[test]
    fn test_select_sold_out_item_keeps_prior_state() {
        let mut machine = machine_with(vec![
            CatalogItem::new("A1", "Abbey Road", "The Beatles", 32, 3, ""),
            CatalogItem::new("A2", "Dark Side of the Moon", "Pink Floyd", 25, 0, ""),
        ]);
        machine.insert_funds(10).unwrap();
        machine.select_item("A1").unwrap();

        let err = machine.select_item("A2").unwrap_err();
        assert!(matches!(err, VendError::OutOfStock(id) if id == "A2"));

        // Prior selection and funds untouched
        assert_eq!(machine.selected_item_id(), Some("A1"));
        assert_eq!(machine.inserted_amount().units(), 10);
    }

    #[test]
    fn test_invalid_insert_amount() {
        let mut machine = default_machine();
        machine.insert_funds(5).unwrap();

        let err = machine.insert_funds(-5).unwrap_err();
        assert!(matches!(err, VendError::InvalidAmount { amount: -5 }));
        assert_eq!(machine.inserted_amount().units(), 5);
    }

    #[test]
    fn test_insert_reports_limit_reached() {
        let mut machine = default_machine();
        machine.insert_funds(30).unwrap();

        let receipt = machine.insert_funds(20).unwrap();
        assert_eq!(receipt.total.units(), 50);
        assert!(receipt.limit_reached);
        assert!(machine.is_limit_reached());
    }

    #[test]
    fn test_funds_carry_over_reselection() {
        let mut machine = default_machine();
        machine.insert_funds(25).unwrap();
        machine.select_item("A2").unwrap(); // $25, exactly funded

        assert!(machine.can_purchase().is_eligible());

        // Switch to a pricier record: no refund, now short by $10
        machine.select_item("C3").unwrap(); // $35
        let check = machine.can_purchase();
        assert_eq!(
            check,
            Eligibility::InsufficientFunds {
                shortfall: Money::from_units(10)
            }
        );
    }

    #[test]
    fn test_can_purchase_without_selection() {
        let machine = default_machine();
        assert_eq!(machine.can_purchase(), Eligibility::NoSelection);
        assert_eq!(machine.can_purchase().reason(), "No item selected");
    }

    #[test]
    fn test_purchase_without_selection_is_rejected() {
        let mut machine = default_machine();
        machine.insert_funds(50).unwrap();

        let err = machine.purchase().unwrap_err();
        assert!(matches!(err, VendError::NoSelection));
        assert_eq!(machine.inserted_amount().units(), 50);
    }

    #[test]
    fn test_purchase_rechecks_live_stock() {
        // Stock edited administratively between selection and purchase
        let mut machine = default_machine();
        machine.select_item("A1").unwrap();
        machine.insert_funds(40).unwrap();

        machine.ledger_mut().set_stock("A1", 0).unwrap();

        assert_eq!(machine.can_purchase(), Eligibility::OutOfStock);
        let err = machine.purchase().unwrap_err();
        assert!(matches!(err, VendError::OutOfStock(id) if id == "A1"));

        // Funds and selection retained: user can cancel or re-select
        assert_eq!(machine.inserted_amount().units(), 40);
        assert_eq!(machine.selected_item_id(), Some("A1"));
    }

    #[test]
    fn test_two_sequential_purchases_of_last_unit() {
        let mut machine = machine_with(vec![CatalogItem::new(
            "A1", "Abbey Road", "The Beatles", 32, 1, "",
        )]);

        machine.insert_funds(32).unwrap();
        machine.select_item("A1").unwrap();
        let receipt = machine.purchase().unwrap();
        assert_eq!(receipt.change, Money::zero());
        assert_eq!(machine.ledger().get_stock("A1").unwrap(), 0);

        // Second round: selection already fails, the ledger is empty
        machine.insert_funds(32).unwrap();
        let err = machine.select_item("A1").unwrap_err();
        assert!(matches!(err, VendError::OutOfStock(_)));

        // First purchase's reset is unaffected; the new funds stand alone
        assert_eq!(machine.inserted_amount().units(), 32);
    }

    #[test]
    fn test_cancel_refunds_exact_amount() {
        let mut machine = default_machine();
        machine.insert_funds(17).unwrap();
        machine.select_item("A1").unwrap();

        let refund = machine.cancel();
        assert_eq!(refund.amount.units(), 17);
        assert_eq!(machine.inserted_amount(), Money::zero());
        assert_eq!(machine.selected_item_id(), None);

        // Cancelling while idle refunds zero, still a success
        assert_eq!(machine.cancel().amount, Money::zero());
    }

    #[test]
    fn test_change_preview() {
        let mut machine = default_machine();
        assert_eq!(machine.change_preview(), Money::zero());

        machine.select_item("A1").unwrap(); // $32
        machine.insert_funds(20).unwrap();
        assert_eq!(machine.change_preview(), Money::zero()); // short: floored

        machine.insert_funds(20).unwrap();
        assert_eq!(machine.change_preview().units(), 8);
    }

    #[test]
    fn test_item_views_reflect_live_stock() {
        let mut machine = default_machine();
        machine.insert_funds(32).unwrap();
        machine.select_item("A1").unwrap();
        machine.purchase().unwrap();

        let views = machine.item_views();
        assert_eq!(views.len(), 15);
        let a1 = views.iter().find(|view| view.id == "A1").unwrap();
        assert_eq!(a1.stock, 2);
    }
}
