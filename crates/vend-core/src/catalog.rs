//! # Catalog
//!
//! The immutable item catalog: which records the machine sells, at what
//! price, and what each slot restocks to.
//!
//! ## Identity Model
//! Items are keyed by their slot code (`"A1"`..`"E3"`), a fixed business
//! id assigned when the machine is stocked. The set of ids never changes
//! at runtime; only the ledger's stock counts do.
//!
//! ## Ownership
//! The catalog never carries live stock. Live counts belong exclusively to
//! the inventory ledger (vend-store); the catalog only knows each item's
//! `default_stock`, the value a reset restores.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{VendError, VendResult};
use crate::money::Money;

// =============================================================================
// Catalog Item
// =============================================================================

/// A purchasable record in the machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Slot code - unique business identifier ("A1", "B3", ...).
    pub id: String,

    /// Album title shown on the item card.
    pub name: String,

    /// Artist name shown under the title.
    pub artist: String,

    /// Price in whole currency units.
    pub price: Money,

    /// Stock level this slot is seeded with (and reset to).
    pub default_stock: i64,

    /// Opaque handle to artwork/audio; the core never interprets it.
    pub media_ref: String,
}

impl CatalogItem {
    /// Creates a catalog item.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        artist: impl Into<String>,
        price: i64,
        default_stock: i64,
        media_ref: impl Into<String>,
    ) -> Self {
        CatalogItem {
            id: id.into(),
            name: name.into(),
            artist: artist.into(),
            price: Money::from_units(price),
            default_stock,
            media_ref: media_ref.into(),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A fixed, ordered sequence of catalog items with indexed id lookup.
///
/// ## Invariants
/// - Ids are unique (enforced at construction)
/// - Iteration order is the stocking order, stable for display
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from an ordered item list.
    ///
    /// Fails with `DuplicateItem` if two items share an id.
    pub fn new(items: Vec<CatalogItem>) -> VendResult<Self> {
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), pos).is_some() {
                return Err(VendError::DuplicateItem(item.id.clone()));
            }
        }
        Ok(Catalog { items, index })
    }

    /// All items in stocking order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Looks up an item by slot code.
    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    /// Checks whether an id exists in the catalog.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Price lookup by slot code.
    pub fn price_of(&self, id: &str) -> Option<Money> {
        self.get(id).map(|item| item.price)
    }

    /// Items sorted by price, most expensive first.
    pub fn sorted_by_price(&self) -> Vec<&CatalogItem> {
        let mut sorted: Vec<&CatalogItem> = self.items.iter().collect();
        sorted.sort_by(|a, b| b.price.cmp(&a.price));
        sorted
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Default Catalog Seed
// =============================================================================

/// The stock vinyl catalog the machine ships with.
///
/// Fifteen records across five rows (A-E), three slots each. Prices are
/// whole units, `default_stock` is what a stock reset restores.
pub fn default_catalog() -> Catalog {
    let items = vec![
        CatalogItem::new("A1", "Abbey Road", "The Beatles", 32, 3, "image/Abbey Road.png"),
        CatalogItem::new("A2", "Dark Side of the Moon", "Pink Floyd", 25, 2, "image/Dark Side of the Moon.png"),
        CatalogItem::new("A3", "Keep Me Fed", "The Warning", 28, 5, "image/TheWarning.png"),
        CatalogItem::new("B1", "Rumours", "Fleetwood Mac", 29, 4, "image/Rumours.png"),
        CatalogItem::new("B2", "Led Zeppelin IV", "Led Zeppelin", 24, 3, "image/Led Zeppelin IV.png"),
        CatalogItem::new("B3", "Back in Black", "AC/DC", 27, 6, "image/Back in Black.png"),
        CatalogItem::new("C1", "Hotel California", "Eagles", 33, 5, "image/Hotel California.png"),
        CatalogItem::new("C2", "Nevermind", "Nirvana", 22, 7, "image/Nevermind.png"),
        CatalogItem::new("C3", "Weight of the World", "Nier: Automata", 35, 3, "image/The Wall.png"),
        CatalogItem::new("D1", "Appetite for Destruction", "Guns N' Roses", 26, 8, "image/Appetite for Destruction.png"),
        CatalogItem::new("D2", "Tu Ultima Cancion", "Kirby Temerario", 25, 6, "image/Born to Run.png"),
        CatalogItem::new("D3", "Purple Rain", "Prince", 29, 21, "image/Purple Rain.png"),
        CatalogItem::new("E1", "Bohemian Rhapsody", "Queen", 31, 5, "image/Bohemian Rhapsody.png"),
        CatalogItem::new("E2", "Even In Arcadia", "Sleep Token", 34, 15, "image/Even in Arcadia.png"),
        CatalogItem::new("E3", "Like a Rolling Stone", "Bob Dylan", 27, 9, "image/Like a Rolling Stone.png"),
    ];

    // Ids above are hand-maintained and unique; a duplicate here is a
    // programmer error, not a runtime condition.
    Catalog::new(items).expect("default catalog ids are unique")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_shape() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 15);

        let a1 = catalog.get("A1").unwrap();
        assert_eq!(a1.name, "Abbey Road");
        assert_eq!(a1.price, Money::from_units(32));
        assert_eq!(a1.default_stock, 3);
    }

    #[test]
    fn test_lookup_unknown_id() {
        let catalog = default_catalog();
        assert!(catalog.get("Z9").is_none());
        assert!(!catalog.contains("Z9"));
        assert_eq!(catalog.price_of("Z9"), None);
    }

    #[test]
    fn test_sorted_by_price_descending() {
        let catalog = default_catalog();
        let sorted = catalog.sorted_by_price();

        assert_eq!(sorted.first().unwrap().id, "C3"); // $35
        assert_eq!(sorted.last().unwrap().id, "C2"); // $22
        for pair in sorted.windows(2) {
            assert!(pair[0].price >= pair[1].price);
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let items = vec![
            CatalogItem::new("A1", "One", "X", 10, 1, ""),
            CatalogItem::new("A1", "Two", "Y", 12, 1, ""),
        ];
        let err = Catalog::new(items).unwrap_err();
        assert!(matches!(err, VendError::DuplicateItem(id) if id == "A1"));
    }
}
