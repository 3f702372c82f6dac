use serde::{Deserialize, Serialize};

use super::types::ItemKind;

/// Unit price and display name for one item kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// Unit price in KRW, positive.
    pub unit_price: i64,
    /// Display name used on statements, e.g. `이불`.
    pub display_name: String,
}

/// Static item kind → price/display-name table, total over [`ItemKind`].
///
/// Loaded once at process start and immutable afterwards. Being keyed by the
/// enum, the catalog is a superset of every record's item kinds by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceCatalog {
    entries: [PriceEntry; 5],
}

impl PriceCatalog {
    /// Build a catalog from one entry per kind, in [`ItemKind::ALL`] order.
    pub fn new(entries: [PriceEntry; 5]) -> Self {
        Self { entries }
    }

    /// The standard laundry tariff.
    pub fn standard() -> Self {
        Self::new([
            PriceEntry { unit_price: 6_500, display_name: "이불".into() },
            PriceEntry { unit_price: 4_500, display_name: "요".into() },
            PriceEntry { unit_price: 1_500, display_name: "베개커버".into() },
            PriceEntry { unit_price: 1_000, display_name: "수건".into() },
            PriceEntry { unit_price: 700, display_name: "바디타월".into() },
        ])
    }

    fn index(kind: ItemKind) -> usize {
        match kind {
            ItemKind::Blanket => 0,
            ItemKind::Mat => 1,
            ItemKind::PillowCover => 2,
            ItemKind::Towel => 3,
            ItemKind::BodyTowel => 4,
        }
    }

    pub fn entry(&self, kind: ItemKind) -> &PriceEntry {
        &self.entries[Self::index(kind)]
    }

    pub fn unit_price(&self, kind: ItemKind) -> i64 {
        self.entry(kind).unit_price
    }

    pub fn display_name(&self, kind: ItemKind) -> &str {
        &self.entry(kind).display_name
    }
}

impl Default for PriceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
