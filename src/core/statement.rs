use serde::{Deserialize, Serialize};

use super::catalog::PriceCatalog;
use super::types::{BusinessAggregate, ExtraLineItem, ItemKind, Period, TaxSplit};

/// One priced line on a statement: item name, quantity, unit price, amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: i64,
    pub amount: i64,
}

/// One location's section on a statement: its non-zero item lines and their
/// subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSection {
    pub location: String,
    pub lines: Vec<ItemLine>,
    pub subtotal: i64,
}

/// A business entity's settlement statement (거래명세서) for one period.
///
/// Sections appear in the aggregate's first-seen location order; lines within
/// a section follow [`ItemKind::ALL`] order and carry only quantities > 0.
/// The supply/tax decomposition is a derived view — see
/// [`Statement::tax_split`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub period: Period,
    pub registration_id: String,
    pub business_name: String,
    pub owner_name: String,
    pub sections: Vec<LocationSection>,
    pub extra_items: Vec<ExtraLineItem>,
    pub grand_total: i64,
}

impl Statement {
    /// `supply_amount + tax_amount == grand_total`, always.
    pub fn tax_split(&self) -> TaxSplit {
        TaxSplit::of(self.grand_total)
    }
}

/// Build a business entity's statement from its aggregate.
///
/// An aggregate with no locations and no extra items yields a valid empty
/// statement with a zero grand total; that is not an error.
pub fn build_statement(
    aggregate: &BusinessAggregate,
    period: Period,
    catalog: &PriceCatalog,
) -> Statement {
    let mut sections = Vec::with_capacity(aggregate.locations.len());
    let mut grand_total: i64 = 0;

    for (location, counts) in &aggregate.locations {
        let mut lines = Vec::new();
        let mut subtotal: i64 = 0;

        for kind in ItemKind::ALL {
            let quantity = counts.get(kind);
            if quantity == 0 {
                continue;
            }
            let unit_price = catalog.unit_price(kind);
            let amount = i64::from(quantity) * unit_price;
            subtotal += amount;
            lines.push(ItemLine {
                name: catalog.display_name(kind).to_string(),
                quantity,
                unit_price,
                amount,
            });
        }

        grand_total += subtotal;
        sections.push(LocationSection { location: location.clone(), lines, subtotal });
    }

    // Extra amounts are summed as given, never recomputed.
    for extra in &aggregate.extra_items {
        grand_total += extra.amount;
    }

    Statement {
        period,
        registration_id: aggregate.registration_id.clone(),
        business_name: aggregate.name.clone(),
        owner_name: aggregate.owner.clone(),
        sections,
        extra_items: aggregate.extra_items.clone(),
        grand_total,
    }
}
