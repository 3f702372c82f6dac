//! Hometax filing sheet generation.
//!
//! Emits the flat bulk-upload table for tax-invoice issuance: one row per
//! business entity per period, UTF-8 CSV with CRLF line endings.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{BusinessAggregate, ItemKind, Period, PriceCatalog, TaxSplit};

/// Fixed 품목 value on every filing row; not derived from data.
pub const SERVICE_LABEL: &str = "세탁 서비스";

/// Hometax bulk-upload column headers, in upload order.
const SHEET_HEADERS: [&str; 8] = [
    "작성일자",
    "공급받는자 사업자번호",
    "공급받는자 상호",
    "공급받는자 대표자",
    "공급가액",
    "세액",
    "합계금액",
    "품목",
];

/// One Hometax tax-invoice row for one business entity in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRow {
    /// 작성일자 — flat 8-digit last calendar day of the period.
    pub filing_date: String,
    /// Registration id with all separators stripped (digits only).
    pub registration_id: String,
    pub business_name: String,
    pub owner_name: String,
    pub supply_amount: i64,
    pub tax_amount: i64,
    pub grand_total: i64,
    /// Always [`SERVICE_LABEL`].
    pub service_label: String,
}

/// Build one filing row per business entity, in the aggregates' iteration
/// order.
///
/// Totals are recomputed here directly from each aggregate with the same
/// formula the statement builder uses, so a business's filing grand total
/// always equals its statement grand total.
pub fn build_filing_rows(
    aggregates: &IndexMap<String, BusinessAggregate>,
    period: Period,
    catalog: &PriceCatalog,
) -> Vec<FilingRow> {
    let filing_date = period.filing_date();

    aggregates
        .values()
        .map(|aggregate| {
            let grand_total = aggregate_total(aggregate, catalog);
            let TaxSplit { supply_amount, tax_amount } = TaxSplit::of(grand_total);
            FilingRow {
                filing_date: filing_date.clone(),
                registration_id: aggregate.normalized_registration_id(),
                business_name: aggregate.name.clone(),
                owner_name: aggregate.owner.clone(),
                supply_amount,
                tax_amount,
                grand_total,
                service_label: SERVICE_LABEL.to_string(),
            }
        })
        .collect()
}

/// Tax-inclusive grand total of one aggregate: catalog-priced counts plus
/// extra amounts as given.
pub fn aggregate_total(aggregate: &BusinessAggregate, catalog: &PriceCatalog) -> i64 {
    let mut total: i64 = 0;
    for counts in aggregate.locations.values() {
        for kind in ItemKind::ALL {
            total += i64::from(counts.get(kind)) * catalog.unit_price(kind);
        }
    }
    for extra in &aggregate.extra_items {
        total += extra.amount;
    }
    total
}

/// Render filing rows as the flat upload sheet: header row plus one data row
/// per business, CRLF-terminated.
pub fn to_sheet_csv(rows: &[FilingRow]) -> String {
    let mut out = String::new();

    for (i, h) in SHEET_HEADERS.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        csv_field_str(&mut out, h);
    }
    out.push_str("\r\n");

    for row in rows {
        csv_field_str(&mut out, &row.filing_date);
        out.push(',');
        csv_field_str(&mut out, &row.registration_id);
        out.push(',');
        csv_field_str(&mut out, &row.business_name);
        out.push(',');
        csv_field_str(&mut out, &row.owner_name);
        out.push(',');
        out.push_str(&row.supply_amount.to_string());
        out.push(',');
        out.push_str(&row.tax_amount.to_string());
        out.push(',');
        out.push_str(&row.grand_total.to_string());
        out.push(',');
        csv_field_str(&mut out, &row.service_label);
        out.push_str("\r\n");
    }

    out
}

/// Quote a text field, doubling embedded quotes.
fn csv_field_str(out: &mut String, value: &str) {
    out.push('"');
    for ch in value.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExtraLineItem, ItemCounts};

    fn sample_aggregates() -> IndexMap<String, BusinessAggregate> {
        let mut aggregate = BusinessAggregate::new("419-11-02853", "오를리(Orly)", "김지혜");
        aggregate.locations.insert(
            "동대문구 회기로 189".into(),
            ItemCounts { blanket: 5, towel: 5, ..ItemCounts::default() },
        );
        IndexMap::from([("419-11-02853".to_string(), aggregate)])
    }

    #[test]
    fn row_values() {
        let period = Period::new(2026, 7).unwrap();
        let rows = build_filing_rows(&sample_aggregates(), period, &PriceCatalog::standard());
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.filing_date, "20260731");
        assert_eq!(row.registration_id, "4191102853");
        assert_eq!(row.grand_total, 37_500);
        assert_eq!(row.supply_amount, 34_090);
        assert_eq!(row.tax_amount, 3_410);
        assert_eq!(row.service_label, SERVICE_LABEL);
    }

    #[test]
    fn extras_included_in_total() {
        let mut aggregates = sample_aggregates();
        aggregates[0].push_extra(ExtraLineItem::new("수거비", 1, 10_000));
        let period = Period::new(2026, 7).unwrap();
        let rows = build_filing_rows(&aggregates, period, &PriceCatalog::standard());
        assert_eq!(rows[0].grand_total, 47_500);
    }

    #[test]
    fn sheet_layout() {
        let period = Period::new(2026, 7).unwrap();
        let rows = build_filing_rows(&sample_aggregates(), period, &PriceCatalog::standard());
        let sheet = to_sheet_csv(&rows);
        let mut lines = sheet.split("\r\n");
        assert_eq!(
            lines.next().unwrap(),
            "\"작성일자\",\"공급받는자 사업자번호\",\"공급받는자 상호\",\"공급받는자 대표자\",\"공급가액\",\"세액\",\"합계금액\",\"품목\""
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"20260731\",\"4191102853\",\"오를리(Orly)\",\"김지혜\",34090,3410,37500,\"세탁 서비스\""
        );
        assert_eq!(lines.next(), Some(""));
    }

    #[test]
    fn csv_field_doubles_quotes() {
        let mut out = String::new();
        csv_field_str(&mut out, "주식회사 \"콥스\"");
        assert_eq!(out, "\"주식회사 \"\"콥스\"\"\"");
    }
}
